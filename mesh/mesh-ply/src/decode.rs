//! Element record decoding.
//!
//! Each element decodes exactly `count` records, each record consisting of
//! its properties in declared order. The decode strategy is selected by
//! the schema's [`ElementKind`] tag; properties that carry no meaning for
//! the element (or for this loader) are still consumed so the cursor
//! stays synchronized with the declared layout.

use mesh_types::Vertex;

use crate::cursor::Cursor;
use crate::error::PlyResult;
use crate::header::{Channel, ElementSchema, PlyEncoding, Storage};

/// Read one Float32 scalar: a token in ASCII, 4 endian-corrected bytes in
/// binary.
fn read_float(cursor: &mut Cursor<'_>, encoding: PlyEncoding) -> PlyResult<f32> {
    match encoding.byte_order() {
        None => Ok(cursor.next_token()?.parse()?),
        Some(order) => cursor.read_f32(order),
    }
}

/// Read one Int32 scalar.
fn read_int(cursor: &mut Cursor<'_>, encoding: PlyEncoding) -> PlyResult<i32> {
    match encoding.byte_order() {
        None => Ok(cursor.next_token()?.parse()?),
        Some(order) => cursor.read_i32(order),
    }
}

/// Read one face index (unsigned).
fn read_index(cursor: &mut Cursor<'_>, encoding: PlyEncoding) -> PlyResult<u32> {
    match encoding.byte_order() {
        None => Ok(cursor.next_token()?.parse()?),
        Some(order) => cursor.read_u32(order),
    }
}

/// Read one NormalizedByte scalar, scaled to [0, 1].
fn read_normalized_byte(cursor: &mut Cursor<'_>, encoding: PlyEncoding) -> PlyResult<f32> {
    let byte = match encoding.byte_order() {
        None => cursor.next_token()?.parse::<u8>()?,
        Some(_) => cursor.read_u8()?,
    };
    Ok(f32::from(byte) / 255.0)
}

/// Read a list's length prefix: an integer token in ASCII, one byte in
/// binary.
fn read_list_len(cursor: &mut Cursor<'_>, encoding: PlyEncoding) -> PlyResult<usize> {
    match encoding.byte_order() {
        None => Ok(cursor.next_token()?.parse()?),
        Some(_) => Ok(usize::from(cursor.read_u8()?)),
    }
}

/// Consume `len` list values without interpreting them. Binary list
/// values are always 4-byte words.
fn skip_list_values(cursor: &mut Cursor<'_>, encoding: PlyEncoding, len: usize) -> PlyResult<()> {
    match encoding.byte_order() {
        None => {
            for _ in 0..len {
                cursor.next_token()?;
            }
            Ok(())
        }
        Some(_) => cursor.skip_bytes(len * 4),
    }
}

/// Write a decoded scalar into its vertex channel.
fn apply_scalar(vertex: &mut Vertex, channel: Channel, value: f32) {
    match channel {
        Channel::PositionX => vertex.position.x = value,
        Channel::PositionY => vertex.position.y = value,
        Channel::PositionZ => vertex.position.z = value,
        Channel::TexU => vertex.uv.x = value,
        Channel::TexV => vertex.uv.y = value,
        Channel::ColorR => vertex.color.x = value,
        Channel::ColorG => vertex.color.y = value,
        Channel::ColorB => vertex.color.z = value,
        Channel::NormalX => vertex.normal.x = value,
        Channel::NormalY => vertex.normal.y = value,
        Channel::NormalZ => vertex.normal.z = value,
        Channel::Intensity | Channel::FaceIndices | Channel::Unknown => {}
    }
}

/// Decode a vertex element into default-initialized vertex records.
///
/// Float32 and NormalizedByte values of recognized channels are written
/// in place; Int32 scalars, unknown channels, and lists are consumed and
/// discarded.
pub(crate) fn decode_vertex_element(
    element: &ElementSchema,
    cursor: &mut Cursor<'_>,
    encoding: PlyEncoding,
) -> PlyResult<Vec<Vertex>> {
    let mut vertices = vec![Vertex::default(); element.count];

    for vertex in &mut vertices {
        for property in &element.properties {
            match property.storage {
                Storage::Float32 => {
                    let value = read_float(cursor, encoding)?;
                    apply_scalar(vertex, property.channel, value);
                }
                Storage::NormalizedByte => {
                    let value = read_normalized_byte(cursor, encoding)?;
                    apply_scalar(vertex, property.channel, value);
                }
                Storage::Int32 => {
                    // integer scalars have no vertex channel sink
                    read_int(cursor, encoding)?;
                }
                Storage::List => {
                    let len = read_list_len(cursor, encoding)?;
                    skip_list_values(cursor, encoding, len)?;
                }
            }
        }
    }

    Ok(vertices)
}

/// Decode a face element into triangle index triples.
///
/// Only a [`Channel::FaceIndices`] list is interpreted: length 3 emits
/// one triangle, length 4 emits the pair `(i0,i1,i2)`, `(i3,i1,i2)`.
/// Every other record shape is consumed without emitting geometry.
pub(crate) fn decode_face_element(
    element: &ElementSchema,
    cursor: &mut Cursor<'_>,
    encoding: PlyEncoding,
) -> PlyResult<Vec<[u32; 3]>> {
    let mut faces = Vec::with_capacity(element.count);

    for _ in 0..element.count {
        for property in &element.properties {
            match property.storage {
                Storage::List => {
                    let len = read_list_len(cursor, encoding)?;
                    if property.channel == Channel::FaceIndices && len == 3 {
                        let i0 = read_index(cursor, encoding)?;
                        let i1 = read_index(cursor, encoding)?;
                        let i2 = read_index(cursor, encoding)?;
                        faces.push([i0, i1, i2]);
                    } else if property.channel == Channel::FaceIndices && len == 4 {
                        let i0 = read_index(cursor, encoding)?;
                        let i1 = read_index(cursor, encoding)?;
                        let i2 = read_index(cursor, encoding)?;
                        let i3 = read_index(cursor, encoding)?;
                        faces.push([i0, i1, i2]);
                        faces.push([i3, i1, i2]);
                    } else {
                        // unsupported list shape: consume, emit nothing
                        skip_list_values(cursor, encoding, len)?;
                    }
                }
                Storage::Float32 => {
                    read_float(cursor, encoding)?;
                }
                Storage::Int32 => {
                    read_int(cursor, encoding)?;
                }
                Storage::NormalizedByte => {
                    read_normalized_byte(cursor, encoding)?;
                }
            }
        }
    }

    Ok(faces)
}

/// Consume a generic element's records entirely.
pub(crate) fn skip_element(
    element: &ElementSchema,
    cursor: &mut Cursor<'_>,
    encoding: PlyEncoding,
) -> PlyResult<()> {
    for _ in 0..element.count {
        for property in &element.properties {
            match property.storage {
                Storage::Float32 => {
                    read_float(cursor, encoding)?;
                }
                Storage::Int32 => {
                    read_int(cursor, encoding)?;
                }
                Storage::NormalizedByte => {
                    read_normalized_byte(cursor, encoding)?;
                }
                Storage::List => {
                    let len = read_list_len(cursor, encoding)?;
                    skip_list_values(cursor, encoding, len)?;
                }
            }
        }
    }
    Ok(())
}
