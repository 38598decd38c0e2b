//! PLY header parsing.
//!
//! The header is a token stream: magic `ply`, a format line, repeated
//! `element <name> <count>` declarations each followed by zero or more
//! `property <format> <name>` lines, terminated by `end_header`. The
//! parsed [`Schema`] drives every downstream decode decision, including
//! how to consume properties the loader does not use.

use crate::cursor::{ByteOrder, Cursor};
use crate::error::{PlyError, PlyResult};

/// Encoding of the data region, from the header's format line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlyEncoding {
    /// Whitespace-delimited text records.
    Ascii,
    /// Binary records, least significant byte first.
    BinaryLittleEndian,
    /// Binary records, most significant byte first.
    BinaryBigEndian,
}

impl PlyEncoding {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "ascii" => Some(Self::Ascii),
            "binary_little_endian" => Some(Self::BinaryLittleEndian),
            "binary_big_endian" => Some(Self::BinaryBigEndian),
            _ => None,
        }
    }

    /// Byte order of binary scalars, or `None` for ASCII.
    #[must_use]
    pub const fn byte_order(self) -> Option<ByteOrder> {
        match self {
            Self::Ascii => None,
            Self::BinaryLittleEndian => Some(ByteOrder::Little),
            Self::BinaryBigEndian => Some(ByteOrder::Big),
        }
    }
}

/// Semantic channel of a property, derived from its declared name.
///
/// Unrecognized names map to [`Channel::Unknown`] but stay in the schema,
/// so their bytes/tokens are still consumed in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Position X.
    PositionX,
    /// Position Y.
    PositionY,
    /// Position Z.
    PositionZ,
    /// Texture coordinate U.
    TexU,
    /// Texture coordinate V.
    TexV,
    /// Color red.
    ColorR,
    /// Color green.
    ColorG,
    /// Color blue.
    ColorB,
    /// Normal X.
    NormalX,
    /// Normal Y.
    NormalY,
    /// Normal Z.
    NormalZ,
    /// Scan intensity. Tracked but not stored on vertices.
    Intensity,
    /// Face vertex index list.
    FaceIndices,
    /// Anything else; consumed and discarded.
    Unknown,
}

impl Channel {
    /// Map a declared property name to its channel.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.len() == 1 {
            return match name {
                "x" => Self::PositionX,
                "y" => Self::PositionY,
                "z" => Self::PositionZ,
                "u" => Self::TexU,
                "v" => Self::TexV,
                "r" => Self::ColorR,
                "g" => Self::ColorG,
                "b" => Self::ColorB,
                _ => Self::Unknown,
            };
        }

        match name {
            "red" => Self::ColorR,
            "green" => Self::ColorG,
            "blue" => Self::ColorB,
            "nx" => Self::NormalX,
            "ny" => Self::NormalY,
            "nz" => Self::NormalZ,
            "intensity" => Self::Intensity,
            "vertex_indices" => Self::FaceIndices,
            _ => Self::Unknown,
        }
    }
}

/// Storage format of a property, from its declared type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// 4-byte float (`float`, `float32`).
    Float32,
    /// 4-byte integer. All declared integer widths (`int8` through
    /// `uint32`) are decoded as 4-byte words.
    Int32,
    /// Single byte scaled to [0, 1] by dividing by 255 (`uchar`).
    NormalizedByte,
    /// Variable-length list: a length prefix followed by that many values.
    List,
}

impl Storage {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "float" | "float32" => Some(Self::Float32),
            "uint8" | "uint16" | "uint32" | "int8" | "int16" | "int32" => Some(Self::Int32),
            "uchar" => Some(Self::NormalizedByte),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

/// A declared property: semantic channel plus storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// What the value means.
    pub channel: Channel,
    /// How the value is stored.
    pub storage: Storage,
}

/// Decode strategy for an element, derived from its declared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `vertex` - records populate vertex channels.
    Vertex,
    /// `face` - records carry index lists.
    Face,
    /// Anything else - records are consumed and discarded.
    Generic,
}

impl ElementKind {
    fn from_name(name: &str) -> Self {
        match name {
            "vertex" => Self::Vertex,
            "face" => Self::Face,
            _ => Self::Generic,
        }
    }
}

/// One `element` declaration: name, record count, ordered properties.
#[derive(Debug, Clone)]
pub struct ElementSchema {
    /// Declared element name.
    pub name: String,
    /// Declared record count.
    pub count: usize,
    /// Decode strategy.
    pub kind: ElementKind,
    /// Properties in declared order. Every one of these is visited for
    /// every record, recognized or not.
    pub properties: Vec<PropertyDescriptor>,
}

impl ElementSchema {
    /// Whether any property maps to the given channel.
    #[must_use]
    pub fn has_channel(&self, channel: Channel) -> bool {
        self.properties.iter().any(|p| p.channel == channel)
    }
}

/// A parsed PLY header: encoding plus ordered element schemas.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Data region encoding.
    pub encoding: PlyEncoding,
    /// Elements in declared (and therefore data) order.
    pub elements: Vec<ElementSchema>,
}

impl Schema {
    /// Parse the header from a cursor positioned at the start of the file.
    ///
    /// On return the cursor sits just past the `end_header` token; the
    /// caller must invoke [`Cursor::skip_to_data`] before decoding
    /// elements.
    ///
    /// # Errors
    ///
    /// [`PlyError::InvalidMagic`] or [`PlyError::InvalidFormat`] if the
    /// preamble does not match, [`PlyError::UnsupportedStorage`] for
    /// undecodable property types, and parse/EOF errors for malformed
    /// counts or truncated headers.
    pub fn parse(cursor: &mut Cursor<'_>) -> PlyResult<Self> {
        if cursor.next_token()? != "ply" {
            return Err(PlyError::InvalidMagic);
        }

        let keyword = cursor.next_token()?;
        let encoding_name = cursor.next_token()?;
        let version = cursor.next_token()?;
        if keyword != "format" || version != "1.0" {
            return Err(PlyError::InvalidFormat {
                found: format!("{keyword} {encoding_name} {version}"),
            });
        }
        let Some(encoding) = PlyEncoding::from_token(encoding_name) else {
            return Err(PlyError::InvalidFormat {
                found: format!("{keyword} {encoding_name} {version}"),
            });
        };

        let mut elements = Vec::new();
        let mut token = cursor.next_token()?;
        while token != "end_header" {
            if token == "element" {
                let name = cursor.next_token()?.to_string();
                let count: usize = cursor.next_token()?.parse()?;
                let mut properties = Vec::new();

                token = cursor.next_token()?;
                while token == "property" {
                    let storage_name = cursor.next_token()?;
                    let storage = Storage::from_name(storage_name).ok_or_else(|| {
                        PlyError::UnsupportedStorage {
                            name: storage_name.to_string(),
                        }
                    })?;
                    if storage == Storage::List {
                        // The list's count type and element type are
                        // declared here but never needed: lengths are
                        // read as one byte and values as 4-byte words.
                        cursor.next_token()?;
                        cursor.next_token()?;
                    }
                    let property_name = cursor.next_token()?;
                    properties.push(PropertyDescriptor {
                        channel: Channel::from_name(property_name),
                        storage,
                    });
                    token = cursor.next_token()?;
                }

                elements.push(ElementSchema {
                    kind: ElementKind::from_name(&name),
                    name,
                    count,
                    properties,
                });
            } else {
                // comment lines and unknown keywords are skipped token-wise
                token = cursor.next_token()?;
            }
        }

        Ok(Self { encoding, elements })
    }

    /// Check that the schema can produce a usable mesh.
    ///
    /// # Errors
    ///
    /// [`PlyError::MissingVertexElement`] or
    /// [`PlyError::MissingFaceElement`] when the corresponding element
    /// kind was never declared.
    pub fn validate(&self) -> PlyResult<()> {
        if !self.elements.iter().any(|e| e.kind == ElementKind::Vertex) {
            return Err(PlyError::MissingVertexElement);
        }
        if !self.elements.iter().any(|e| e.kind == ElementKind::Face) {
            return Err(PlyError::MissingFaceElement);
        }
        Ok(())
    }

    /// The vertex element whose records populate the mesh. When several
    /// vertex elements are declared, the last one wins; all still decode
    /// in order.
    #[must_use]
    pub fn vertex_element(&self) -> Option<&ElementSchema> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.kind == ElementKind::Vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(header: &str) -> PlyResult<Schema> {
        let mut cursor = Cursor::new(header.as_bytes());
        Schema::parse(&mut cursor)
    }

    #[test]
    fn minimal_header() {
        let schema = parse(
            "ply\nformat ascii 1.0\n\
             element vertex 3\nproperty float x\nproperty float y\nproperty float z\n\
             element face 1\nproperty list uchar int vertex_indices\n\
             end_header\n",
        );
        let Ok(schema) = schema else {
            panic!("header should parse");
        };
        assert_eq!(schema.encoding, PlyEncoding::Ascii);
        assert_eq!(schema.elements.len(), 2);
        assert_eq!(schema.elements[0].kind, ElementKind::Vertex);
        assert_eq!(schema.elements[0].count, 3);
        assert_eq!(schema.elements[0].properties.len(), 3);
        assert_eq!(schema.elements[1].kind, ElementKind::Face);
        assert_eq!(
            schema.elements[1].properties[0],
            PropertyDescriptor {
                channel: Channel::FaceIndices,
                storage: Storage::List,
            }
        );
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn binary_encodings() {
        let le = parse(
            "ply\nformat binary_little_endian 1.0\nelement vertex 0\nelement face 0\nend_header\n",
        );
        let be = parse(
            "ply\nformat binary_big_endian 1.0\nelement vertex 0\nelement face 0\nend_header\n",
        );
        assert!(matches!(le.map(|s| s.encoding), Ok(PlyEncoding::BinaryLittleEndian)));
        assert!(matches!(be.map(|s| s.encoding), Ok(PlyEncoding::BinaryBigEndian)));
    }

    #[test]
    fn bad_magic() {
        assert!(matches!(
            parse("obj\nformat ascii 1.0\nend_header\n"),
            Err(PlyError::InvalidMagic)
        ));
    }

    #[test]
    fn bad_format_line() {
        assert!(matches!(
            parse("ply\nformat ascii 2.0\nend_header\n"),
            Err(PlyError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse("ply\nformat utf8 1.0\nend_header\n"),
            Err(PlyError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn comments_are_skipped() {
        let schema = parse(
            "ply\nformat ascii 1.0\ncomment made by hand\n\
             element vertex 1\nproperty float x\n\
             comment mid-header note\n\
             element face 1\nproperty list uchar int vertex_indices\n\
             end_header\n",
        );
        assert!(schema.is_ok_and(|s| s.elements.len() == 2));
    }

    #[test]
    fn unknown_property_name_is_tracked() {
        let schema = parse(
            "ply\nformat ascii 1.0\n\
             element vertex 1\nproperty float x\nproperty float confidence\n\
             element face 0\nproperty list uchar int vertex_indices\n\
             end_header\n",
        );
        let Ok(schema) = schema else {
            panic!("header should parse");
        };
        // Unknown channel, but still in the schema for cursor tracking
        assert_eq!(schema.elements[0].properties[1].channel, Channel::Unknown);
        assert_eq!(schema.elements[0].properties[1].storage, Storage::Float32);
    }

    #[test]
    fn unsupported_storage_is_rejected() {
        let result = parse(
            "ply\nformat ascii 1.0\n\
             element vertex 1\nproperty double x\n\
             end_header\n",
        );
        assert!(matches!(
            result,
            Err(PlyError::UnsupportedStorage { name }) if name == "double"
        ));
    }

    #[test]
    fn integer_widths_collapse_to_int32() {
        let schema = parse(
            "ply\nformat ascii 1.0\n\
             element vertex 1\nproperty uint16 flags\nproperty int8 tag\n\
             element face 0\nproperty list uchar int vertex_indices\n\
             end_header\n",
        );
        let Ok(schema) = schema else {
            panic!("header should parse");
        };
        assert!(schema.elements[0]
            .properties
            .iter()
            .all(|p| p.storage == Storage::Int32));
    }

    #[test]
    fn validate_requires_vertex_and_face() {
        let no_face = parse(
            "ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\nend_header\n",
        );
        assert!(matches!(
            no_face.and_then(|s| s.validate()),
            Err(PlyError::MissingFaceElement)
        ));

        let no_vertex = parse(
            "ply\nformat ascii 1.0\nelement face 1\nproperty list uchar int vertex_indices\nend_header\n",
        );
        assert!(matches!(
            no_vertex.and_then(|s| s.validate()),
            Err(PlyError::MissingVertexElement)
        ));
    }

    #[test]
    fn generic_elements_keep_their_schema() {
        let schema = parse(
            "ply\nformat ascii 1.0\n\
             element vertex 1\nproperty float x\n\
             element camera 1\nproperty float focal\nproperty float skew\n\
             element face 1\nproperty list uchar int vertex_indices\n\
             end_header\n",
        );
        let Ok(schema) = schema else {
            panic!("header should parse");
        };
        assert_eq!(schema.elements[1].kind, ElementKind::Generic);
        assert_eq!(schema.elements[1].properties.len(), 2);
    }

    #[test]
    fn channel_lookup_table() {
        assert_eq!(Channel::from_name("x"), Channel::PositionX);
        assert_eq!(Channel::from_name("v"), Channel::TexV);
        assert_eq!(Channel::from_name("g"), Channel::ColorG);
        assert_eq!(Channel::from_name("green"), Channel::ColorG);
        assert_eq!(Channel::from_name("nz"), Channel::NormalZ);
        assert_eq!(Channel::from_name("intensity"), Channel::Intensity);
        assert_eq!(Channel::from_name("vertex_indices"), Channel::FaceIndices);
        assert_eq!(Channel::from_name("q"), Channel::Unknown);
        assert_eq!(Channel::from_name("quality"), Channel::Unknown);
    }

    #[test]
    fn last_vertex_element_wins() {
        let schema = parse(
            "ply\nformat ascii 1.0\n\
             element vertex 1\nproperty float x\n\
             element vertex 2\nproperty float x\nproperty float nx\n\
             element face 0\nproperty list uchar int vertex_indices\n\
             end_header\n",
        );
        let Ok(schema) = schema else {
            panic!("header should parse");
        };
        let vertex = schema.vertex_element();
        assert!(vertex.is_some_and(|e| e.count == 2 && e.has_channel(Channel::NormalX)));
    }
}
