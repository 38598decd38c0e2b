//! PLY mesh loading for ProjTex.
//!
//! Loads triangle meshes from PLY 1.0 files — ASCII, binary little-endian,
//! and binary big-endian — into a render-ready [`TriangleMesh`]. The file's
//! self-describing header drives the decode: elements and properties are
//! consumed in declared order whether or not this loader uses them, which
//! is what keeps the byte/token cursor honest across arbitrary schemas.
//!
//! Loading also finalizes the mesh the way the projection pipeline expects:
//! unreferenced trailing vertices are trimmed, the mesh is recentered on
//! its centroid, and smooth normals are synthesized when the file carries
//! none.
//!
//! # Example
//!
//! ```no_run
//! use mesh_ply::load_ply;
//!
//! let model = load_ply("scan.ply").unwrap();
//! println!(
//!     "{} vertices, {} faces, extent {:?}",
//!     model.mesh.vertex_count(),
//!     model.mesh.face_count(),
//!     model.scale(),
//! );
//! ```
//!
//! # Errors
//!
//! Every failure is a recoverable [`PlyError`]: a missing file, a bad
//! magic or format line, a schema without vertex or face elements, or
//! truncated/malformed data. No partial mesh is ever returned.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod cursor;
mod decode;
mod error;
mod header;
mod post;

pub use cursor::{ByteOrder, Cursor};
pub use error::{PlyError, PlyResult};
pub use header::{
    Channel, ElementKind, ElementSchema, PlyEncoding, PropertyDescriptor, Schema, Storage,
};

use std::path::Path;

use mesh_types::{Aabb, Point3, TriangleMesh, Vector3};
use tracing::{debug, info};

/// A loaded PLY model: the finalized mesh plus its as-authored bounds.
#[derive(Debug, Clone)]
pub struct PlyModel {
    /// The finalized triangle mesh, recentered on its centroid.
    pub mesh: TriangleMesh,
    /// Bounding box captured after decode, before recentering.
    pub bounds: Aabb,
}

impl PlyModel {
    /// Size of the model's bounding box.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> Vector3<f32> {
        self.bounds.size()
    }

    /// Center of the model's bounding box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f32> {
        self.bounds.center()
    }
}

/// Load a PLY model from a file.
///
/// # Errors
///
/// [`PlyError::FileNotFound`] if the path does not exist, [`PlyError::Io`]
/// for other read failures, and any [`parse_ply`] error for invalid
/// content.
///
/// # Example
///
/// ```no_run
/// use mesh_ply::load_ply;
///
/// let model = load_ply("model.ply").unwrap();
/// assert!(!model.mesh.is_empty());
/// ```
pub fn load_ply<P: AsRef<Path>>(path: P) -> PlyResult<PlyModel> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PlyError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PlyError::Io(e)
        }
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "reading PLY file");
    parse_ply(&bytes)
}

/// Parse a PLY model from in-memory bytes.
///
/// # Errors
///
/// Structural errors ([`PlyError::InvalidMagic`], [`PlyError::InvalidFormat`],
/// [`PlyError::MissingVertexElement`], [`PlyError::MissingFaceElement`],
/// [`PlyError::UnsupportedStorage`]) and data errors
/// ([`PlyError::UnexpectedEof`], parse failures) are all recoverable.
pub fn parse_ply(bytes: &[u8]) -> PlyResult<PlyModel> {
    let mut cursor = Cursor::new(bytes);

    let schema = Schema::parse(&mut cursor)?;
    schema.validate()?;

    // Single resynchronization point between header and data.
    cursor.skip_to_data()?;

    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    for element in &schema.elements {
        match element.kind {
            ElementKind::Vertex => {
                vertices = decode::decode_vertex_element(element, &mut cursor, schema.encoding)?;
            }
            ElementKind::Face => {
                faces = decode::decode_face_element(element, &mut cursor, schema.encoding)?;
            }
            ElementKind::Generic => {
                decode::skip_element(element, &mut cursor, schema.encoding)?;
            }
        }
    }

    let has_normals = schema
        .vertex_element()
        .is_some_and(|e| e.has_channel(Channel::NormalX));

    let mesh = TriangleMesh::from_parts(vertices, faces);
    let (mesh, bounds) = post::finalize(mesh, has_normals);

    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        encoding = ?schema.encoding,
        synthesized_normals = !has_normals,
        "loaded PLY model"
    );

    Ok(PlyModel { mesh, bounds })
}
