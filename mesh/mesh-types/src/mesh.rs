//! Indexed triangle mesh.

use crate::{Aabb, Vertex};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vertices are accumulated in runs of this size when averaging, so that
/// the partial sums stay small relative to f32 precision.
const CENTROID_BLOCK: usize = 1024;

/// An indexed triangle mesh.
///
/// Stores vertices and faces separately, with faces referencing vertices
/// by index. The mesh owns its data exclusively; consumers (e.g. a depth
/// rasterizer) borrow it read-only.
///
/// # Example
///
/// ```
/// use mesh_types::{TriangleMesh, Vertex};
///
/// let mut mesh = TriangleMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangle faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// A mesh with no vertices or no faces cannot be rendered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Compute the axis-aligned bounding box over all vertices in one pass.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Translate every vertex position by the given vector.
    pub fn translate(&mut self, offset: Vector3<f32>) {
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }

    /// Compute the vertex centroid with block-averaged accumulation.
    ///
    /// Positions are summed in runs of 1024; each completed run is averaged
    /// and the run averages are combined, the final partial run weighted by
    /// its fill fraction. This bounds floating-point drift on large vertex
    /// counts compared to a single running sum.
    ///
    /// Returns the origin for an empty mesh.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    // Precision loss: run counts are small and fractions are in [0, 1]
    pub fn centroid(&self) -> Point3<f32> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }

        let mut total = Vector3::zeros();
        let mut run = Vector3::zeros();
        let mut samples = 0.0f32;
        for (i, vertex) in self.vertices.iter().enumerate() {
            run += vertex.position.coords;
            if (i + 1) % CENTROID_BLOCK == 0 {
                total += run / CENTROID_BLOCK as f32;
                samples += 1.0;
                run = Vector3::zeros();
            }
        }
        total += run / CENTROID_BLOCK as f32;
        samples += (self.vertices.len() % CENTROID_BLOCK) as f32 / CENTROID_BLOCK as f32;

        Point3::from(total / samples)
    }

    /// Drop trailing vertices that no face references.
    ///
    /// The vertex list is truncated to `max(referenced index) + 1`;
    /// remaining indices are left untouched, so no reindexing occurs.
    /// Scan files pad the vertex element with points that never make it
    /// into a face, and those must not skew the centroid.
    pub fn trim_unreferenced(&mut self) {
        let highest = self
            .faces
            .iter()
            .flat_map(|face| face.iter().copied())
            .max()
            .unwrap_or(0);
        self.vertices.truncate(highest as usize + 1);
    }

    /// Synthesize smooth per-vertex normals from face geometry.
    ///
    /// All normals are zeroed, then each face accumulates the raw cross
    /// product of two edge vectors into its three vertices. The cross
    /// product's magnitude is proportional to the triangle's area, so
    /// larger faces weigh more in the final normalized result.
    pub fn compute_smooth_normals(&mut self) {
        for vertex in &mut self.vertices {
            vertex.normal = Vector3::zeros();
        }

        for &[i0, i1, i2] in &self.faces {
            let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
            if i0 >= self.vertices.len() || i1 >= self.vertices.len() || i2 >= self.vertices.len()
            {
                continue;
            }
            let p0 = self.vertices[i0].position;
            let p1 = self.vertices[i1].position;
            let p2 = self.vertices[i2].position;
            let face_normal = (p0 - p1).cross(&(p0 - p2));

            self.vertices[i0].normal += face_normal;
            self.vertices[i1].normal += face_normal;
            self.vertices[i2].normal += face_normal;
        }

        for vertex in &mut self.vertices {
            let len = vertex.normal.norm();
            if len > f32::EPSILON {
                vertex.normal /= len;
            }
        }
    }
}
