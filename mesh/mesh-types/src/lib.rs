//! Core mesh types for ProjTex.
//!
//! This crate provides the foundational types for mesh loading and
//! projection texturing:
//!
//! - [`Vertex`] - A dense, GPU-layout vertex record (position, uv, color, normal)
//! - [`TriangleMesh`] - A triangle mesh with indexed vertices
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Precision
//!
//! All coordinates are `f32`: mesh files store 32-bit scalars and the
//! depth pipeline consumes 32-bit rasters, so nothing here benefits from
//! double precision.
//!
//! # Example
//!
//! ```
//! use mesh_types::{TriangleMesh, Vertex};
//!
//! let mut mesh = TriangleMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod vertex;

pub use bounds::Aabb;
pub use mesh::TriangleMesh;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector2, Vector3, Vector4};
