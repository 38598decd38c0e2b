//! Depth-based projection blend masks for ProjTex.
//!
//! When several photographs are projected onto one scanned mesh, each
//! projection is reliable in the interior of the surfaces it sees and
//! unreliable near depth discontinuities (silhouettes, self-occlusion).
//! This crate turns a rendered depth buffer into a proximity-weighted
//! blend mask encoding exactly that: low weight near discontinuities,
//! high weight in interior regions.
//!
//! The stages, each a pure function over a [`ScalarRaster`]:
//!
//! 1. [`normalize_depth`] - rescale raw device depth to [0, 1] with a
//!    [`BACKGROUND`] sentinel
//! 2. [`edge_strength`] - per-pixel depth-discontinuity strength
//! 3. [`grow_edge_field`] / [`to_blend_weights`] - propagate edge
//!    strength outward, then invert into weights
//!
//! [`generate_depth_field`] runs the whole pipeline for a projection
//! descriptor file, using two injected capabilities: a
//! [`DepthRasterizer`] (rendering stays outside this crate) and an
//! [`ImageCodec`] (a default backed by the `image` crate is provided as
//! [`FileImageCodec`]).
//!
//! # Example
//!
//! ```no_run
//! use depth_field::{generate_depth_field, DepthFieldParams, FileImageCodec};
//! # struct MyRasterizer;
//! # impl depth_field::DepthRasterizer for MyRasterizer {
//! #     fn render_depth(
//! #         &mut self,
//! #         _: &mesh_types::TriangleMesh,
//! #         _: &depth_field::RenderTransforms,
//! #         _: usize,
//! #         _: usize,
//! #     ) -> depth_field::FieldResult<()> { Ok(()) }
//! #     fn read_depth(&mut self) -> depth_field::FieldResult<depth_field::ScalarRaster> {
//! #         Ok(depth_field::ScalarRaster::new(1, 1))
//! #     }
//! # }
//!
//! let mut rasterizer = MyRasterizer; // wraps the caller's GL/GPU context
//! let artifacts = generate_depth_field(
//!     "shots/front.proj".as_ref(),
//!     &mut rasterizer,
//!     &FileImageCodec,
//!     &DepthFieldParams::default(),
//! )
//! .unwrap();
//! println!("blend mask at {}", artifacts.blend_map.display());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod codec;
mod edges;
mod error;
mod grow;
mod normalize;
mod pipeline;
mod projection;
mod raster;
mod render;

pub use codec::{DecodedImage, FileImageCodec, ImageCodec};
pub use edges::edge_strength;
pub use error::{FieldError, FieldResult};
pub use grow::{grow_edge_field, to_blend_weights};
pub use normalize::normalize_depth;
pub use pipeline::{generate_depth_field, DepthFieldArtifacts, DepthFieldParams};
pub use projection::ProjectionDescriptor;
pub use raster::{ScalarRaster, BACKGROUND};
pub use render::{DepthRasterizer, RenderTransforms};
