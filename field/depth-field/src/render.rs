//! Depth rasterizer capability.

use mesh_types::TriangleMesh;
use nalgebra::Matrix4;

use crate::error::FieldResult;
use crate::raster::ScalarRaster;

/// Object, view, and projection transforms for a depth render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTransforms {
    /// Model-to-world transform.
    pub object: Matrix4<f32>,
    /// World-to-eye transform.
    pub view: Matrix4<f32>,
    /// Eye-to-clip projection.
    pub projection: Matrix4<f32>,
}

impl RenderTransforms {
    /// Identity object and view with the given projection: the setup for
    /// a projection descriptor whose matrix already encodes the full
    /// camera.
    #[must_use]
    pub fn with_projection(projection: Matrix4<f32>) -> Self {
        Self {
            object: Matrix4::identity(),
            view: Matrix4::identity(),
            projection,
        }
    }
}

impl Default for RenderTransforms {
    fn default() -> Self {
        Self::with_projection(Matrix4::identity())
    }
}

/// Capability for rendering a mesh into a depth target and reading the
/// result back.
///
/// This crate never touches a GPU itself; the pipeline receives an
/// implementation of this trait from the caller. Implementations must
/// complete (flush) the render before returning from [`read_depth`]:
/// reading an in-flight render yields undefined values, and nothing in
/// this core can detect that.
///
/// The raw depth raster uses the infinite-far-plane convention:
/// background pixels read exactly 1.0.
///
/// [`read_depth`]: DepthRasterizer::read_depth
pub trait DepthRasterizer {
    /// Render the mesh into a `width` x `height` depth target with the
    /// given transforms.
    ///
    /// # Errors
    ///
    /// Implementation-defined render failures.
    fn render_depth(
        &mut self,
        mesh: &TriangleMesh,
        transforms: &RenderTransforms,
        width: usize,
        height: usize,
    ) -> FieldResult<()>;

    /// Synchronously read back the raw per-pixel depth of the last
    /// render.
    ///
    /// # Errors
    ///
    /// Implementation-defined readback failures.
    fn read_depth(&mut self) -> FieldResult<ScalarRaster>;
}
