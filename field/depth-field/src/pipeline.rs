//! One-shot depth-field artifact generation.
//!
//! Mirrors the offline texturing workflow: a projection descriptor names
//! a destination texture and a model; the model is depth-rendered under
//! the descriptor's projection, and the depth buffer is distilled into a
//! blend-weight mask sized to the destination texture. Three grayscale
//! artifacts are written next to the descriptor so each stage can be
//! inspected.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::ImageCodec;
use crate::edges::edge_strength;
use crate::error::FieldResult;
use crate::grow::{grow_edge_field, to_blend_weights};
use crate::normalize::normalize_depth;
use crate::projection::ProjectionDescriptor;
use crate::raster::ScalarRaster;
use crate::render::{DepthRasterizer, RenderTransforms};

/// Parameters for depth-field generation.
///
/// # Example
///
/// ```
/// use depth_field::DepthFieldParams;
///
/// let params = DepthFieldParams::default();
/// assert_eq!(params.render_width, 1024);
/// assert_eq!(params.growth_passes(), 40); // 1024 / 25
/// ```
#[derive(Debug, Clone)]
pub struct DepthFieldParams {
    /// Depth render target width in pixels.
    pub render_width: usize,
    /// Depth render target height in pixels.
    pub render_height: usize,
    /// Multiplier applied to raw depth differences before clamping.
    pub edge_magnification: f32,
    /// The field grows for `render_width / spread_divisor` passes; the
    /// default divisor spreads edges over 4% of the image width.
    pub spread_divisor: usize,
}

impl Default for DepthFieldParams {
    fn default() -> Self {
        Self {
            render_width: 1024,
            render_height: 1024,
            edge_magnification: 3.0,
            spread_divisor: 25,
        }
    }
}

impl DepthFieldParams {
    /// Number of growth passes for these parameters (at least one).
    #[must_use]
    pub fn growth_passes(&self) -> usize {
        (self.render_width / self.spread_divisor).max(1)
    }
}

/// Paths of the three artifacts written for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthFieldArtifacts {
    /// Normalized depth map image.
    pub depth_map: PathBuf,
    /// Pre-growth edge map image.
    pub edge_map: PathBuf,
    /// Final grown, inverted, resampled blend-weight image.
    pub blend_map: PathBuf,
}

/// Generate the depth-field artifacts for a projection descriptor.
///
/// One-shot and synchronous: parses the descriptor, decodes the
/// destination texture for its resolution, loads the model, renders its
/// depth through `rasterizer`, then normalizes, edge-detects, and grows
/// the result. Three 8-bit grayscale images land next to the descriptor:
///
/// - `<descriptor>.depth.png` — normalized depth
/// - `<descriptor>.depthdiff.png` — edge strength
/// - `<descriptor>.edgedist.png` — blend weights, resampled to the
///   destination texture's resolution
///
/// # Errors
///
/// Any descriptor, mesh, render, or codec failure; all recoverable.
pub fn generate_depth_field(
    descriptor_path: &Path,
    rasterizer: &mut dyn DepthRasterizer,
    codec: &dyn ImageCodec,
    params: &DepthFieldParams,
) -> FieldResult<DepthFieldArtifacts> {
    let descriptor = ProjectionDescriptor::from_file(descriptor_path)?;
    info!(
        descriptor = %descriptor_path.display(),
        texture = %descriptor.texture_path.display(),
        model = %descriptor.model_path.display(),
        "generating depth field"
    );

    // The texture contributes only the destination resolution.
    let texture = codec.decode_rgba(&descriptor.texture_path)?;
    let destination = (texture.width, texture.height);
    drop(texture);

    let model = mesh_ply::load_ply(&descriptor.model_path)?;

    let transforms = RenderTransforms::with_projection(descriptor.matrix);
    rasterizer.render_depth(
        &model.mesh,
        &transforms,
        params.render_width,
        params.render_height,
    )?;
    let raw = rasterizer.read_depth()?;
    debug!(
        width = raw.width(),
        height = raw.height(),
        "depth readback complete"
    );

    let depth = normalize_depth(&raw);
    let depth_map = artifact_path(descriptor_path, "depth");
    write_gray(codec, &depth_map, &depth, encode_depth, None)?;

    let edges = edge_strength(&depth, params.edge_magnification);
    let edge_map = artifact_path(descriptor_path, "depthdiff");
    write_gray(codec, &edge_map, &edges, encode_unit, None)?;

    let grown = grow_edge_field(&edges, params.growth_passes());
    let weights = to_blend_weights(&grown);
    let blend_map = artifact_path(descriptor_path, "edgedist");
    write_gray(codec, &blend_map, &weights, encode_unit, Some(destination))?;

    info!(
        depth_map = %depth_map.display(),
        edge_map = %edge_map.display(),
        blend_map = %blend_map.display(),
        "depth field artifacts written"
    );

    Ok(DepthFieldArtifacts {
        depth_map,
        edge_map,
        blend_map,
    })
}

/// `<descriptor>.<kind>.png`, keeping the descriptor's own extension.
fn artifact_path(descriptor: &Path, kind: &str) -> PathBuf {
    let mut name = descriptor.as_os_str().to_os_string();
    name.push(format!(".{kind}.png"));
    PathBuf::from(name)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Casts: values are clamped into u8 range before conversion
fn encode_depth(value: f32) -> u8 {
    // background (2.0) maps near black, near surfaces map bright
    255 - (value * 127.0) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Casts: values are in [0, 1] before scaling
fn encode_unit(value: f32) -> u8 {
    (value * 255.0) as u8
}

/// Expand a raster to R=G=B triples and hand it to the codec.
fn write_gray(
    codec: &dyn ImageCodec,
    path: &Path,
    raster: &ScalarRaster,
    encode: fn(f32) -> u8,
    resize_to: Option<(usize, usize)>,
) -> FieldResult<()> {
    let mut pixels = Vec::with_capacity(raster.len() * 3);
    for &value in raster.as_slice() {
        let gray = encode(value);
        pixels.extend_from_slice(&[gray, gray, gray]);
    }
    codec.encode_rgb(path, raster.width(), raster.height(), &pixels, resize_to)
}
