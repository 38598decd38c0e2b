//! Error types for depth-field generation.

use thiserror::Error;

/// Result type for depth-field operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors that can occur while generating depth-field artifacts.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The projection descriptor ended before all fields were read.
    #[error("projection descriptor ended early: missing {missing}")]
    TruncatedDescriptor {
        /// Which field was missing.
        missing: &'static str,
    },

    /// Raster construction with mismatched dimensions.
    #[error("invalid raster dimensions: {width}x{height} needs {expected} values, got {got}")]
    InvalidDimensions {
        /// Raster width.
        width: usize,
        /// Raster height.
        height: usize,
        /// Required value count.
        expected: usize,
        /// Provided value count.
        got: usize,
    },

    /// The depth rasterizer collaborator failed.
    #[error("depth render failed: {message}")]
    Render {
        /// Description from the rasterizer.
        message: String,
    },

    /// Mesh loading failed.
    #[error(transparent)]
    Ply(#[from] mesh_ply::PlyError),

    /// Image decode/encode failed.
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Float parsing error in the projection descriptor.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl FieldError {
    /// Create a [`FieldError::Render`] with the given message.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}
