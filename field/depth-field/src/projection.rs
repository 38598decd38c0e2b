//! Projection descriptor files.

use std::path::{Path, PathBuf};

use nalgebra::Matrix4;

use crate::error::{FieldError, FieldResult};

/// A plain-text projection descriptor.
///
/// The file holds, whitespace-separated: the texture path, the model
/// path, then 16 floats forming a row-major 4x4 projection matrix. The
/// matrix is opaque to this crate and forwarded verbatim to the depth
/// rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionDescriptor {
    /// Path of the texture whose resolution sizes the final blend map.
    pub texture_path: PathBuf,
    /// Path of the PLY model to render.
    pub model_path: PathBuf,
    /// Projection matrix, row-major in the file.
    pub matrix: Matrix4<f32>,
}

impl ProjectionDescriptor {
    /// Parse a descriptor from its text content.
    ///
    /// # Errors
    ///
    /// [`FieldError::TruncatedDescriptor`] when a field is missing,
    /// [`FieldError::ParseFloat`] for malformed matrix values.
    pub fn parse(text: &str) -> FieldResult<Self> {
        let mut tokens = text.split_whitespace();

        let texture_path = tokens.next().ok_or(FieldError::TruncatedDescriptor {
            missing: "texture path",
        })?;
        let model_path = tokens.next().ok_or(FieldError::TruncatedDescriptor {
            missing: "model path",
        })?;

        let mut values = [0.0f32; 16];
        for value in &mut values {
            *value = tokens
                .next()
                .ok_or(FieldError::TruncatedDescriptor {
                    missing: "projection matrix value",
                })?
                .parse()?;
        }

        Ok(Self {
            texture_path: texture_path.into(),
            model_path: model_path.into(),
            matrix: Matrix4::from_row_slice(&values),
        })
    }

    /// Read and parse a descriptor file.
    ///
    /// # Errors
    ///
    /// I/O errors for unreadable files, plus any [`Self::parse`] error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> FieldResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}
