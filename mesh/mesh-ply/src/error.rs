//! Error types for PLY loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for PLY loading operations.
pub type PlyResult<T> = Result<T, PlyError>;

/// Errors that can occur while loading a PLY file.
///
/// All variants are recoverable: a structural failure leaves no partial
/// mesh behind, and callers decide whether to skip the model or abort.
#[derive(Debug, Error)]
pub enum PlyError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The file does not start with the "ply" magic token.
    #[error("not a PLY file: missing \"ply\" magic")]
    InvalidMagic,

    /// The format line is not `format <ascii|binary_little_endian|binary_big_endian> 1.0`.
    #[error("unsupported PLY format line: {found}")]
    InvalidFormat {
        /// The offending format line content.
        found: String,
    },

    /// The header declared no vertex element.
    #[error("no vertex element declared in header")]
    MissingVertexElement,

    /// The header declared no face element.
    #[error("no face element declared in header")]
    MissingFaceElement,

    /// A property was declared with a storage type this loader cannot
    /// decode. Unknown-width fields cannot be skipped soundly in binary
    /// data, so this is rejected at header parse time.
    #[error("unsupported property storage type: {name}")]
    UnsupportedStorage {
        /// The declared storage type name.
        name: String,
    },

    /// The data region ended before the declared records were read.
    #[error("unexpected end of data at byte {position}")]
    UnexpectedEof {
        /// Byte offset where the read was attempted.
        position: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A header or ASCII token was not valid UTF-8.
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Float parsing error in ASCII data.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// Integer parsing error in header counts or ASCII data.
    #[error("integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}
