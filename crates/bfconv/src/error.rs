//! Error types for BF conversion.

use thiserror::Error;

/// Errors that can occur while converting or inspecting BF files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source header could not be transcoded.
    #[error("{0}")]
    Header(#[from] bfconv_header::Error),

    /// Custom texture rule table was rejected.
    #[error("{0}")]
    Texture(#[from] bfconv_texture::Error),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
