//! Error types for BF header handling.

use thiserror::Error;

/// Errors that can occur when reading a BF header.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] bfconv_common::Error),

    /// Input is shorter than the source header.
    #[error("file too small to be a BF container: needed {needed} bytes, got {actual}")]
    TooSmall { needed: usize, actual: usize },

    /// Invalid source magic.
    #[error("invalid Wii BF magic: expected 'BF01', got {0:02x?}")]
    InvalidMagic([u8; 4]),
}

/// Result type for BF header operations.
pub type Result<T> = std::result::Result<T, Error>;
