//! Error types for texture rewriting.

use thiserror::Error;

/// Errors raised while building a [`TextureRewriter`](crate::TextureRewriter)
/// from a custom rule table.
///
/// Rewriting itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    /// Signature and replacement tag differ in length.
    #[error("signature {signature:?} is {} bytes but target {target:?} is {} bytes", .signature.len(), .target.len())]
    SignatureLengthMismatch {
        signature: &'static [u8],
        target: &'static [u8],
    },

    /// A rule would match the empty byte string.
    #[error("rewrite rules cannot use an empty pattern")]
    EmptyPattern,
}

/// Result type for texture rule operations.
pub type Result<T> = std::result::Result<T, Error>;
