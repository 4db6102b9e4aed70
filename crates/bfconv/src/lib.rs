//! bfconv - Wii to PS2 BF asset container conversion.
//!
//! This crate ties the bfconv library crates together and adds the pieces
//! that sit around the core transcoding:
//!
//! - [`Converter`] - Header transcoding, texture rewriting and padding
//!   reduction in one pass
//! - [`analyze`] - Header inspection and platform detection
//! - [`verify`] - PS2 hardware limit checks on converted output
//!
//! # Crates
//!
//! - [`bfconv_common`] - Binary reading and byte pattern search
//! - [`bfconv_header`] - `BF01` to `BF02` header transcoding
//! - [`bfconv_texture`] - DDS to TM2 texture block rewriting
//!
//! # Example
//!
//! ```no_run
//! use bfconv::prelude::*;
//!
//! let summary = convert_file("level.bf", "level_ps2.bf", &ConvertOptions::default())?;
//! println!("{} textures converted", summary.textures);
//!
//! let report = verify_file("level_ps2.bf", &VerifyConfig::default())?;
//! assert!(report.passed());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod pipeline;

pub mod analyze;
pub mod verify;

pub use error::{Error, Result};
pub use pipeline::{
    convert, convert_file, reduce_padding, ConversionSummary, ConvertOptions, Converted,
    Converter, PADDING_REPLACEMENT, PADDING_RUN,
};

// Re-export all sub-crates
pub use bfconv_common as common;
pub use bfconv_header as header;
pub use bfconv_texture as texture;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analyze::{analyze_file, analyze_header, HeaderReport, Platform};
    pub use crate::verify::{
        verify_bytes, verify_file, Issue, Ps2Limits, VerifyConfig, VerifyReport,
    };
    pub use crate::{convert, convert_file, ConversionSummary, ConvertOptions, Converter};
    pub use bfconv_header::{transcode_header, SourceHeader, TargetHeader};
    pub use bfconv_texture::{rewrite_textures, TextureRewriter, TextureRule};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
