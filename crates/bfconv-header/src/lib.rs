//! BF container header handling.
//!
//! The Wii build of the game ships BF containers with a 6-byte big-endian
//! header (`BF01` + version). The PS2 build expects a 12-byte little-endian
//! header (`BF02` + version + flags + offset placeholder). This crate parses
//! the former and produces the latter.
//!
//! # Example
//!
//! ```
//! use bfconv_header::transcode_header;
//!
//! let target = transcode_header(b"BF01\x02\x00")?;
//! assert_eq!(target.to_bytes(), *b"BF02\x00\x01\x00\x00\x00\x00\x00\x00");
//! # Ok::<(), bfconv_header::Error>(())
//! ```

mod error;
mod header;
mod transcode;

pub use error::{Error, Result};
pub use header::{SourceHeader, TargetHeader};
pub use transcode::{parse_source_header, transcode_header};
