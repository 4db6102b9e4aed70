//! Common utilities for bfconv.
//!
//! This crate provides the foundational pieces shared by the other bfconv crates:
//!
//! - [`BinaryReader`] - Zero-copy reading from byte slices, in either byte order
//! - [`search`] - memchr-backed pattern finding and whole-buffer substitution

mod error;
mod reader;

pub mod search;

pub use error::{Error, Result};
pub use reader::BinaryReader;
