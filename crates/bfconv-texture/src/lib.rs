//! Texture block rewriting for BF containers.
//!
//! Wii BF bodies embed DDS texture blocks. The PS2 build expects the same
//! blocks tagged as TM2, with a 2-byte flag field set at a fixed offset past
//! each block's signature, and the `TEXTURE` name tag shortened to `PS2TEX`.
//!
//! What gets rewritten is driven by the tables in [`rules`]; the scan itself
//! lives in [`TextureRewriter`]. Pixel data is never decoded.
//!
//! # Example
//!
//! ```
//! use bfconv_texture::rewrite_textures;
//!
//! let body = rewrite_textures(b"DDS_TEXTURE1DDS_TEXTURE2");
//! assert_eq!(body, b"TM2_PS2TEX1TM2_PS2TEX2");
//! ```

mod error;
mod rewrite;

pub mod rules;

pub use error::{Error, Result};
pub use rewrite::{rewrite_textures, RewriteStats, Rewritten, TextureRewriter};
pub use rules::{MaxDimensions, NameTagRule, TextureRule, NAME_TAG_RULES, TEXTURE_RULES};
