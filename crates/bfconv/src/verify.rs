//! PS2 compatibility checks for converted files.
//!
//! These checks look only at file size and the first [`SCAN_WINDOW`] bytes.
//! Geometry, audio and texture dimensions are recorded in [`Ps2Limits`] but
//! not inspected.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use bfconv_common::search::contains_pattern;

use crate::Result;

/// Largest file the PS2 build will load.
pub const MAX_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Bytes scanned from the start of the file.
pub const SCAN_WINDOW: usize = 1024;

/// Absolute file offset checked for texture flags.
///
/// This does not line up with where the converter writes flags (122 bytes
/// past each texture signature), and the expected value differs from the
/// `01 01` it writes. Both ends are kept as they are until the format owner
/// settles which is right.
pub const VERIFIER_FLAG_OFFSET: usize = 128;

/// Flag bytes expected at [`VERIFIER_FLAG_OFFSET`].
pub const VERIFIER_EXPECTED_FLAGS: [u8; 2] = [0x00, 0x01];

/// PS2 hardware limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ps2Limits {
    /// Maximum file size in bytes.
    pub max_size: u64,
    /// Maximum texels per texture.
    pub texture_max: u64,
    /// Maximum audio channels.
    pub audio_channels: u8,
    /// Maximum polygons per frame.
    pub polygon_limit: u32,
}

impl Default for Ps2Limits {
    fn default() -> Self {
        Self {
            max_size: MAX_FILE_SIZE,
            texture_max: 512 * 512,
            audio_channels: 2,
            polygon_limit: 50_000,
        }
    }
}

/// Verifier settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Hardware limits.
    pub limits: Ps2Limits,
    /// Bytes scanned from the start of the file.
    pub scan_window: usize,
    /// Absolute offset of the flag bytes.
    pub flag_offset: usize,
    /// Expected flag bytes.
    pub expected_flags: [u8; 2],
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            limits: Ps2Limits::default(),
            scan_window: SCAN_WINDOW,
            flag_offset: VERIFIER_FLAG_OFFSET,
            expected_flags: VERIFIER_EXPECTED_FLAGS,
        }
    }
}

/// A compatibility problem.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Issue {
    /// File is over the size limit.
    ExceedsMaxSize { size: u64, limit: u64 },
    /// Wii texture signatures are still present.
    UnconvertedTextures,
    /// Texture flags are not where the PS2 build expects them.
    MissingTextureFlags {
        offset: usize,
        expected: [u8; 2],
        found: Option<[u8; 2]>,
    },
    /// TM2 textures without the PS2 name tag.
    IncompleteTextureConversion,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::ExceedsMaxSize { size, limit } => write!(
                f,
                "Exceeds {}MB filesize limit ({:.2}MB)",
                limit / (1024 * 1024),
                *size as f64 / 1024.0 / 1024.0
            ),
            Issue::UnconvertedTextures => write!(f, "Contains unconverted Wii textures (DDS)"),
            Issue::MissingTextureFlags {
                offset,
                expected,
                found,
            } => {
                write!(f, "Missing PS2 texture flags: expected {:02x?} at {}", expected, offset)?;
                match found {
                    Some(found) => write!(f, ", found {:02x?}", found),
                    None => write!(f, ", file too short"),
                }
            }
            Issue::IncompleteTextureConversion => write!(f, "Incomplete texture conversion"),
        }
    }
}

/// Outcome of verifying one file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VerifyReport {
    /// File size in bytes.
    pub size: u64,
    /// Problems found, in check order.
    pub issues: Vec<Issue>,
}

impl VerifyReport {
    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Verify a converted file held in memory.
pub fn verify_bytes(data: &[u8], config: &VerifyConfig) -> VerifyReport {
    let window = &data[..data.len().min(config.scan_window)];
    check(data.len() as u64, window, config)
}

/// Verify the converted file at `path`.
///
/// Only the first [`VerifyConfig::scan_window`] bytes are read.
pub fn verify_file<P: AsRef<Path>>(path: P, config: &VerifyConfig) -> Result<VerifyReport> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();

    let mut window = Vec::with_capacity(config.scan_window);
    file.take(config.scan_window as u64).read_to_end(&mut window)?;

    Ok(check(size, &window, config))
}

fn check(size: u64, window: &[u8], config: &VerifyConfig) -> VerifyReport {
    let mut issues = Vec::new();

    if size > config.limits.max_size {
        issues.push(Issue::ExceedsMaxSize {
            size,
            limit: config.limits.max_size,
        });
    }

    if contains_pattern(b"DDS", window) {
        issues.push(Issue::UnconvertedTextures);
    } else if contains_pattern(b"TM2", window) {
        let found = config
            .flag_offset
            .checked_add(2)
            .and_then(|end| window.get(config.flag_offset..end))
            .map(|f| [f[0], f[1]]);
        if found != Some(config.expected_flags) {
            issues.push(Issue::MissingTextureFlags {
                offset: config.flag_offset,
                expected: config.expected_flags,
                found,
            });
        }
        if !contains_pattern(b"PS2TEX", window) {
            issues.push(Issue::IncompleteTextureConversion);
        }
    }

    VerifyReport { size, issues }
}
