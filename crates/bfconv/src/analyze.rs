//! BF header inspection.
//!
//! Tells Wii and PS2 containers apart by their magic and reports the header
//! fields along with a short hex dump, for eyeballing files before and after
//! conversion.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use bfconv_common::BinaryReader;
use bfconv_header::{SourceHeader, TargetHeader};

use crate::Result;

/// Bytes read from the start of a file for analysis.
pub const ANALYZE_LEN: usize = 32;

/// Bytes shown in the hex dump.
pub const HEXDUMP_LEN: usize = 16;

/// Platform a BF container was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum Platform {
    /// Big-endian `BF01` container.
    Wii,
    /// Little-endian `BF02` container.
    Ps2,
    /// Neither magic matched.
    Unknown,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Wii => write!(f, "Wii"),
            Platform::Ps2 => write!(f, "PS2"),
            Platform::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of inspecting a BF header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeaderReport {
    /// Detected platform.
    pub platform: Platform,
    /// First four bytes, if the input had that many.
    pub magic: Option<[u8; 4]>,
    /// Header version in the platform's byte order, if present.
    pub version: Option<u16>,
    /// Hex dump of the first [`HEXDUMP_LEN`] bytes.
    pub hexdump: String,
}

impl HeaderReport {
    /// Whether the platform was recognised.
    pub fn is_known(&self) -> bool {
        self.platform != Platform::Unknown
    }

    /// The magic as text, with non-ASCII bytes escaped.
    pub fn magic_str(&self) -> Option<String> {
        self.magic.map(|magic| magic.escape_ascii().to_string())
    }
}

/// Inspect the header at the start of `data`.
///
/// Only the first [`ANALYZE_LEN`] bytes are looked at. Input too short to
/// hold a magic is reported as [`Platform::Unknown`].
pub fn analyze_header(data: &[u8]) -> HeaderReport {
    let head = &data[..data.len().min(ANALYZE_LEN)];
    let hexdump = head[..head.len().min(HEXDUMP_LEN)]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();

    let mut reader = BinaryReader::new(head);
    let magic = reader.read_magic::<4>().ok();

    let (platform, version) = match &magic {
        Some(m) if m == SourceHeader::MAGIC => (Platform::Wii, reader.read_u16_be().ok()),
        Some(m) if m == TargetHeader::MAGIC => (Platform::Ps2, reader.read_u16().ok()),
        _ => (Platform::Unknown, None),
    };

    HeaderReport {
        platform,
        magic,
        version,
        hexdump,
    }
}

/// Inspect the header of the file at `path`.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<HeaderReport> {
    let mut head = Vec::with_capacity(ANALYZE_LEN);
    File::open(path)?
        .take(ANALYZE_LEN as u64)
        .read_to_end(&mut head)?;
    Ok(analyze_header(&head))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_wii() {
        let report = analyze_header(b"BF01\x02\x00DDS_TEXTURE");
        assert_eq!(report.platform, Platform::Wii);
        assert_eq!(report.version, Some(0x0200));
        assert_eq!(report.magic_str().as_deref(), Some("BF01"));
        assert_eq!(report.hexdump, "4246303102004444535f544558545552");
        assert!(report.is_known());
    }

    #[test]
    fn test_detect_ps2() {
        let report = analyze_header(b"BF02\x00\x01\x00\x00\x00\x00\x00\x00");
        assert_eq!(report.platform, Platform::Ps2);
        assert_eq!(report.version, Some(0x0100));
        assert_eq!(report.platform.to_string(), "PS2");
    }

    #[test]
    fn test_unknown_and_short_input() {
        let report = analyze_header(b"\x89PNG\r\n");
        assert_eq!(report.platform, Platform::Unknown);
        assert_eq!(report.version, None);
        assert_eq!(report.magic_str().as_deref(), Some("\\x89PNG"));
        assert!(!report.is_known());

        let report = analyze_header(b"BF");
        assert_eq!(report.platform, Platform::Unknown);
        assert_eq!(report.magic, None);
        assert_eq!(report.hexdump, "4246");

        // Magic without a version is still recognised.
        let report = analyze_header(b"BF01");
        assert_eq!(report.platform, Platform::Wii);
        assert_eq!(report.version, None);
    }

    #[test]
    fn test_hexdump_is_capped() {
        let report = analyze_header(&[0xAB; 64]);
        assert_eq!(report.hexdump.len(), HEXDUMP_LEN * 2);
    }
}
