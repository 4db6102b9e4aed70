//! BF header structures.

use zerocopy::byteorder::{big_endian, little_endian};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Wii BF header (big-endian).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned,
)]
#[repr(C)]
pub struct SourceHeader {
    /// File magic (should be `BF01`).
    pub magic: [u8; 4],
    /// Container version. Parsed but not carried into the PS2 header.
    pub version: big_endian::U16,
}

impl SourceHeader {
    /// Expected magic bytes.
    pub const MAGIC: &'static [u8; 4] = b"BF01";

    /// Header size in bytes.
    pub const SIZE: usize = 6;

    /// Container version as a native integer.
    pub fn version(&self) -> u16 {
        self.version.get()
    }
}

/// PS2 BF header (little-endian).
///
/// Every field holds a fixed value, so the header is identical for every
/// converted file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned,
)]
#[repr(C)]
pub struct TargetHeader {
    magic: [u8; 4],
    version: little_endian::U16,
    flags: little_endian::U16,
    offset_placeholder: little_endian::U32,
}

impl TargetHeader {
    /// PS2 magic bytes.
    pub const MAGIC: &'static [u8; 4] = b"BF02";

    /// Version written to every PS2 header.
    pub const VERSION: u16 = 0x0100;

    /// Header flags.
    pub const FLAGS: u16 = 0x0000;

    /// Header size in bytes.
    pub const SIZE: usize = 12;

    /// Build the PS2 header.
    pub fn new() -> Self {
        Self {
            magic: *Self::MAGIC,
            version: little_endian::U16::new(Self::VERSION),
            flags: little_endian::U16::new(Self::FLAGS),
            offset_placeholder: little_endian::U32::new(0),
        }
    }

    /// File magic.
    pub fn magic(&self) -> [u8; 4] {
        self.magic
    }

    /// Header version.
    pub fn version(&self) -> u16 {
        self.version.get()
    }

    /// Header flags.
    pub fn flags(&self) -> u16 {
        self.flags.get()
    }

    /// Offset placeholder, always zero.
    pub fn offset_placeholder(&self) -> u32 {
        self.offset_placeholder.get()
    }

    /// Serialize the header to its on-disk bytes.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes.copy_from_slice(self.as_bytes());
        bytes
    }
}

impl Default for TargetHeader {
    fn default() -> Self {
        Self::new()
    }
}

const _: () = assert!(std::mem::size_of::<SourceHeader>() == SourceHeader::SIZE);
const _: () = assert!(std::mem::size_of::<TargetHeader>() == TargetHeader::SIZE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_header_layout() {
        let header = TargetHeader::new();
        let bytes = header.to_bytes();

        assert_eq!(&bytes[0..4], b"BF02");
        // 0x0100 little-endian
        assert_eq!(&bytes[4..6], &[0x00, 0x01]);
        assert_eq!(&bytes[6..8], &[0x00, 0x00]);
        assert_eq!(&bytes[8..12], &[0x00; 4]);
    }

    #[test]
    fn test_target_header_accessors() {
        let header = TargetHeader::default();
        assert_eq!(header.magic(), *b"BF02");
        assert_eq!(header.version(), 0x0100);
        assert_eq!(header.flags(), 0);
        assert_eq!(header.offset_placeholder(), 0);
    }

    #[test]
    fn test_source_header_is_big_endian() {
        let header = SourceHeader::read_from_bytes(b"BF01\x02\x00").unwrap();
        assert_eq!(&header.magic, b"BF01");
        assert_eq!(header.version(), 0x0200);
    }
}
