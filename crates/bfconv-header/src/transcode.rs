//! Wii to PS2 header transcoding.

use bfconv_common::BinaryReader;
use log::debug;

use crate::header::{SourceHeader, TargetHeader};
use crate::{Error, Result};

/// Parse and validate the Wii header at the start of `source`.
pub fn parse_source_header(source: &[u8]) -> Result<SourceHeader> {
    if source.len() < SourceHeader::SIZE {
        return Err(Error::TooSmall {
            needed: SourceHeader::SIZE,
            actual: source.len(),
        });
    }

    let mut reader = BinaryReader::new(source);
    let header: SourceHeader = reader.read_struct()?;

    if &header.magic != SourceHeader::MAGIC {
        return Err(Error::InvalidMagic(header.magic));
    }

    Ok(header)
}

/// Produce the PS2 header for a Wii BF container.
///
/// Only the first [`SourceHeader::SIZE`] bytes of `source` are inspected. The
/// source version is validated as part of the header but never carried
/// over: the PS2 header always carries [`TargetHeader::VERSION`].
pub fn transcode_header(source: &[u8]) -> Result<TargetHeader> {
    let header = parse_source_header(source)?;
    debug!(
        "Wii header version {:#06x} -> PS2 version {:#06x}",
        header.version(),
        TargetHeader::VERSION
    );
    Ok(TargetHeader::new())
}
