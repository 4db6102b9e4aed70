//! Whole-file conversion.

use std::fs;
use std::path::Path;

use bfconv_common::search::replace_all;
use bfconv_header::{transcode_header, SourceHeader, TargetHeader};
use bfconv_texture::{NameTagRule, TextureRewriter, TextureRule};
use log::{debug, info};

use crate::Result;

/// Zero run collapsed by padding reduction.
pub const PADDING_RUN: [u8; 4] = [0x00; 4];

/// What each [`PADDING_RUN`] is collapsed to.
pub const PADDING_REPLACEMENT: [u8; 2] = [0x00; 2];

/// Conversion options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Collapse runs of four zero bytes in the body into two.
    ///
    /// This shrinks the body, so any offsets inside it no longer line up
    /// with the source.
    pub reduce_padding: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            reduce_padding: true,
        }
    }
}

/// What a conversion did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConversionSummary {
    /// Size of the Wii input.
    pub input_len: usize,
    /// Size of the PS2 output.
    pub output_len: usize,
    /// Texture blocks rewritten.
    pub textures: usize,
    /// Texture blocks too short for their flag field.
    pub flags_skipped: usize,
    /// Name tags replaced.
    pub name_tags: usize,
    /// Zero runs collapsed.
    pub padding_runs: usize,
}

/// A converted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    /// PS2 header followed by the rewritten body.
    pub data: Vec<u8>,
    /// What was changed.
    pub summary: ConversionSummary,
}

/// Converts Wii BF containers to the PS2 layout.
///
/// A converter holds no per-file state, so one instance can convert any
/// number of files, including from several threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'r> {
    rewriter: TextureRewriter<'r>,
    options: ConvertOptions,
}

impl Converter<'static> {
    /// Converter using the built-in texture tables.
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            rewriter: TextureRewriter::ps2(),
            options,
        }
    }
}

impl Default for Converter<'static> {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

impl<'r> Converter<'r> {
    /// Converter using custom texture tables.
    pub fn with_rules(
        rules: &'r [TextureRule],
        name_tags: &'r [NameTagRule],
        options: ConvertOptions,
    ) -> Result<Self> {
        Ok(Self {
            rewriter: TextureRewriter::with_rules(rules, name_tags)?,
            options,
        })
    }

    /// The options in use.
    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    /// Convert a complete Wii BF file held in memory.
    ///
    /// The header is validated before anything else happens; on error no
    /// output is produced.
    pub fn convert(&self, source: &[u8]) -> Result<Converted> {
        let header = transcode_header(source)?;

        info!("Converting textures: 1080p DDS -> 480p TM2");
        let rewritten = self.rewriter.rewrite(&source[SourceHeader::SIZE..]);

        // Runs after texture rewriting so flag offsets are measured on the
        // unshrunk body.
        let (body, padding_runs) = if self.options.reduce_padding {
            reduce_padding(&rewritten.data)
        } else {
            (rewritten.data, 0)
        };
        if padding_runs > 0 {
            debug!("collapsed {} zero runs", padding_runs);
        }

        let mut data = Vec::with_capacity(TargetHeader::SIZE + body.len());
        data.extend_from_slice(&header.to_bytes());
        data.extend_from_slice(&body);

        let summary = ConversionSummary {
            input_len: source.len(),
            output_len: data.len(),
            textures: rewritten.stats.textures,
            flags_skipped: rewritten.stats.flags_skipped,
            name_tags: rewritten.stats.name_tags,
            padding_runs,
        };

        Ok(Converted { data, summary })
    }

    /// Convert `input` and write the result to `output`.
    ///
    /// `output` is only created once the whole conversion has succeeded.
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConversionSummary> {
        let input = input.as_ref();
        let output = output.as_ref();

        let source = fs::read(input)?;
        let converted = self.convert(&source)?;
        fs::write(output, &converted.data)?;

        info!(
            "Successfully converted {} to {}",
            input.display(),
            output.display()
        );

        Ok(converted.summary)
    }
}

/// Collapse every non-overlapping run of four zero bytes into two.
///
/// Returns the new body and the number of runs collapsed.
pub fn reduce_padding(body: &[u8]) -> (Vec<u8>, usize) {
    replace_all(body, &PADDING_RUN, &PADDING_REPLACEMENT)
}

/// Convert a Wii BF file held in memory.
pub fn convert(source: &[u8], options: &ConvertOptions) -> Result<Vec<u8>> {
    Converter::new(*options).convert(source).map(|c| c.data)
}

/// Convert the Wii BF file at `input` and write it to `output`.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<ConversionSummary> {
    Converter::new(*options).convert_file(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const KEEP_PADDING: ConvertOptions = ConvertOptions {
        reduce_padding: false,
    };

    #[test]
    fn test_convert_small_file() {
        let output = convert(b"BF01\x02\x00DDS_TEXTURE", &ConvertOptions::default()).unwrap();
        assert_eq!(&output[..12], b"BF02\x00\x01\x00\x00\x00\x00\x00\x00");
        assert_eq!(&output[12..], b"TM2_PS2TEX");
    }

    #[test]
    fn test_header_only() {
        let output = convert(b"BF01\x00\x01", &ConvertOptions::default()).unwrap();
        assert_eq!(output, b"BF02\x00\x01\x00\x00\x00\x00\x00\x00");
    }

    #[test]
    fn test_flags_relative_to_body() {
        // Body starts at byte 6, so the flags land at 6 + 122 in the source
        // and 12 + 122 in the output.
        let mut source = b"BF01\x02\x00DDS".to_vec();
        source.resize(6 + 200, 0xEE);

        let output = convert(&source, &KEEP_PADDING).unwrap();
        assert_eq!(output.len(), 12 + 200);
        assert_eq!(&output[12..15], b"TM2");
        assert_eq!(&output[134..136], &[0x01, 0x01]);
    }

    #[test]
    fn test_padding_reduced_after_rewrite() {
        let mut source = b"BF01\x02\x00DDS".to_vec();
        source.resize(6 + 128, 0);

        let converted = Converter::default().convert(&source).unwrap();
        let body = &converted.data[12..];

        // Flags were written before the zeros were collapsed, so they
        // survive intact.
        assert_eq!(&body[..3], b"TM2");
        assert!(body.windows(2).any(|w| w == [0x01, 0x01]));
        assert!(body.len() < 128);
        assert!(converted.summary.padding_runs > 0);
        assert_eq!(converted.summary.output_len, converted.data.len());
    }

    #[test]
    fn test_padding_reduction_toggle() {
        let source = b"BF01\x02\x00\x00\x00\x00\x00\x00\x00\x00\x00".to_vec();

        let reduced = convert(&source, &ConvertOptions::default()).unwrap();
        assert_eq!(&reduced[12..], &[0u8; 4]);

        let kept = convert(&source, &KEEP_PADDING).unwrap();
        assert_eq!(&kept[12..], &[0u8; 8]);
    }

    #[test]
    fn test_reduce_padding() {
        let (body, runs) = reduce_padding(b"A\x00\x00\x00\x00\x00B");
        assert_eq!(body, b"A\x00\x00\x00B");
        assert_eq!(runs, 1);
    }

    #[test]
    fn test_summary_counts() {
        let converted = Converter::new(KEEP_PADDING)
            .convert(b"BF01\x02\x00DDS_TEXTURE1DDS_TEXTURE2")
            .unwrap();

        assert_eq!(converted.summary.textures, 2);
        assert_eq!(converted.summary.flags_skipped, 2);
        assert_eq!(converted.summary.name_tags, 2);
        assert_eq!(converted.summary.padding_runs, 0);
        assert_eq!(converted.summary.input_len, 30);
        assert_eq!(converted.summary.output_len, 12 + 22);
    }

    #[test]
    fn test_header_errors_abort() {
        assert!(matches!(
            convert(b"BF0", &ConvertOptions::default()),
            Err(Error::Header(bfconv_header::Error::TooSmall { .. }))
        ));
        assert!(matches!(
            convert(b"WII!\x02\x00DDS", &ConvertOptions::default()),
            Err(Error::Header(bfconv_header::Error::InvalidMagic(_)))
        ));
    }

    #[test]
    fn test_custom_rules_rejected() {
        const BAD: &[TextureRule] = &[TextureRule {
            target: b"TIM2",
            ..bfconv_texture::rules::DDS_TO_TM2
        }];
        assert!(matches!(
            Converter::with_rules(BAD, &[], ConvertOptions::default()),
            Err(Error::Texture(_))
        ));
    }
}
