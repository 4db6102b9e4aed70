//! Texture rewrite tables.
//!
//! Each texture family is a [`TextureRule`] entry in [`TEXTURE_RULES`]. A
//! new family is a new entry here, not new logic in the rewriter.

/// Maximum texture dimensions accepted by the target hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxDimensions {
    /// Maximum width in texels.
    pub width: u32,
    /// Maximum height in texels.
    pub height: u32,
}

impl MaxDimensions {
    /// Largest texel count a texture may have.
    pub const fn texels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// How one texture family is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRule {
    /// Block signature searched for in the body.
    pub signature: &'static [u8],
    /// Replacement signature. Must be the same length as `signature`.
    pub target: &'static [u8],
    /// Bytes written to the flag field.
    pub flags: [u8; 2],
    /// Offset of the flag field from the start of the signature.
    pub flag_offset: usize,
    /// Dimension limit of the target format.
    pub max_dimensions: MaxDimensions,
}

impl TextureRule {
    /// Flag byte 0: mipmaps enabled.
    pub const MIPMAPS_ENABLED: u8 = 0x01;

    /// Flag byte 1: PS2 texture format.
    pub const PS2_FORMAT: u8 = 0x01;
}

/// Flag field offset within a DDS block.
pub const DDS_FLAG_OFFSET: usize = 122;

/// DDS (Wii) to TM2 (PS2).
pub const DDS_TO_TM2: TextureRule = TextureRule {
    signature: b"DDS",
    target: b"TM2",
    flags: [TextureRule::MIPMAPS_ENABLED, TextureRule::PS2_FORMAT],
    flag_offset: DDS_FLAG_OFFSET,
    max_dimensions: MaxDimensions {
        width: 512,
        height: 512,
    },
};

/// All texture families rewritten during conversion.
pub const TEXTURE_RULES: &[TextureRule] = &[DDS_TO_TM2];

/// A plain byte-string substitution applied to the whole body once block
/// rewriting is finished. Lengths may differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameTagRule {
    /// Tag to replace.
    pub from: &'static [u8],
    /// Replacement tag.
    pub to: &'static [u8],
}

/// `TEXTURE` to `PS2TEX`.
pub const TEXTURE_TO_PS2TEX: NameTagRule = NameTagRule {
    from: b"TEXTURE",
    to: b"PS2TEX",
};

/// All name tags rewritten during conversion.
pub const NAME_TAG_RULES: &[NameTagRule] = &[TEXTURE_TO_PS2TEX];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_are_in_place() {
        for rule in TEXTURE_RULES {
            assert_eq!(rule.signature.len(), rule.target.len());
        }
    }

    #[test]
    fn test_dds_rule() {
        assert_eq!(DDS_TO_TM2.flags, [0x01, 0x01]);
        assert_eq!(DDS_TO_TM2.flag_offset, 122);
        assert_eq!(DDS_TO_TM2.max_dimensions.texels(), 512 * 512);
    }
}
