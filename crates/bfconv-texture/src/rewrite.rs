//! Texture block scanning and patching.

use bfconv_common::search::{find_pattern_from, replace_all};
use log::{debug, trace};

use crate::rules::{NameTagRule, TextureRule, NAME_TAG_RULES, TEXTURE_RULES};
use crate::{Error, Result};

/// Counters collected while rewriting a body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Texture signatures rewritten.
    pub textures: usize,
    /// Flag fields written.
    pub flags_written: usize,
    /// Blocks too short to hold their flag field.
    pub flags_skipped: usize,
    /// Name tags replaced.
    pub name_tags: usize,
}

/// A rewritten body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    /// The rewritten bytes.
    pub data: Vec<u8>,
    /// What was changed.
    pub stats: RewriteStats,
}

/// Rewrites texture blocks according to a rule table.
///
/// The input is never modified; every call returns a fresh buffer, so one
/// rewriter can be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct TextureRewriter<'r> {
    rules: &'r [TextureRule],
    name_tags: &'r [NameTagRule],
}

impl TextureRewriter<'static> {
    /// Rewriter for the built-in Wii to PS2 tables.
    pub const fn ps2() -> Self {
        Self {
            rules: TEXTURE_RULES,
            name_tags: NAME_TAG_RULES,
        }
    }
}

impl Default for TextureRewriter<'static> {
    fn default() -> Self {
        Self::ps2()
    }
}

impl<'r> TextureRewriter<'r> {
    /// Build a rewriter from custom tables.
    ///
    /// Signatures must be rewritten in place, so each rule's target must be
    /// as long as its signature.
    pub fn with_rules(rules: &'r [TextureRule], name_tags: &'r [NameTagRule]) -> Result<Self> {
        for rule in rules {
            if rule.signature.is_empty() {
                return Err(Error::EmptyPattern);
            }
            if rule.signature.len() != rule.target.len() {
                return Err(Error::SignatureLengthMismatch {
                    signature: rule.signature,
                    target: rule.target,
                });
            }
        }
        if name_tags.iter().any(|tag| tag.from.is_empty()) {
            return Err(Error::EmptyPattern);
        }

        Ok(Self { rules, name_tags })
    }

    /// The texture rules in use.
    pub fn rules(&self) -> &'r [TextureRule] {
        self.rules
    }

    /// The name tag rules in use.
    pub fn name_tags(&self) -> &'r [NameTagRule] {
        self.name_tags
    }

    /// Rewrite every texture block in `body`.
    ///
    /// Blocks are located in the input left to right without overlap, then
    /// patched in document order: for each block the signature is replaced
    /// and, if the body is long enough, the flag field is written. A flag
    /// field overlapping a later signature does not hide that block; the
    /// later signature write lands on top of the earlier flags. Once every
    /// block is patched the name tags are substituted over the whole body.
    ///
    /// A body with no texture signature at all is returned unchanged,
    /// name tags included.
    pub fn rewrite(&self, body: &[u8]) -> Rewritten {
        let mut stats = RewriteStats::default();

        let blocks = self.locate_blocks(body);
        if blocks.is_empty() {
            return Rewritten {
                data: body.to_vec(),
                stats,
            };
        }

        let mut data = body.to_vec();

        for (pos, rule) in blocks {
            data[pos..pos + rule.target.len()].copy_from_slice(rule.target);
            stats.textures += 1;

            let flag_pos = pos.saturating_add(rule.flag_offset);
            match data.get_mut(flag_pos..flag_pos.saturating_add(rule.flags.len())) {
                Some(field) => {
                    trace!(
                        "texture at {:#x}: flags {:02x?} -> {:02x?}",
                        pos,
                        field,
                        rule.flags
                    );
                    field.copy_from_slice(&rule.flags);
                    stats.flags_written += 1;
                }
                None => {
                    debug!(
                        "texture at {:#x} too short for flags at {:#x}, skipping flag write",
                        pos, flag_pos
                    );
                    stats.flags_skipped += 1;
                }
            }
        }

        for tag in self.name_tags {
            let (replaced, count) = replace_all(&data, tag.from, tag.to);
            data = replaced;
            stats.name_tags += count;
        }

        debug!(
            "rewrote {} textures ({} flags skipped), {} name tags",
            stats.textures, stats.flags_skipped, stats.name_tags
        );

        Rewritten { data, stats }
    }

    /// Offsets of every texture block in `body`, in document order.
    ///
    /// At each step the earliest match wins, ties going to the rule listed
    /// first, and scanning resumes just past the matched signature.
    fn locate_blocks(&self, body: &[u8]) -> Vec<(usize, &'r TextureRule)> {
        let mut blocks = Vec::new();
        let mut cursor = 0;

        while let Some((pos, rule)) = self
            .rules
            .iter()
            .filter_map(|rule| {
                find_pattern_from(rule.signature, body, cursor).map(|pos| (pos, rule))
            })
            .min_by_key(|(pos, _)| *pos)
        {
            blocks.push((pos, rule));
            cursor = pos + rule.signature.len();
        }

        blocks
    }
}

/// Rewrite a BF body with the built-in Wii to PS2 tables.
pub fn rewrite_textures(body: &[u8]) -> Vec<u8> {
    TextureRewriter::ps2().rewrite(body).data
}
