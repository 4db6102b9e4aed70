//! Byte pattern search and substitution.
//!
//! Every scan in bfconv runs over the whole buffer, so these helpers lean on
//! memchr's SIMD-accelerated `memmem` searchers rather than naive window
//! comparisons.

use memchr::memmem;

/// Find the first occurrence of a pattern at or after `start`.
///
/// The returned offset is absolute (relative to the start of `haystack`).
#[inline]
pub fn find_pattern_from(needle: &[u8], haystack: &[u8], start: usize) -> Option<usize> {
    let tail = haystack.get(start..)?;
    memmem::find(tail, needle).map(|pos| start + pos)
}

/// Check whether a pattern occurs anywhere in the slice.
#[inline]
pub fn contains_pattern(needle: &[u8], haystack: &[u8]) -> bool {
    memmem::find(haystack, needle).is_some()
}

/// Count non-overlapping occurrences of a pattern.
pub fn count_pattern(needle: &[u8], haystack: &[u8]) -> usize {
    if needle.is_empty() {
        return 0;
    }
    memmem::find_iter(haystack, needle).count()
}

/// Replace every non-overlapping occurrence of `from` with `to`.
///
/// Matches are taken left to right, the same way `str::replace` works. The
/// replacement may be shorter or longer than the pattern. Returns the new
/// buffer along with the number of replacements made. An empty `from` is
/// treated as "no matches".
pub fn replace_all(haystack: &[u8], from: &[u8], to: &[u8]) -> (Vec<u8>, usize) {
    if from.is_empty() {
        return (haystack.to_vec(), 0);
    }

    let mut output = Vec::with_capacity(haystack.len());
    let mut last = 0;
    let mut count = 0;

    for pos in memmem::find_iter(haystack, from) {
        output.extend_from_slice(&haystack[last..pos]);
        output.extend_from_slice(to);
        last = pos + from.len();
        count += 1;
    }
    output.extend_from_slice(&haystack[last..]);

    (output, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern() {
        let data = b"hello world";
        assert!(contains_pattern(b"world", data));
        assert!(!contains_pattern(b"foo", data));
    }

    #[test]
    fn test_find_pattern_from() {
        let data = b"DDS_DDS_";
        assert_eq!(find_pattern_from(b"DDS", data, 0), Some(0));
        assert_eq!(find_pattern_from(b"DDS", data, 1), Some(4));
        assert_eq!(find_pattern_from(b"DDS", data, 5), None);
        assert_eq!(find_pattern_from(b"DDS", data, 100), None);
    }

    #[test]
    fn test_count_pattern_is_non_overlapping() {
        assert_eq!(count_pattern(b"aa", b"aaaa"), 2);
        assert_eq!(count_pattern(b"aa", b"aaa"), 1);
        assert_eq!(count_pattern(b"", b"aaa"), 0);
    }

    #[test]
    fn test_replace_all_shrinks() {
        let (out, count) = replace_all(b"xTEXTUREyTEXTURE", b"TEXTURE", b"PS2TEX");
        assert_eq!(out, b"xPS2TEXyPS2TEX");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_replace_all_zero_runs() {
        // Eight zeros are two runs of four, six zeros are one run plus a tail.
        let (out, count) = replace_all(&[0u8; 8], &[0; 4], &[0; 2]);
        assert_eq!(out, vec![0u8; 4]);
        assert_eq!(count, 2);

        let (out, count) = replace_all(&[0u8; 6], &[0; 4], &[0; 2]);
        assert_eq!(out, vec![0u8; 4]);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_replace_all_without_match() {
        let (out, count) = replace_all(b"nothing here", b"TEXTURE", b"PS2TEX");
        assert_eq!(out, b"nothing here");
        assert_eq!(count, 0);
    }
}
