//! UTF-16 code-unit helpers.
//!
//! Columns throughout the engine index code units, so a character outside the
//! basic plane occupies two columns and movement must treat the pair as one
//! unit. These helpers operate on either a `&str` (encoded on the fly) or a
//! pre-encoded `&[u16]` slice when the caller walks a line repeatedly.

/// True for the first code unit of a surrogate pair.
pub fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

/// True for the second code unit of a surrogate pair.
pub fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Encode line content into its code-unit sequence.
pub fn encode(content: &str) -> Vec<u16> {
    content.encode_utf16().collect()
}

/// Number of UTF-16 code units in `content`.
pub fn unit_len(content: &str) -> usize {
    content.encode_utf16().count()
}

/// 1-based column of the first non-whitespace code unit, or `None` when the
/// line is empty or all whitespace. Whitespace is space and tab only.
pub fn first_non_whitespace_column(content: &str) -> Option<u32> {
    for (i, unit) in content.encode_utf16().enumerate() {
        if unit != b' ' as u16 && unit != b'\t' as u16 {
            return Some(i as u32 + 1);
        }
    }
    None
}
