// this_file: crates/glyphpack-encode/src/width.rs

//! Field width selection
//!
//! Every signed metric in a blob shares one width and every glyph offset
//! shares another, so a decoder picks one read routine per table.

use glyphpack_core::error::{DataError, Result};

/// Widest signed metric field the format can carry
pub const MAX_METRIC_WIDTH: usize = 4;
/// Widest glyph offset field the format can carry
pub const MAX_OFFSET_WIDTH: usize = 3;

/// Smallest byte count holding `value` as two's complement
pub fn signed_width(value: i32) -> usize {
    let value = i64::from(value);
    for width in 1..MAX_METRIC_WIDTH {
        let half = 1i64 << (8 * width - 1);
        if (-half..half).contains(&value) {
            return width;
        }
    }
    MAX_METRIC_WIDTH
}

/// Smallest width holding every value, at least 1
pub fn metric_width(values: impl IntoIterator<Item = i32>) -> usize {
    values.into_iter().map(signed_width).max().unwrap_or(1)
}

/// Smallest byte count holding `value` unsigned, if 3 bytes suffice
pub fn unsigned_width(value: usize) -> Option<usize> {
    (1..=MAX_OFFSET_WIDTH).find(|&width| value < 1usize << (8 * width))
}

/// Width for glyph offsets given the largest one stored
pub fn offset_width(max_offset: usize) -> Result<usize> {
    unsigned_width(max_offset).ok_or_else(|| DataError::OffsetOverflow(max_offset).into())
}
