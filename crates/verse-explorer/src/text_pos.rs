//! Column conversions for a single line of text.
//!
//! Editor positions count UTF-16 code units while the line scanner walks
//! `char`s, so every hop between the two goes through these helpers.

/// Index of the `char` that starts at (or contains) the given UTF-16 column.
///
/// Columns past the end of the line clamp to the line's char count.
pub fn char_index_from_utf16(
    line: &str,
    column: u32,
) -> usize {
    let mut utf16_offset = 0u32;
    for (index, ch) in line.chars().enumerate() {
        if utf16_offset >= column {
            return index;
        }
        utf16_offset += ch.len_utf16() as u32;
    }
    line.chars().count()
}

/// UTF-16 column of the `char` at `char_index`.
pub fn utf16_from_char_index(
    line: &str,
    char_index: usize,
) -> u32 {
    line.chars().take(char_index).map(|ch| ch.len_utf16() as u32).sum()
}

/// UTF-16 column of the first occurrence of `needle` in `line`.
pub fn utf16_column_of(
    line: &str,
    needle: &str,
) -> Option<u32> {
    let byte_offset = line.find(needle)?;
    Some(utf16_column_of_byte_offset(line, byte_offset))
}

pub fn utf16_column_of_byte_offset(
    line: &str,
    byte_offset: usize,
) -> u32 {
    line[..byte_offset.min(line.len())].encode_utf16().count() as u32
}

/// UTF-16 length of a line, used as the end column of a line range.
pub fn utf16_len(line: &str) -> u32 {
    line.encode_utf16().count() as u32
}

#[cfg(test)]
#[path = "../tests/src/text_pos_tests.rs"]
mod tests;
