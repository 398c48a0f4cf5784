//! Line scanning that finds where a type annotation starts and which
//! characters after it may begin a symbol.
//!
//! Offsets are `char` indices into the line.

const OPEN_DELIMITERS: [char; 6] = ['<', '[', '(', '{', '<', '#'];
const CLOSE_DELIMITERS: [char; 6] = ['>', ']', ')', '}', '>', '#'];
const BREAKING: [char; 3] = [',', ';', '#'];
const ANNOTATION: char = ':';

/// Characters that can never start a symbol.
const NON_SYMBOL: [char; 31] = [
    ' ', '(', ')', '[', ']', '{', '}', '<', '>', ',', ';', ':', '#', '=', '+', '-', '*', '/', '%', '&', '|', '^', '~', '!',
    '.', '@', '$', '\'', '"', '`', '\\',
];

/// Offset just past the first top-level `:` at or after `from`.
///
/// Only one delimiter is tracked at a time: while it is open, everything up
/// to its own closing character is opaque, including other delimiter kinds.
/// A breaking character or an unmatched closing delimiter ends the scan.
pub fn find_next_annotation_tail(
    line: &str,
    from: usize,
) -> Option<usize> {
    let mut open: Option<usize> = None;
    for (offset, ch) in line.chars().enumerate().skip(from) {
        match open {
            Some(pair) => {
                if close_index(ch) == Some(pair) {
                    open = None;
                }
            },
            None => {
                if BREAKING.contains(&ch) {
                    return None;
                }
                if ch == ANNOTATION {
                    return Some(offset + 1);
                }
                if let Some(pair) = open_index(ch) {
                    open = Some(pair);
                } else if close_index(ch).is_some() {
                    return None;
                }
            },
        }
    }
    None
}

/// Offsets at or after `from` worth attempting symbol resolution at, in
/// order. Non-symbol characters are skipped; a breaking character ends the
/// sequence.
pub fn symbol_offsets(
    line: &str,
    from: usize,
) -> Vec<usize> {
    let mut offsets = Vec::new();
    for (offset, ch) in line.chars().enumerate().skip(from) {
        if BREAKING.contains(&ch) {
            break;
        }
        if ch.is_whitespace() || NON_SYMBOL.contains(&ch) {
            continue;
        }
        offsets.push(offset);
    }
    offsets
}

/// First offset [`symbol_offsets`] would yield.
pub fn find_next_symbol_offset(
    line: &str,
    from: usize,
) -> Option<usize> {
    symbol_offsets(line, from).first().copied()
}

// The first matching slot wins, so `<` always pairs with index 0.
fn open_index(ch: char) -> Option<usize> {
    OPEN_DELIMITERS.iter().position(|&c| c == ch)
}

fn close_index(ch: char) -> Option<usize> {
    CLOSE_DELIMITERS.iter().position(|&c| c == ch)
}

#[cfg(test)]
#[path = "../../tests/src/explorer/scanner_tests.rs"]
mod tests;
