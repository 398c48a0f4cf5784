use std::path::PathBuf;

use tower_lsp::lsp_types::Url;

use crate::{
    ide::navigation::{IdePosition, IdeRange},
    text_pos::{char_index_from_utf16, utf16_from_char_index},
};

// ── Document ────────────────────────────────────────────────────────────────

/// Snapshot of a single Verse source document.
///
/// Handed out as `Arc<Document>` by the intelligence layer; an exploration
/// never mutates a document it has opened.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document URI.
    pub uri: Url,
    /// Full source text.
    pub text: String,
    /// Document version as reported by the client (0 for files read from disk).
    pub version: i32,
    /// Pre-computed line start byte offsets.
    line_offsets: Vec<usize>,
}

impl Document {
    pub fn new(
        uri: Url,
        text: String,
        version: i32,
    ) -> Self {
        let line_offsets = Self::compute_line_offsets(&text);
        Self {
            uri,
            text,
            version,
            line_offsets,
        }
    }

    /// Filesystem path of the document, falling back to the raw URI path for
    /// non-`file://` schemes.
    pub fn path(&self) -> PathBuf {
        self.uri.to_file_path().unwrap_or_else(|_| PathBuf::from(self.uri.path()))
    }

    // ── queries ─────────────────────────────────────────────────────────

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Return the full text of a given 0-based line (without the trailing newline).
    pub fn line_text(
        &self,
        line: usize,
    ) -> Option<&str> {
        let start = *self.line_offsets.get(line)?;
        let end = self.line_offsets.get(line + 1).copied().unwrap_or(self.text.len());
        let slice = &self.text[start..end];
        Some(slice.trim_end_matches('\n').trim_end_matches('\r'))
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        (0..self.line_count()).filter_map(|line| self.line_text(line))
    }

    /// Extract the identifier surrounding the given position.
    ///
    /// A caret sitting just past the last character of a word still selects
    /// that word. Returns `(word, range)`; the range never spans lines.
    pub fn word_at(
        &self,
        pos: IdePosition,
    ) -> Option<(String, IdeRange)> {
        let line_text = self.line_text(pos.line as usize)?;
        let chars: Vec<char> = line_text.chars().collect();
        if chars.is_empty() {
            return None;
        }

        let mut char_idx = char_index_from_utf16(line_text, pos.character);
        if char_idx >= chars.len() || !is_word_char(chars[char_idx]) {
            if char_idx > 0 && char_idx <= chars.len() && is_word_char(chars[char_idx - 1]) {
                char_idx -= 1;
            } else {
                return None;
            }
        }

        let mut start = char_idx;
        while start > 0 && is_word_char(chars[start - 1]) {
            start -= 1;
        }

        let mut end = char_idx + 1;
        while end < chars.len() && is_word_char(chars[end]) {
            end += 1;
        }

        let word: String = chars[start..end].iter().collect();
        let range = IdeRange::new(
            IdePosition::new(pos.line, utf16_from_char_index(line_text, start)),
            IdePosition::new(pos.line, utf16_from_char_index(line_text, end)),
        );
        Some((word, range))
    }

    // ── mutations ───────────────────────────────────────────────────────

    /// Replace the full content and bump version.
    pub fn set_content(
        &mut self,
        text: String,
        version: i32,
    ) {
        self.text = text;
        self.version = version;
        self.line_offsets = Self::compute_line_offsets(&self.text);
    }

    // ── internal helpers ────────────────────────────────────────────────

    fn compute_line_offsets(text: &str) -> Vec<usize> {
        let mut offsets = vec![0usize];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(i + 1);
            }
        }
        offsets
    }
}

// ── helpers ─────────────────────────────────────────────────────────────────

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
#[path = "../../tests/src/document/text_document_tests.rs"]
mod tests;
