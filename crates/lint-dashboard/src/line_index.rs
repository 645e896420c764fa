//! Rope-backed line index.
//!
//! Converts between `(line, column)` positions and character offsets for view text and for the
//! rendered dashboard. Columns count Unicode scalar values (`char`), not bytes.

use ropey::{Rope, RopeSlice};

/// Whether `c` ends a line in a [`LineIndex`].
///
/// Matches ropey's Unicode line breaks: LF, VT, FF, CR, NEL, LS and PS (CRLF counts as one).
pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Length of `line` in chars, without its line terminator.
fn content_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len == 0 || !is_line_break(line.char(len - 1)) {
        return len;
    }
    if len >= 2 && line.char(len - 1) == '\n' && line.char(len - 2) == '\r' {
        len - 2
    } else {
        len - 1
    }
}

/// Logical line index over a text buffer.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build an index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Replace the whole text.
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Number of lines. An empty text, or one ending in `\n`, still has a final empty line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Line and column of a character offset (offset clamped to the text end).
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);

        (line_idx, char_offset - line_start_char)
    }

    /// Character offset of a line and column.
    ///
    /// Lines past the end map to the text end; columns past the end of a line map to the end of
    /// that line (before its terminator, `\r\n` included).
    pub fn position_to_char_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        let line_start_char = self.rope.line_to_char(line);
        line_start_char + column.min(content_len(self.rope.line(line)))
    }

    /// Complete text.
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }

    /// Text of a line, without its line terminator.
    pub fn get_line_text(&self, line_number: usize) -> Option<String> {
        if line_number >= self.rope.len_lines() {
            return None;
        }

        let line = self.rope.line(line_number);
        Some(line.slice(..content_len(line)).to_string())
    }
}
