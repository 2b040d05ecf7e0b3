//! Rope-backed text buffer.
//!
//! Provides O(log N) char-offset slicing and replacement plus line/column conversion, which is
//! everything the toggle engine and a simple host need.

use crate::document::{DocumentAccess, Position, is_line_break};
use ropey::Rope;

/// Text buffer implemented on top of [`ropey::Rope`].
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create a buffer from text.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self { rope: Rope::new() }
    }

    /// Get the entire document content.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of logical lines (a trailing `\n` starts a new, empty line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a logical line without its line break.
    pub fn line(&self, line_number: usize) -> Option<String> {
        if line_number >= self.rope.len_lines() {
            return None;
        }
        let len = self.line_len_without_break(line_number);
        Some(self.rope.line(line_number).slice(..len).to_string())
    }

    /// Insert text at a char offset (clamped to the document end).
    pub fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
    }

    /// Delete `length` chars starting at `start` (clamped to the document).
    pub fn delete(&mut self, start: usize, length: usize) {
        let len = self.rope.len_chars();
        let start = start.min(len);
        let end = start.saturating_add(length).min(len);
        self.rope.remove(start..end);
    }

    fn line_len_without_break(&self, line_number: usize) -> usize {
        let line = self.rope.line(line_number);
        let mut len = line.len_chars();
        if len > 0 && is_line_break(line.char(len - 1)) {
            let last = line.char(len - 1);
            len -= 1;
            if last == '\n' && len > 0 && line.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl DocumentAccess for TextBuffer {
    fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    fn text_range(&self, start: usize, end: usize) -> Option<String> {
        if start > end || end > self.rope.len_chars() {
            return None;
        }
        Some(self.rope.slice(start..end).to_string())
    }

    fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        let len = self.rope.len_chars();
        let end = end.min(len);
        let start = start.min(end);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        let column = offset - self.rope.line_to_char(line);
        Position::new(line, column)
    }

    fn position_to_offset(&self, position: Position) -> usize {
        let last_line = self.rope.len_lines().saturating_sub(1);
        let line = position.line.min(last_line);
        let column = position.column.min(self.line_len_without_break(line));
        self.rope.line_to_char(line) + column
    }
}
