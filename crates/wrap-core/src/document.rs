//! Document accessor abstraction.
//!
//! The toggle engine never owns the text it edits. Hosts hand it anything implementing
//! [`DocumentAccess`]: a rope-backed [`crate::TextBuffer`], a plain `String`, or an adapter over
//! the host editor's own buffer.
//!
//! All offsets are **character offsets** (Unicode scalar values), matching [`crate::ToggleEdit`].

use std::cmp::Ordering;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Read/replace access to a linear document.
pub trait DocumentAccess {
    /// Total number of characters in the document.
    fn char_count(&self) -> usize;

    /// Text in the half-open char range `start..end`.
    ///
    /// Returns `None` when the range is reversed or extends past the document end.
    fn text_range(&self, start: usize, end: usize) -> Option<String>;

    /// Replace the half-open char range `start..end` with `text`.
    ///
    /// The range is clamped to the document; later content shifts by the length difference.
    fn replace_range(&mut self, start: usize, end: usize, text: &str);

    /// Convert a char offset to a line/column position (clamped to the document end).
    fn offset_to_position(&self, offset: usize) -> Position;

    /// Convert a line/column position to a char offset (clamped to the line and document).
    fn position_to_offset(&self, position: Position) -> usize;

    /// Like [`DocumentAccess::text_range`], but an unresolvable range reads as `""`.
    fn text_range_or_empty(&self, start: usize, end: usize) -> String {
        self.text_range(start, end).unwrap_or_default()
    }
}

fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

impl DocumentAccess for String {
    fn char_count(&self) -> usize {
        self.chars().count()
    }

    fn text_range(&self, start: usize, end: usize) -> Option<String> {
        if start > end || end > self.char_count() {
            return None;
        }
        Some(self.chars().skip(start).take(end - start).collect())
    }

    fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        let len = self.char_count();
        let end = end.min(len);
        let start = start.min(end);
        let start_byte = byte_offset(self, start);
        let end_byte = byte_offset(self, end);
        String::replace_range(self, start_byte..end_byte, text);
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.char_count());
        let spans = line_spans(self);
        let line = spans
            .iter()
            .rposition(|&(start, _)| start <= offset)
            .unwrap_or(0);
        Position::new(line, offset - spans[line].0)
    }

    fn position_to_offset(&self, position: Position) -> usize {
        let spans = line_spans(self);
        let (start, content_len) = spans[position.line.min(spans.len() - 1)];
        start + position.column.min(content_len)
    }
}

/// Returns `true` for the characters that end a line: LF, VT, FF, CR, NEL, LS and PS.
///
/// `\r\n` counts as a single break. This is the same set `ropey` splits lines on.
pub(crate) fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// `(start, content_len)` in chars for every logical line, never empty.
fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if is_line_break(ch) {
            let content_len = offset - start;
            offset += 1;
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
                offset += 1;
            }
            spans.push((start, content_len));
            start = offset;
        } else {
            offset += 1;
        }
    }
    spans.push((start, offset - start));
    spans
}
