use crate::document::{DocumentAccess, Position};
use std::ops::Range;

/// Selection range in char offsets.
///
/// `anchor` is where the selection started and `head` is the moving end, so a backward
/// selection has `head < anchor`. [`Selection::range`] always yields the normalized range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Fixed end of the selection.
    pub anchor: usize,
    /// Active end of the selection.
    pub head: usize,
}

/// Selection direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    /// Forward selection (from start to end)
    Forward,
    /// Backward selection (from end to start)
    Backward,
}

impl Selection {
    /// Create a selection from `anchor` to `head`.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// A zero-length selection (caret) at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Build a selection from line/column positions of `doc`.
    pub fn from_positions<D: DocumentAccess + ?Sized>(
        doc: &D,
        anchor: Position,
        head: Position,
    ) -> Self {
        Self::new(doc.position_to_offset(anchor), doc.position_to_offset(head))
    }

    /// Inclusive start of the normalized range.
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Exclusive end of the normalized range.
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Normalized half-open range.
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Returns `true` for a caret.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Number of selected characters.
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Direction of the selection.
    pub fn direction(&self) -> SelectionDirection {
        if self.anchor <= self.head {
            SelectionDirection::Forward
        } else {
            SelectionDirection::Backward
        }
    }

    /// Clamp both ends into `0..=char_count`.
    pub fn clamp_to(&self, char_count: usize) -> Self {
        Self::new(self.anchor.min(char_count), self.head.min(char_count))
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
