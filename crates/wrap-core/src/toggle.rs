//! Toggle-wrap engine.
//!
//! Given a selection and a [`TagPair`], decide whether to add the markers around the selection
//! or to strip the markers that already flank it, and describe the result as a single
//! replacement.
//!
//! # Algorithm
//!
//! - `before` is the text of length `len(start)` immediately preceding the selection.
//! - `after` is the text of length `len(end)` immediately following the selection.
//! - If `before == start` and `after == end`, the flanking markers are removed (unwrap).
//! - Otherwise the selection is replaced by `start + selected + end` (wrap).
//!
//! Boundary windows that fall outside the document read as `""`. That only ever matches an
//! empty marker, so a window cut off by the document edge drives the engine to wrap. A pair
//! with both markers empty produces no edit at all.
//!
//! # Example
//!
//! ```rust
//! use wrap_core::{Selection, TagPair, TextBuffer, apply_toggle_wrap};
//!
//! let mut doc = TextBuffer::new("hello world");
//! let bold = TagPair::new("<b>", "</b>");
//!
//! let edit = apply_toggle_wrap(&mut doc, Selection::new(6, 11), &bold).unwrap();
//! assert_eq!(doc.text(), "hello <b>world</b>");
//!
//! // Re-select the inner text and toggle again to unwrap.
//! apply_toggle_wrap(&mut doc, Selection::from(edit.inner.clone()), &bold);
//! assert_eq!(doc.text(), "hello world");
//! ```

use crate::document::DocumentAccess;
use crate::selection::Selection;
use std::ops::Range;
use wrap_tags::TagPair;

/// Which branch of the toggle was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    /// Markers were inserted around the selection.
    Wrap,
    /// Markers flanking the selection were removed.
    Unwrap,
}

/// A single replacement produced by the engine, in char offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleEdit {
    /// Branch taken.
    pub kind: ToggleKind,
    /// Start of the replaced range in the pre-edit document.
    pub start: usize,
    /// Exclusive end of the replaced range in the pre-edit document.
    pub end: usize,
    /// Text inserted in place of `start..end`.
    pub replacement: String,
    /// Where the originally selected text sits in the post-edit document.
    pub inner: Range<usize>,
}

impl ToggleEdit {
    /// Length of the replaced range in characters.
    pub fn replaced_len(&self) -> usize {
        self.end - self.start
    }

    /// Length of `replacement` in characters.
    pub fn replacement_len(&self) -> usize {
        self.replacement.chars().count()
    }

    /// Apply this edit to `doc`.
    pub fn apply<D: DocumentAccess + ?Sized>(&self, doc: &mut D) {
        doc.replace_range(self.start, self.end, &self.replacement);
    }
}

/// Compute the toggle for `selection` without modifying `doc`.
///
/// Returns `None` only when both markers are empty. A selection reaching past the document end
/// is clamped first.
pub fn toggle_wrap<D: DocumentAccess + ?Sized>(
    doc: &D,
    selection: Selection,
    tags: &TagPair,
) -> Option<ToggleEdit> {
    if tags.is_empty() {
        tracing::trace!("both markers empty, nothing to toggle");
        return None;
    }

    let Range { start: from, end: to } = selection.clamp_to(doc.char_count()).range();
    let start_len = tags.start_len();
    let end_len = tags.end_len();

    let selected = doc.text_range_or_empty(from, to);
    let selected_len = to - from;

    let before = from
        .checked_sub(start_len)
        .map(|before_start| doc.text_range_or_empty(before_start, from))
        .unwrap_or_default();
    let after = to
        .checked_add(end_len)
        .map(|after_end| doc.text_range_or_empty(to, after_end))
        .unwrap_or_default();

    let edit = if before == tags.start && after == tags.end {
        let start = from - start_len;
        ToggleEdit {
            kind: ToggleKind::Unwrap,
            start,
            end: to + end_len,
            replacement: selected,
            inner: start..start + selected_len,
        }
    } else {
        let mut replacement =
            String::with_capacity(tags.start.len() + selected.len() + tags.end.len());
        replacement.push_str(&tags.start);
        replacement.push_str(&selected);
        replacement.push_str(&tags.end);
        ToggleEdit {
            kind: ToggleKind::Wrap,
            start: from,
            end: to,
            replacement,
            inner: from + start_len..from + start_len + selected_len,
        }
    };

    tracing::debug!(
        kind = ?edit.kind,
        start = edit.start,
        end = edit.end,
        start_len,
        end_len,
        "toggle wrap"
    );
    Some(edit)
}

/// Compute the toggle for `selection` and apply it to `doc`.
///
/// Returns the applied edit, or `None` when both markers are empty and the document was left
/// untouched.
pub fn apply_toggle_wrap<D: DocumentAccess + ?Sized>(
    doc: &mut D,
    selection: Selection,
    tags: &TagPair,
) -> Option<ToggleEdit> {
    let edit = toggle_wrap(&*doc, selection, tags)?;
    edit.apply(doc);
    Some(edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_edit_shape() {
        let doc = String::from("hello world");
        let edit = toggle_wrap(&doc, Selection::new(6, 11), &TagPair::new("<b>", "</b>")).unwrap();
        assert_eq!(edit.kind, ToggleKind::Wrap);
        assert_eq!((edit.start, edit.end), (6, 11));
        assert_eq!(edit.replacement, "<b>world</b>");
        assert_eq!(edit.inner, 9..14);
    }

    #[test]
    fn test_unwrap_edit_shape() {
        let doc = String::from("hello <b>world</b>");
        let edit = toggle_wrap(&doc, Selection::new(9, 14), &TagPair::new("<b>", "</b>")).unwrap();
        assert_eq!(edit.kind, ToggleKind::Unwrap);
        assert_eq!((edit.start, edit.end), (6, 18));
        assert_eq!(edit.replacement, "world");
        assert_eq!(edit.inner, 6..11);
        assert_eq!(edit.replaced_len(), 12);
        assert_eq!(edit.replacement_len(), 5);
    }

    #[test]
    fn test_empty_pair_is_noop() {
        let doc = String::from("abc");
        assert_eq!(toggle_wrap(&doc, Selection::new(0, 3), &TagPair::default()), None);
    }

    #[test]
    fn test_only_start_marker() {
        // An empty end marker always "matches" the empty after-window.
        let mut doc = String::from("> quote");
        let tags = TagPair::new("> ", "");
        let edit = apply_toggle_wrap(&mut doc, Selection::new(2, 7), &tags).unwrap();
        assert_eq!(edit.kind, ToggleKind::Unwrap);
        assert_eq!(doc, "quote");
    }

    #[test]
    fn test_selection_past_end_is_clamped() {
        let mut doc = String::from("abc");
        let edit = apply_toggle_wrap(&mut doc, Selection::new(1, 50), &TagPair::symmetric("*"));
        assert_eq!(edit.map(|e| e.kind), Some(ToggleKind::Wrap));
        assert_eq!(doc, "a*bc*");
    }
}
