#![warn(missing_docs)]
//! `wrap-tags` - data-only tag pair definitions for `wrap-core`.
//!
//! This crate intentionally stays lightweight and has no dependencies. It provides the small
//! structs that hosts and the settings layer share: the marker pair itself, a configured
//! wrapper (pair + stable id + display name), and the built-in default set.

/// A start/end marker pair, e.g. `<b>` / `</b>`.
///
/// Either side may be empty. A pair with both sides empty never produces an edit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TagPair {
    /// Marker inserted before the selection.
    pub start: String,
    /// Marker inserted after the selection.
    pub end: String,
}

impl TagPair {
    /// Create a pair from a start and end marker.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Create a pair that uses the same marker on both sides (e.g. `**`).
    pub fn symmetric(marker: impl Into<String>) -> Self {
        let marker = marker.into();
        Self {
            start: marker.clone(),
            end: marker,
        }
    }

    /// Returns `true` if both markers are empty.
    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    /// Length of the start marker in characters.
    pub fn start_len(&self) -> usize {
        self.start.chars().count()
    }

    /// Length of the end marker in characters.
    pub fn end_len(&self) -> usize {
        self.end.chars().count()
    }
}

/// A configured wrapper: a tag pair plus the identity used to derive its command.
///
/// `id` is assigned once and kept across renames and reorders so that command bindings
/// derived from it stay valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperTag {
    /// Stable identifier.
    pub id: String,
    /// Human-readable name (e.g. `Bold`).
    pub name: String,
    /// Markers applied by this wrapper.
    pub tags: TagPair,
}

impl WrapperTag {
    /// Create a configured wrapper.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: TagPair::new(start, end),
        }
    }
}

/// The wrappers available when nothing has been configured: Underline, Bold, Italic.
pub fn default_wrapper_tags() -> Vec<WrapperTag> {
    vec![
        WrapperTag::new("underline", "Underline", "<u>", "</u>"),
        WrapperTag::new("bold", "Bold", "<b>", "</b>"),
        WrapperTag::new("italic", "Italic", "<i>", "</i>"),
    ]
}
