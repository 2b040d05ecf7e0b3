#![warn(missing_docs)]
//! Wrap Core - Headless Toggle-Wrap Kernel
//!
//! # Overview
//!
//! `wrap-core` toggles wrapper markup (`<u>…</u>`, `<b>…</b>`, `**…**`) around a selection: it
//! adds the markers when they are absent and strips them when they already flank the selection.
//! It does not render anything and does not own the host's document; hosts plug their buffer in
//! through [`DocumentAccess`] and register the derived commands through [`CommandHost`].
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface (per-wrapper commands)   │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Toggle Engine (wrap / unwrap decision)     │  ← Core logic
//! ├─────────────────────────────────────────────┤
//! │  Document Access (trait + Rope buffer)      │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use wrap_core::{Selection, TagPair, TextBuffer, ToggleKind, apply_toggle_wrap};
//!
//! let mut doc = TextBuffer::new("hello world");
//! let edit = apply_toggle_wrap(&mut doc, Selection::new(6, 11), &TagPair::new("<b>", "</b>"))
//!     .unwrap();
//!
//! assert_eq!(edit.kind, ToggleKind::Wrap);
//! assert_eq!(doc.text(), "hello <b>world</b>");
//! ```
//!
//! # Module Description
//!
//! - [`document`] - Document accessor trait and line/column positions
//! - [`buffer`] - Rope based text buffer
//! - [`toggle`] - Toggle-wrap engine
//! - [`commands`] - Command derivation and the in-process command host
//!
//! # Offsets
//!
//! All offsets and marker lengths are counted in Unicode scalar values (`char`s).

pub mod buffer;
pub mod commands;
pub mod document;
mod selection;
pub mod toggle;

pub use buffer::TextBuffer;
pub use commands::{
    COMMAND_ID_PREFIX, CommandError, CommandHost, MENU_TITLE, MenuEntry, WrapCommand,
    WrapCommandRegistry, command_id, menu_entries, register_commands,
};
pub use document::{DocumentAccess, Position};
pub use selection::{Selection, SelectionDirection};
pub use toggle::{ToggleEdit, ToggleKind, apply_toggle_wrap, toggle_wrap};
pub use wrap_tags::{TagPair, WrapperTag, default_wrapper_tags};
