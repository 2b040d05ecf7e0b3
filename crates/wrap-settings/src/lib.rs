#![warn(missing_docs)]
//! `wrap-settings` - persisted wrapper configuration for `wrap-core`.
//!
//! The configuration is a single JSON object:
//!
//! ```json
//! { "wrapperTags": [ { "id": "bold", "name": "Bold", "startTag": "<b>", "endTag": "</b>" } ] }
//! ```
//!
//! [`SettingsManager::load`] reads it through a [`SettingsStore`], overlays it on the default
//! wrappers, assigns ids to legacy entries, and saves the migrated result before anything
//! derives commands from it.

pub mod config_paths;
mod error;
mod manager;
pub mod store;
pub mod stored;

pub use error::SettingsError;
pub use manager::SettingsManager;
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use stored::{
    Migration, StoredSettings, StoredWrapperTag, WRAPPER_TAGS_KEY, WrapperTagSettings,
    merge_with_defaults, migrate,
};
pub use wrap_tags::{TagPair, WrapperTag, default_wrapper_tags};
