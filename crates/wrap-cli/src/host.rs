//! Command-line host session
//!
//! Plays the role of the host editor: loads the settings once, registers one command per
//! configured wrapper, and runs commands against a [`TextBuffer`] built from a file.

use crate::cli::RangeArgs;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use wrap_core::{
    COMMAND_ID_PREFIX, Selection, TagPair, TextBuffer, ToggleEdit, WrapCommandRegistry,
    WrapperTag, command_id,
};
use wrap_settings::{SettingsManager, SettingsStore};

/// Result of running a toggle on a document.
#[derive(Debug)]
pub struct Outcome {
    /// Applied edit, or `None` when the markers were both empty.
    pub edit: Option<ToggleEdit>,
    /// Document text after the edit.
    pub text: String,
}

/// Settings plus the commands derived from them.
pub struct Session<S: SettingsStore> {
    settings: SettingsManager<S>,
    registry: WrapCommandRegistry,
}

impl<S: SettingsStore> Session<S> {
    /// Load settings from `store` and register the derived commands.
    pub fn load(store: S) -> Result<Self> {
        let settings = SettingsManager::load(store).context("failed to load settings")?;
        let registry = WrapCommandRegistry::from_wrapper_tags(settings.wrapper_tags());
        tracing::debug!(commands = registry.len(), "session ready");
        Ok(Self { settings, registry })
    }

    /// Registered commands.
    pub fn registry(&self) -> &WrapCommandRegistry {
        &self.registry
    }

    /// Configured wrappers in display order.
    pub fn wrapper_tags(&self) -> &[WrapperTag] {
        self.settings.wrapper_tags()
    }

    /// Settings, for editing. Call [`Session::reload_commands`] after changes.
    pub fn settings_mut(&mut self) -> &mut SettingsManager<S> {
        &mut self.settings
    }

    /// Re-derive the commands from the current settings.
    pub fn reload_commands(&mut self) {
        self.registry = WrapCommandRegistry::from_wrapper_tags(self.settings.wrapper_tags());
    }

    /// Accept either a full command id or a bare wrapper id.
    pub fn resolve_command(&self, name: &str) -> Result<String> {
        if self.registry.get(name).is_some() {
            return Ok(name.to_string());
        }
        let id = command_id(name);
        if self.registry.get(&id).is_some() {
            return Ok(id);
        }
        let known: Vec<&str> = self
            .registry
            .commands()
            .iter()
            .map(|c| c.id.trim_start_matches(COMMAND_ID_PREFIX))
            .collect();
        bail!("unknown command '{}' (configured: {})", name, known.join(", "))
    }

    /// Run a registered command on `text`.
    pub fn toggle_text(&self, text: &str, command: &str, range: &RangeArgs) -> Result<Outcome> {
        let id = self.resolve_command(command)?;
        let mut doc = TextBuffer::new(text);
        let selection = selection_for(&doc, range);
        let edit = self.registry.execute(&id, &mut doc, selection)?;
        Ok(Outcome {
            edit,
            text: doc.text(),
        })
    }

    /// Toggle an explicit pair on `text`.
    pub fn wrap_text(&self, text: &str, tags: &TagPair, range: &RangeArgs) -> Outcome {
        let mut doc = TextBuffer::new(text);
        let selection = selection_for(&doc, range);
        let edit = self.registry.wrap_with(&mut doc, selection, tags);
        Outcome {
            edit,
            text: doc.text(),
        }
    }
}

fn selection_for(doc: &TextBuffer, range: &RangeArgs) -> Selection {
    let from = range.from.resolve(doc);
    let to = range.to.map_or(from, |to| to.resolve(doc));
    Selection::new(from, to)
}

/// Read a document, transform it, and write it back unless `dry_run` is set.
///
/// With `dry_run` the edited text is returned for printing and the file is left alone.
pub fn edit_file(
    path: &Path,
    dry_run: bool,
    f: impl FnOnce(&str) -> Result<Outcome>,
) -> Result<Outcome> {
    let original =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let outcome = f(&original)?;

    if !dry_run && outcome.edit.is_some() {
        fs::write(path, &outcome.text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("updated {}", path.display());
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Location;
    use tempfile::TempDir;
    use wrap_core::{Position, ToggleKind};
    use wrap_settings::{JsonFileStore, MemoryStore};

    fn range(from: Location, to: Location) -> RangeArgs {
        RangeArgs {
            from,
            to: Some(to),
            dry_run: false,
        }
    }

    #[test]
    fn test_resolve_bare_and_full_ids() {
        let session = Session::load(MemoryStore::new()).unwrap();
        assert_eq!(
            session.resolve_command("bold").unwrap(),
            "wrap-with-shortcut-bold"
        );
        assert_eq!(
            session.resolve_command("wrap-with-shortcut-italic").unwrap(),
            "wrap-with-shortcut-italic"
        );
        let err = session.resolve_command("strike").unwrap_err().to_string();
        assert!(err.contains("underline, bold, italic"), "{err}");
    }

    #[test]
    fn test_toggle_text_by_line_column() {
        let session = Session::load(MemoryStore::new()).unwrap();
        let outcome = session
            .toggle_text(
                "title\nhello world",
                "underline",
                &range(
                    Location::LineColumn(Position::new(1, 6)),
                    Location::LineColumn(Position::new(1, 11)),
                ),
            )
            .unwrap();
        assert_eq!(outcome.text, "title\nhello <u>world</u>");
        assert_eq!(outcome.edit.map(|e| e.kind), Some(ToggleKind::Wrap));
    }

    #[test]
    fn test_wrap_text_empty_pair_is_noop() {
        let session = Session::load(MemoryStore::new()).unwrap();
        let outcome = session.wrap_text(
            "same",
            &TagPair::new("", ""),
            &range(Location::Offset(0), Location::Offset(4)),
        );
        assert!(outcome.edit.is_none());
        assert_eq!(outcome.text, "same");
    }

    #[test]
    fn test_edit_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("note.md");
        fs::write(&file, "hello <b>world</b>").unwrap();

        let session = Session::load(JsonFileStore::new(dir.path().join("data.json"))).unwrap();
        let args = range(Location::Offset(9), Location::Offset(14));

        edit_file(&file, false, |text| session.toggle_text(text, "bold", &args)).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "hello world");

        let dry = edit_file(&file, true, |text| {
            session.toggle_text(text, "bold", &range(Location::Offset(6), Location::Offset(11)))
        })
        .unwrap();
        assert_eq!(dry.text, "hello <b>world</b>");
        assert_eq!(fs::read_to_string(&file).unwrap(), "hello world");
    }

    #[test]
    fn test_reload_after_adding_tag() {
        let mut session = Session::load(MemoryStore::new()).unwrap();
        session
            .settings_mut()
            .add_tag("Highlight", "==", "==")
            .unwrap();
        session.reload_commands();

        assert!(session.registry().get("wrap-with-shortcut-highlight").is_some());
    }
}
