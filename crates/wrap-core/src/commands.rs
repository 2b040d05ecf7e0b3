//! Command Interface Layer
//!
//! Derives host-facing commands from the configured wrappers.
//!
//! # Overview
//!
//! Every configured [`WrapperTag`] becomes one [`WrapCommand`] addressed by
//! `wrap-with-shortcut-<id>` and titled `Toggle <name>`. Hosts receive them through the
//! [`CommandHost`] trait; [`WrapCommandRegistry`] is a ready-made in-process host that also
//! exposes the generic "wrap with this pair" invocation and the context menu entries.
//!
//! # Example
//!
//! ```rust
//! use wrap_core::{Selection, TextBuffer, WrapCommandRegistry, default_wrapper_tags};
//!
//! let registry = WrapCommandRegistry::from_wrapper_tags(&default_wrapper_tags());
//! let mut doc = TextBuffer::new("hello world");
//!
//! registry
//!     .execute("wrap-with-shortcut-bold", &mut doc, Selection::new(6, 11))
//!     .unwrap();
//! assert_eq!(doc.text(), "hello <b>world</b>");
//! ```

use crate::document::DocumentAccess;
use crate::selection::Selection;
use crate::toggle::{ToggleEdit, apply_toggle_wrap};
use std::collections::HashMap;
use wrap_tags::{TagPair, WrapperTag};

/// Prefix of every derived command id.
pub const COMMAND_ID_PREFIX: &str = "wrap-with-shortcut-";

/// Title of the context menu item that groups the per-wrapper entries.
pub const MENU_TITLE: &str = "Select wrapper";

/// Command id for a wrapper id.
pub fn command_id(tag_id: &str) -> String {
    format!("{COMMAND_ID_PREFIX}{tag_id}")
}

/// A toggle command bound to one configured wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapCommand {
    /// `wrap-with-shortcut-<id>`.
    pub id: String,
    /// `Toggle <name>`.
    pub name: String,
    /// Markers the command toggles.
    pub tags: TagPair,
}

impl WrapCommand {
    /// Derive the command for a configured wrapper.
    pub fn for_wrapper(wrapper: &WrapperTag) -> Self {
        Self {
            id: command_id(&wrapper.id),
            name: format!("Toggle {}", wrapper.name),
            tags: wrapper.tags.clone(),
        }
    }

    /// Run the command against `doc`.
    pub fn run<D: DocumentAccess + ?Sized>(
        &self,
        doc: &mut D,
        selection: Selection,
    ) -> Option<ToggleEdit> {
        apply_toggle_wrap(doc, selection, &self.tags)
    }
}

/// One entry of the "Select wrapper" context submenu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// `Wrap with <name>`.
    pub title: String,
    /// Markers applied when the entry is clicked.
    pub tags: TagPair,
}

/// Context menu entries for the configured wrappers, in configuration order.
pub fn menu_entries(wrappers: &[WrapperTag]) -> Vec<MenuEntry> {
    wrappers
        .iter()
        .map(|wrapper| MenuEntry {
            title: format!("Wrap with {}", wrapper.name),
            tags: wrapper.tags.clone(),
        })
        .collect()
}

/// Capability a host editor exposes for registering named actions.
pub trait CommandHost {
    /// Register a command; the host invokes it with its active document and selection.
    fn register(&mut self, command: WrapCommand);
}

/// Register one command per configured wrapper, in configuration order.
pub fn register_commands<H: CommandHost + ?Sized>(wrappers: &[WrapperTag], host: &mut H) {
    for wrapper in wrappers {
        let command = WrapCommand::for_wrapper(wrapper);
        tracing::debug!(id = %command.id, title = %command.name, "registering command");
        host.register(command);
    }
}

/// Command error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// No command is registered under this id
    UnknownCommand(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::UnknownCommand(id) => {
                write!(f, "Unknown command: {}", id)
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// In-process command host.
#[derive(Debug, Clone, Default)]
pub struct WrapCommandRegistry {
    commands: Vec<WrapCommand>,
    by_id: HashMap<String, usize>,
}

impl WrapCommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding one command per configured wrapper.
    pub fn from_wrapper_tags(wrappers: &[WrapperTag]) -> Self {
        let mut registry = Self::new();
        register_commands(wrappers, &mut registry);
        registry
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> &[WrapCommand] {
        &self.commands
    }

    /// Look up a command by id.
    pub fn get(&self, id: &str) -> Option<&WrapCommand> {
        self.by_id.get(id).map(|&idx| &self.commands[idx])
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Execute a registered command.
    ///
    /// `Ok(None)` means the command's markers are both empty and the document is unchanged.
    pub fn execute<D: DocumentAccess + ?Sized>(
        &self,
        id: &str,
        doc: &mut D,
        selection: Selection,
    ) -> Result<Option<ToggleEdit>, CommandError> {
        let command = self
            .get(id)
            .ok_or_else(|| CommandError::UnknownCommand(id.to_string()))?;
        Ok(command.run(doc, selection))
    }

    /// Toggle an explicit pair that is not bound to a registered command.
    pub fn wrap_with<D: DocumentAccess + ?Sized>(
        &self,
        doc: &mut D,
        selection: Selection,
        tags: &TagPair,
    ) -> Option<ToggleEdit> {
        apply_toggle_wrap(doc, selection, tags)
    }
}

impl CommandHost for WrapCommandRegistry {
    fn register(&mut self, command: WrapCommand) {
        // Re-registering an id replaces the earlier command in place.
        if let Some(&idx) = self.by_id.get(&command.id) {
            self.commands[idx] = command;
            return;
        }
        self.by_id.insert(command.id.clone(), self.commands.len());
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_id() {
        assert_eq!(command_id("bold"), "wrap-with-shortcut-bold");
        assert_eq!(command_id("0"), "wrap-with-shortcut-0");
    }

    #[test]
    fn test_reregister_replaces() {
        let mut registry = WrapCommandRegistry::new();
        registry.register(WrapCommand::for_wrapper(&WrapperTag::new(
            "x", "X", "<x>", "</x>",
        )));
        registry.register(WrapCommand::for_wrapper(&WrapperTag::new(
            "x", "Y", "<y>", "</y>",
        )));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("wrap-with-shortcut-x").unwrap().name, "Toggle Y");
    }

    #[test]
    fn test_unknown_command_error() {
        let registry = WrapCommandRegistry::new();
        let mut doc = String::from("abc");
        let err = registry
            .execute("wrap-with-shortcut-nope", &mut doc, Selection::new(0, 1))
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: wrap-with-shortcut-nope");
        assert_eq!(doc, "abc");
    }
}
