use crate::SettingsError;
use crate::store::SettingsStore;
use crate::stored::{WrapperTagSettings, disambiguate, merge_with_defaults, migrate};
use wrap_tags::{TagPair, WrapperTag};

/// Owns the configuration for the lifetime of a host session.
///
/// Settings are loaded once through [`SettingsManager::load`] and every edit is saved
/// immediately. Edits never change an existing wrapper id, so commands derived from ids stay
/// valid across renames and reorders.
#[derive(Debug)]
pub struct SettingsManager<S: SettingsStore> {
    store: S,
    settings: WrapperTagSettings,
}

impl<S: SettingsStore> SettingsManager<S> {
    /// Load, merge with defaults and migrate legacy data.
    ///
    /// Migrated legacy data is saved before this returns.
    pub fn load(mut store: S) -> Result<Self, SettingsError> {
        let stored = merge_with_defaults(store.load()?);
        let migration = migrate(stored);

        if migration.needs_save {
            store.save(&migration.settings.to_value()?)?;
        }

        Ok(Self {
            store,
            settings: migration.settings,
        })
    }

    /// Current settings.
    pub fn settings(&self) -> &WrapperTagSettings {
        &self.settings
    }

    /// Configured wrappers in display order.
    pub fn wrapper_tags(&self) -> &[WrapperTag] {
        &self.settings.wrapper_tags
    }

    /// Look up a wrapper by id.
    pub fn get(&self, id: &str) -> Option<&WrapperTag> {
        self.settings.wrapper_tags.iter().find(|tag| tag.id == id)
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist the current settings.
    pub fn save(&mut self) -> Result<(), SettingsError> {
        let value = self.settings.to_value()?;
        self.store.save(&value)
    }

    /// Append a wrapper. Its id is derived from `name` and never collides with an existing one.
    pub fn add_tag(
        &mut self,
        name: &str,
        start: &str,
        end: &str,
    ) -> Result<&WrapperTag, SettingsError> {
        let id = self.unique_id(name);
        tracing::debug!(%id, tag_name = name, "adding wrapper tag");
        self.settings
            .wrapper_tags
            .push(WrapperTag::new(id, name, start, end));
        self.save()?;

        let idx = self.settings.wrapper_tags.len() - 1;
        Ok(&self.settings.wrapper_tags[idx])
    }

    /// Change a wrapper's display name.
    pub fn rename_tag(&mut self, id: &str, name: &str) -> Result<(), SettingsError> {
        let idx = self.index_of(id)?;
        self.settings.wrapper_tags[idx].name = name.to_string();
        self.save()
    }

    /// Change a wrapper's markers.
    pub fn set_tags(&mut self, id: &str, start: &str, end: &str) -> Result<(), SettingsError> {
        let idx = self.index_of(id)?;
        self.settings.wrapper_tags[idx].tags = TagPair::new(start, end);
        self.save()
    }

    /// Move the wrapper at position `from` to position `to`.
    pub fn move_tag(&mut self, from: usize, to: usize) -> Result<(), SettingsError> {
        let len = self.settings.wrapper_tags.len();
        for index in [from, to] {
            if index >= len {
                return Err(SettingsError::IndexOutOfRange { index, len });
            }
        }

        let tag = self.settings.wrapper_tags.remove(from);
        self.settings.wrapper_tags.insert(to, tag);
        self.save()
    }

    /// Remove a wrapper and return it.
    pub fn remove_tag(&mut self, id: &str) -> Result<WrapperTag, SettingsError> {
        let idx = self.index_of(id)?;
        let removed = self.settings.wrapper_tags.remove(idx);
        self.save()?;
        Ok(removed)
    }

    fn index_of(&self, id: &str) -> Result<usize, SettingsError> {
        self.settings
            .wrapper_tags
            .iter()
            .position(|tag| tag.id == id)
            .ok_or_else(|| SettingsError::UnknownTag(id.to_string()))
    }

    fn unique_id(&self, name: &str) -> String {
        disambiguate(&slugify(name), |candidate| self.get(candidate).is_some())
    }
}

/// Lowercase slug: alphanumerics kept, other runs collapsed to `-`.
pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        "tag".to_string()
    } else {
        slug
    }
}
