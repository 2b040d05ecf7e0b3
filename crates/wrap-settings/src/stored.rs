//! On-disk shape of the configuration and the load-time pipeline.
//!
//! Loading runs in two explicit steps:
//!
//! 1. [`merge_with_defaults`]: the persisted top-level object overrides the defaults key by key.
//!    Absent or malformed data yields the defaults.
//! 2. [`migrate`]: legacy data written before wrappers had ids gets positional ids.
//!
//! After step 2 every wrapper has a mandatory id ([`WrapperTag::id`]); nothing downstream deals
//! with optional ids.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use wrap_tags::{TagPair, WrapperTag, default_wrapper_tags};

/// Key of the wrapper list in the persisted object.
pub const WRAPPER_TAGS_KEY: &str = "wrapperTags";

/// A wrapper as persisted. `id` is absent in legacy data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWrapperTag {
    /// Stable id (missing before ids were introduced).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Start marker.
    #[serde(default)]
    pub start_tag: String,
    /// End marker.
    #[serde(default)]
    pub end_tag: String,
}

impl StoredWrapperTag {
    fn has_id(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

impl From<&WrapperTag> for StoredWrapperTag {
    fn from(tag: &WrapperTag) -> Self {
        Self {
            id: Some(tag.id.clone()),
            name: tag.name.clone(),
            start_tag: tag.tags.start.clone(),
            end_tag: tag.tags.end.clone(),
        }
    }
}

/// The persisted configuration object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    /// Configured wrappers in display order.
    #[serde(rename = "wrapperTags")]
    pub wrapper_tags: Vec<StoredWrapperTag>,
    /// Top-level keys this crate does not interpret; written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StoredSettings {
    fn default() -> Self {
        Self {
            wrapper_tags: default_wrapper_tags()
                .iter()
                .map(StoredWrapperTag::from)
                .collect(),
            extra: Map::new(),
        }
    }
}

/// Fully migrated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapperTagSettings {
    /// Configured wrappers in display order.
    pub wrapper_tags: Vec<WrapperTag>,
    /// Uninterpreted top-level keys carried through from the persisted object.
    pub extra: Map<String, Value>,
}

impl Default for WrapperTagSettings {
    fn default() -> Self {
        Self {
            wrapper_tags: default_wrapper_tags(),
            extra: Map::new(),
        }
    }
}

impl WrapperTagSettings {
    /// Persisted form of these settings.
    pub fn to_stored(&self) -> StoredSettings {
        StoredSettings {
            wrapper_tags: self
                .wrapper_tags
                .iter()
                .map(StoredWrapperTag::from)
                .collect(),
            extra: self.extra.clone(),
        }
    }

    /// Persisted form as a JSON value.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self.to_stored())
    }
}

/// Overlay persisted data on the defaults.
///
/// - `None`, `null`, or a non-object value: defaults.
/// - An object without `wrapperTags`: default wrappers, other keys kept.
/// - An object whose `wrapperTags` does not parse: default wrappers, logged at `warn`.
pub fn merge_with_defaults(loaded: Option<Value>) -> StoredSettings {
    let mut settings = StoredSettings::default();

    let mut map = match loaded {
        None | Some(Value::Null) => {
            tracing::debug!("no persisted settings, using defaults");
            return settings;
        }
        Some(Value::Object(map)) => map,
        Some(other) => {
            tracing::warn!(
                "persisted settings are not an object ({}), using defaults",
                json_kind(&other)
            );
            return settings;
        }
    };

    if let Some(tags) = map.remove(WRAPPER_TAGS_KEY) {
        match serde_json::from_value::<Vec<StoredWrapperTag>>(tags) {
            Ok(tags) => settings.wrapper_tags = tags,
            Err(e) => {
                tracing::warn!("malformed {WRAPPER_TAGS_KEY}, using default wrappers: {e}");
            }
        }
    }
    settings.extra = map;
    settings
}

/// Result of [`migrate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    /// Migrated settings with an id on every wrapper.
    pub settings: WrapperTagSettings,
    /// `true` when legacy data was upgraded and must be saved before use.
    pub needs_save: bool,
}

/// Assign ids to wrappers persisted without one.
///
/// Legacy data is detected by the first wrapper lacking an id (missing or empty). Wrappers
/// without an id receive their positional index as id (`"0"`, `"1"`, …); wrappers that already
/// have one keep it. An id already taken by another wrapper gets a `-2`, `-3`, … suffix so
/// every command key stays unique. Order is preserved.
pub fn migrate(stored: StoredSettings) -> Migration {
    let needs_save = stored.wrapper_tags.first().is_some_and(|tag| !tag.has_id());

    let explicit: HashSet<String> = stored
        .wrapper_tags
        .iter()
        .filter(|tag| tag.has_id())
        .filter_map(|tag| tag.id.clone())
        .collect();
    let mut used: HashSet<String> = HashSet::new();

    let mut backfilled = 0usize;
    let mut renamed = 0usize;
    let wrapper_tags = stored
        .wrapper_tags
        .into_iter()
        .enumerate()
        .map(|(index, tag)| {
            let id = match tag.id {
                Some(id) if !id.is_empty() => {
                    if used.contains(&id) {
                        renamed += 1;
                        disambiguate(&id, |c| used.contains(c) || explicit.contains(c))
                    } else {
                        id
                    }
                }
                _ => {
                    backfilled += 1;
                    let base = index.to_string();
                    if used.contains(&base) || explicit.contains(&base) {
                        renamed += 1;
                        disambiguate(&base, |c| used.contains(c) || explicit.contains(c))
                    } else {
                        base
                    }
                }
            };
            used.insert(id.clone());
            WrapperTag {
                id,
                name: tag.name,
                tags: TagPair::new(tag.start_tag, tag.end_tag),
            }
        })
        .collect();

    if needs_save {
        tracing::info!(backfilled, "assigned positional ids to legacy wrapper tags");
    } else if backfilled > 0 {
        tracing::warn!(backfilled, "wrapper tags without id after the first entry");
    }
    if renamed > 0 {
        tracing::warn!(renamed, "duplicate wrapper tag ids were suffixed");
    }

    Migration {
        settings: WrapperTagSettings {
            wrapper_tags,
            extra: stored.extra,
        },
        needs_save,
    }
}

/// First of `base`, `base-2`, `base-3`, … that `is_taken` rejects.
pub(crate) fn disambiguate(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_absent_is_defaults() {
        assert_eq!(merge_with_defaults(None), StoredSettings::default());
        assert_eq!(merge_with_defaults(Some(Value::Null)), StoredSettings::default());
    }

    #[test]
    fn test_non_object_is_defaults() {
        assert_eq!(
            merge_with_defaults(Some(json!([1, 2, 3]))),
            StoredSettings::default()
        );
    }

    #[test]
    fn test_missing_key_keeps_extra() {
        let merged = merge_with_defaults(Some(json!({ "theme": "dark" })));
        assert_eq!(merged.wrapper_tags, StoredSettings::default().wrapper_tags);
        assert_eq!(merged.extra.get("theme"), Some(&json!("dark")));
    }

    #[test]
    fn test_malformed_wrapper_tags_is_defaults() {
        let merged = merge_with_defaults(Some(json!({ "wrapperTags": "nope" })));
        assert_eq!(merged.wrapper_tags, StoredSettings::default().wrapper_tags);
        assert!(merged.extra.is_empty());
    }

    #[test]
    fn test_persisted_list_overrides_defaults() {
        let merged = merge_with_defaults(Some(json!({
            "wrapperTags": [{ "id": "mark", "name": "Mark", "startTag": "==", "endTag": "==" }]
        })));
        assert_eq!(merged.wrapper_tags.len(), 1);
        assert_eq!(merged.wrapper_tags[0].id.as_deref(), Some("mark"));
    }

    #[test]
    fn test_empty_list_is_kept_and_not_migrated() {
        let migration = migrate(merge_with_defaults(Some(json!({ "wrapperTags": [] }))));
        assert!(migration.settings.wrapper_tags.is_empty());
        assert!(!migration.needs_save);
    }

    #[test]
    fn test_legacy_ids_are_positional() {
        let migration = migrate(merge_with_defaults(Some(json!({
            "wrapperTags": [
                { "name": "U", "startTag": "<u>", "endTag": "</u>" },
                { "name": "B", "startTag": "<b>", "endTag": "</b>" },
                { "id": "", "name": "I", "startTag": "<i>", "endTag": "</i>" }
            ]
        }))));
        let ids: Vec<_> = migration
            .settings
            .wrapper_tags
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
        assert!(migration.needs_save);
    }

    #[test]
    fn test_legacy_keeps_existing_ids() {
        let migration = migrate(merge_with_defaults(Some(json!({
            "wrapperTags": [
                { "name": "U", "startTag": "<u>", "endTag": "</u>" },
                { "id": "bold", "name": "B", "startTag": "<b>", "endTag": "</b>" }
            ]
        }))));
        let ids: Vec<_> = migration
            .settings
            .wrapper_tags
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["0", "bold"]);
    }

    #[test]
    fn test_first_with_id_does_not_force_save() {
        let migration = migrate(merge_with_defaults(Some(json!({
            "wrapperTags": [
                { "id": "bold", "name": "B", "startTag": "<b>", "endTag": "</b>" },
                { "name": "I", "startTag": "<i>", "endTag": "</i>" }
            ]
        }))));
        assert!(!migration.needs_save);
        assert_eq!(migration.settings.wrapper_tags[1].id, "1");
    }

    #[test]
    fn test_positional_id_collision_is_suffixed() {
        let migration = migrate(merge_with_defaults(Some(json!({
            "wrapperTags": [
                { "name": "U", "startTag": "<u>", "endTag": "</u>" },
                { "id": "0", "name": "B", "startTag": "<b>", "endTag": "</b>" },
                { "name": "I", "startTag": "<i>", "endTag": "</i>" }
            ]
        }))));
        let ids: Vec<_> = migration
            .settings
            .wrapper_tags
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["0-2", "0", "2"]);
        assert!(migration.needs_save);
    }

    #[test]
    fn test_duplicate_explicit_ids_are_suffixed() {
        let migration = migrate(merge_with_defaults(Some(json!({
            "wrapperTags": [
                { "id": "bold", "name": "B", "startTag": "<b>", "endTag": "</b>" },
                { "id": "bold", "name": "Strong", "startTag": "<strong>", "endTag": "</strong>" }
            ]
        }))));
        let ids: Vec<_> = migration
            .settings
            .wrapper_tags
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["bold", "bold-2"]);
    }

    #[test]
    fn test_disambiguate() {
        assert_eq!(disambiguate("x", |_| false), "x");
        assert_eq!(disambiguate("x", |c| c == "x" || c == "x-2"), "x-3");
    }

    #[test]
    fn test_serialized_shape() {
        let value = WrapperTagSettings::default().to_value().unwrap();
        assert_eq!(
            value["wrapperTags"][1],
            json!({ "id": "bold", "name": "Bold", "startTag": "<b>", "endTag": "</b>" })
        );
    }
}
