//! Walking a keyboard path and merging the fragment found at each level.

use std::path::Path;

use serde::de::DeserializeOwned;
use toml::{Table, Value};
use tracing::{debug, trace};

use super::file::load_fragment;
use super::fragment::{merge_overwrite, FragmentParser};
use super::ConfigError;

/// Settings merged along a keyboard path, most specific level last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    settings: Table,
}

impl ResolvedConfig {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Returns the setting as a string slice, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.settings.iter()
    }

    pub fn as_table(&self) -> &Table {
        &self.settings
    }

    pub fn into_table(self) -> Table {
        self.settings
    }

    /// Deserializes the merged settings into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let value = Value::Table(self.settings.clone());
        value.try_into().map_err(ConfigError::DeserializeError)
    }
}

impl From<Table> for ResolvedConfig {
    fn from(settings: Table) -> Self {
        Self { settings }
    }
}

/// Splits a keyboard path into its directory segments. One trailing `/` is ignored.
pub(crate) fn segments(keyboard: &str) -> Result<Vec<&str>, ConfigError> {
    let trimmed = keyboard.strip_suffix('/').unwrap_or(keyboard);
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts
        .iter()
        .any(|p| p.is_empty() || *p == "." || *p == "..")
    {
        return Err(ConfigError::InvalidKeyboardPath(keyboard.to_string()));
    }
    Ok(parts)
}

/// Returns the redirect target stored under `key`, if any.
pub(crate) fn redirect_target<'a>(
    settings: &'a Table,
    key: &str,
) -> Result<Option<&'a str>, ConfigError> {
    match settings.get(key) {
        None => Ok(None),
        Some(Value::String(target)) => Ok(Some(target.as_str())),
        Some(_) => Err(ConfigError::InvalidRedirect {
            key: key.to_string(),
        }),
    }
}

/// Walks `keyboard` from `root`, merging the `fragment` file at every level.
///
/// The redirect setting is looked up before the walk starts, while nothing
/// has been merged yet, so a redirect never changes the path of the walk that
/// produced it. Callers that want to follow a redirect resolve once and walk
/// again with the target.
pub(crate) fn resolve_chain(
    root: &Path,
    keyboard: &str,
    fragment: &str,
    parser: &dyn FragmentParser,
    redirect_key: &str,
) -> Result<ResolvedConfig, ConfigError> {
    let mut settings = Table::new();
    let mut keyboard = keyboard.to_string();

    if let Some(target) = redirect_target(&settings, redirect_key)? {
        trace!(from = %keyboard, to = target, "following redirect");
        keyboard = target.to_string();
    }

    let mut cursor = root.to_path_buf();
    for segment in segments(&keyboard)? {
        cursor.push(segment);
        if !cursor.is_dir() {
            return Err(ConfigError::KeyboardNotFound {
                keyboard: keyboard.clone(),
                segment: segment.to_string(),
            });
        }

        let path = cursor.join(fragment);
        match load_fragment(&path, segment, parser)? {
            Some(table) => {
                debug!(path = %path.display(), keys = table.len(), "merging fragment");
                merge_overwrite(&mut settings, table);
            }
            None => trace!(path = %path.display(), "no fragment at this level"),
        }
    }

    Ok(ResolvedConfig::from(settings))
}
