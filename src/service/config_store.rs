// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory key-value configuration store.
//!
//! The store locks internally, so a single instance can be shared behind an
//! `Arc` (for example through the dependency container) and still be changed.

use crate::adapters::JsonFile;
use crate::domain::{ConfigKey, ConfigValue, Result, UtilError};
use crate::ports::ConfigObserver;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Data = HashMap<ConfigKey, ConfigValue>;

/// Holds configuration values by key.
///
/// Setting a key that already exists replaces its value. Lookups distinguish
/// an absent key from a stored `false`, `0`, `""` or `null`. Values are
/// returned as owned copies.
///
/// An optional [`ConfigObserver`] is told about every set, lookup and clear.
/// It is called after the store's lock is released.
///
/// # Examples
///
/// ```rust
/// use sitekit::domain::ConfigValue;
/// use sitekit::service::ConfigStore;
///
/// let config = ConfigStore::new();
/// config.set_item("site.debug", false);
///
/// assert_eq!(config.in_config("site.debug"), Some(ConfigValue::Bool(false)));
/// assert_eq!(config.in_config("site.name"), None);
/// assert!(config.get_item("site.name").is_err());
/// ```
#[derive(Default)]
pub struct ConfigStore {
    data: RwLock<Data>,
    observer: RwLock<Option<Arc<dyn ConfigObserver>>>,
}

impl ConfigStore {
    /// Creates an empty store with no observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an observer, replacing any previous one.
    pub fn with_observer(self, observer: Arc<dyn ConfigObserver>) -> Self {
        self.set_observer(Some(observer));
        self
    }

    /// Replaces or removes the observer.
    pub fn set_observer(&self, observer: Option<Arc<dyn ConfigObserver>>) {
        *self
            .observer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = observer;
    }

    fn read(&self) -> RwLockReadGuard<'_, Data> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Data> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn observer(&self) -> Option<Arc<dyn ConfigObserver>> {
        self.observer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_item(&self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(observer) = self.observer() {
            observer.on_set(&key, &value);
        }
        self.write().insert(key, value);
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// `DataNotFound` if nothing is stored under `key`.
    pub fn get_item(&self, key: &str) -> Result<ConfigValue> {
        self.lookup(key).ok_or_else(|| UtilError::DataNotFound {
            key: key.to_string(),
        })
    }

    /// Returns the value stored under `key`, or `None` if it is absent.
    pub fn in_config(&self, key: &str) -> Option<ConfigValue> {
        self.lookup(key)
    }

    fn lookup(&self, key: &str) -> Option<ConfigValue> {
        let value = self.read().get(key).cloned();
        if let Some(observer) = self.observer() {
            observer.on_get(&ConfigKey::from(key), value.is_some());
        }
        value
    }

    /// Returns `true` if `key` is stored. Observers are not notified.
    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&self, key: &str) -> Option<ConfigValue> {
        self.write().remove(key)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.write().clear();
        if let Some(observer) = self.observer() {
            observer.on_clear();
        }
    }

    /// Returns the number of stored keys.
    pub fn size(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns the stored keys, sorted.
    pub fn keys(&self) -> Vec<ConfigKey> {
        let mut keys: Vec<ConfigKey> = self.read().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Returns a copy of every entry, sorted by key.
    pub fn entries(&self) -> Vec<(ConfigKey, ConfigValue)> {
        let mut entries: Vec<_> = self
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Stores every top-level member of the JSON object in `path`.
    ///
    /// Existing keys with the same names are replaced. Returns the number of
    /// members loaded.
    ///
    /// # Errors
    ///
    /// Any error from [`JsonFile::read_file`], or `InvalidJson` if the document
    /// is an array rather than an object.
    pub fn load_json_file<P: AsRef<Path>>(&self, path: P, json: &JsonFile) -> Result<usize> {
        let path = path.as_ref();
        let serde_json::Value::Object(members) = json.read_file(path)? else {
            return Err(UtilError::InvalidJson {
                message: format!("{} must hold a JSON object", path.display()),
                source: None,
            });
        };

        let count = members.len();
        for (key, value) in members {
            self.set_item(key, ConfigValue::from(value));
        }

        tracing::debug!("Loaded {} config entries from {}", count, path.display());
        Ok(count)
    }
}

impl Clone for ConfigStore {
    fn clone(&self) -> Self {
        Self {
            data: RwLock::new(self.read().clone()),
            observer: RwLock::new(self.observer()),
        }
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("data", &*self.read())
            .field("observed", &self.observer().is_some())
            .finish()
    }
}
