// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyed dependency container.
//!
//! The container maps string keys to shared service objects so application
//! code can look up the config store, the logger and anything else registered
//! at start-up by name.

use crate::domain::{Result, UtilError};
use crate::ports::Populate;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Element = Arc<dyn Any + Send + Sync>;

/// A registry of shared elements by key.
///
/// Elements are stored behind an `Arc`, so a lookup hands out a shared handle
/// and the container keeps its own for as long as the element stays
/// registered.
///
/// # Examples
///
/// ```rust
/// use sitekit::service::{ConfigStore, DependencyContainer};
///
/// let mut container = DependencyContainer::new();
/// container.add("config", ConfigStore::new());
///
/// let config = container.get::<ConfigStore>("config").unwrap();
/// assert!(config.is_empty());
/// assert!(container.get::<ConfigStore>("log").is_err());
/// ```
#[derive(Clone, Default)]
pub struct DependencyContainer {
    elements: HashMap<String, Element>,
}

impl DependencyContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container and fills it with `populator`.
    pub fn populated<P: Populate + ?Sized>(populator: &P) -> Result<Self> {
        let mut container = Self::new();
        populator.populate(&mut container)?;
        tracing::debug!("Container populated with {} elements", container.len());
        Ok(container)
    }

    /// Registers `element` under `key`, replacing any previous element.
    pub fn add<T>(&mut self, key: impl Into<String>, element: T)
    where
        T: Any + Send + Sync,
    {
        self.add_shared(key, Arc::new(element));
    }

    /// Registers an element that is already shared elsewhere.
    pub fn add_shared<T>(&mut self, key: impl Into<String>, element: Arc<T>)
    where
        T: Any + Send + Sync,
    {
        let key = key.into();
        tracing::debug!("Registering {} as {}", key, type_name::<T>());
        self.elements.insert(key, element);
    }

    /// Returns the element registered under `key`.
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if nothing is registered under `key`, and
    /// `ElementTypeMismatch` if the element is not a `T`.
    pub fn get<T>(&self, key: &str) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let element = self
            .elements
            .get(key)
            .ok_or_else(|| UtilError::ElementNotFound {
                key: key.to_string(),
            })?;

        Arc::clone(element)
            .downcast::<T>()
            .map_err(|_| UtilError::ElementTypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Returns `true` if an element is registered under `key`.
    pub fn key_exists(&self, key: &str) -> bool {
        self.elements.contains_key(key)
    }

    /// Unregisters `key`. Returns `true` if something was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.elements.remove(key).is_some()
    }

    /// Returns the number of registered elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the registered keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }
}

impl fmt::Debug for DependencyContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("DependencyContainer")
            .field("keys", &keys)
            .finish()
    }
}
