// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config store observer trait definition.
//!
//! A `ConfigStore` can report its activity to an observer, typically the
//! application's file logger. Observers cannot fail the store operation they
//! are told about.

use crate::domain::{ConfigKey, ConfigValue};

/// A trait for receiving notifications about config store activity.
///
/// Every method has an empty default so implementations only override the
/// events they care about.
///
/// # Examples
///
/// ```rust
/// use sitekit::domain::{ConfigKey, ConfigValue};
/// use sitekit::ports::ConfigObserver;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// #[derive(Default)]
/// struct CountSets(AtomicUsize);
///
/// impl ConfigObserver for CountSets {
///     fn on_set(&self, _key: &ConfigKey, _value: &ConfigValue) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let observer = CountSets::default();
/// observer.on_set(&ConfigKey::from("a"), &ConfigValue::from(1));
/// assert_eq!(observer.0.load(Ordering::SeqCst), 1);
/// ```
pub trait ConfigObserver: Send + Sync {
    /// Called when `key` is stored with `value`.
    fn on_set(&self, _key: &ConfigKey, _value: &ConfigValue) {}

    /// Called when `key` is looked up. `found` tells whether it was present.
    fn on_get(&self, _key: &ConfigKey, _found: bool) {}

    /// Called after the store has been emptied.
    fn on_clear(&self) {}
}
