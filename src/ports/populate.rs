// SPDX-License-Identifier: MIT OR Apache-2.0

//! Container population trait definition.

use crate::domain::Result;
use crate::service::DependencyContainer;

/// A trait for registering an application's standard services.
///
/// The library does not know which services an application needs; the
/// application implements `Populate` once and runs it at start-up, usually
/// through [`DependencyContainer::populated`].
///
/// # Examples
///
/// ```rust
/// use sitekit::domain::Result;
/// use sitekit::ports::Populate;
/// use sitekit::service::{ConfigStore, DependencyContainer};
///
/// struct App;
///
/// impl Populate for App {
///     fn populate(&self, container: &mut DependencyContainer) -> Result<()> {
///         container.add("config", ConfigStore::new());
///         Ok(())
///     }
/// }
///
/// let container = DependencyContainer::populated(&App).unwrap();
/// assert!(container.key_exists("config"));
/// ```
pub trait Populate {
    /// Registers elements in `container`.
    fn populate(&self, container: &mut DependencyContainer) -> Result<()>;
}
