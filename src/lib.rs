// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared process-wide facilities for web applications.
//!
//! This crate bundles the small utilities most sites need at start-up: a
//! key-value configuration store, a leveled file logger, a JSON file reader and
//! writer, a keyed dependency container and two input validators.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and pure logic (`ConfigKey`, `ConfigValue`,
//!   `LogLevel`, errors, validators)
//! - **Ports**: Trait definitions at the edges (`RemoteAddress`,
//!   `ConfigObserver`, `Populate`)
//! - **Adapters**: Implementations that touch the outside world (`FileLogger`,
//!   `JsonFile`, remote address lookups)
//! - **Service**: The stores application code works with (`ConfigStore`,
//!   `DependencyContainer`)
//!
//! # Quick Start
//!
//! ```rust
//! use sitekit::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> sitekit::domain::Result<()> {
//! let dir = tempfile::tempdir()?;
//!
//! let log = Arc::new(FileLogger::new());
//! log.init(dir.path().join("logs"), Some("site.log"), Some(LogLevel::Info))?;
//!
//! let config = ConfigStore::new().with_observer(log.clone());
//! config.set_item("site.name", "demo");
//!
//! let mut container = DependencyContainer::new();
//! container.add_shared("log", log);
//! container.add("config", config);
//!
//! // Registered services stay usable, and the store stays writable.
//! let config = container.get::<ConfigStore>("config")?;
//! config.set_item("site.debug", false);
//! container.get::<FileLogger>("log")?.notice(format!(
//!     "Serving {}",
//!     config.get_item("site.name")?
//! ))?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{
        FileLogger, FixedRemoteAddress, JsonFile, LoggerSettings, LoggerState, NoRemoteAddress,
        RequestRemoteAddress,
    };
    pub use crate::domain::{
        is_date, is_email, ConfigKey, ConfigValue, DateFormat, LogLevel, LogMessage, Result,
        UtilError,
    };
    pub use crate::ports::{ConfigObserver, Populate, RemoteAddress};
    pub use crate::service::{ConfigStore, DependencyContainer};
}
