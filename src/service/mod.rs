// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the stores application code talks to.
//!
//! The config store holds key-value settings; the dependency container holds
//! shared services, including the config store and the file logger.

pub mod config_store;
pub mod container;

// Re-export commonly used types
pub use config_store::ConfigStore;
pub use container::DependencyContainer;
