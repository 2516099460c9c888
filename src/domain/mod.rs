// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and pure logic.
//!
//! Nothing in this module touches the filesystem; it defines the keys, values,
//! levels and errors the other layers exchange, plus the stateless validators.

pub mod config_key;
pub mod config_value;
pub mod errors;
pub mod log_level;
pub mod validation;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use errors::{Result, UtilError};
pub use log_level::{LogLevel, LogMessage};
pub use validation::{is_date, is_email, DateFormat};
