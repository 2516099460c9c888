// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the shared facilities.
//!
//! Every fallible operation in the crate reports one of the variants below.
//! All errors use `thiserror` and are propagated to the caller without retry.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the crate.
///
/// Each variant names a distinct failure so callers can match on the kind
/// of problem instead of inspecting messages. It is marked
/// `#[non_exhaustive]` to allow for future additions.
///
/// # Examples
///
/// ```
/// use sitekit::domain::errors::UtilError;
///
/// fn lookup() -> Result<String, UtilError> {
///     Err(UtilError::DataNotFound {
///         key: "site.name".to_string(),
///     })
/// }
///
/// assert!(matches!(lookup(), Err(UtilError::DataNotFound { .. })));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UtilError {
    /// The requested key is not stored in the config store.
    #[error("Config data not found: {key}")]
    DataNotFound {
        /// The key that was not found
        key: String,
    },

    /// No element is registered in the container under the key.
    #[error("Element ({key}) could not be found")]
    ElementNotFound {
        /// The key that was not found
        key: String,
    },

    /// An element is registered under the key but has a different type.
    #[error("Element ({key}) is not of type {expected}")]
    ElementTypeMismatch {
        /// The key that was requested
        key: String,
        /// The type name the caller asked for
        expected: &'static str,
    },

    /// A stored value could not be converted to the requested type.
    #[error("Failed to convert value for key '{key}' to type {target_type}")]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
    },

    /// The file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// The missing file
        path: PathBuf,
    },

    /// The file exists but holds no bytes.
    #[error("File is empty: {}", path.display())]
    EmptyFile {
        /// The empty file
        path: PathBuf,
    },

    /// The file could not be opened or created.
    #[error("Could not open file: {}", path.display())]
    FileOpen {
        /// The file that could not be opened
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The content is not a JSON object or array.
    #[error("Invalid JSON: {message}")]
    InvalidJson {
        /// A description of what was rejected
        message: String,
        /// The underlying parse error, if the text did not parse at all
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The log directory could not be created.
    #[error("Log directory ({}) could not be created", path.display())]
    DirectoryCreate {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The log directory exists but is not writable.
    #[error("The directory ({}) is not writable", path.display())]
    DirectoryNotWritable {
        /// The read-only directory
        path: PathBuf,
    },

    /// A log level name or number does not match any level.
    #[error("An undefined log level specified: {level}")]
    UndefinedLogLevel {
        /// The rejected level as given by the caller
        level: String,
    },

    /// A date format string is not one of the supported layouts.
    #[error("Unsupported date format: {format}")]
    InvalidDateFormat {
        /// The rejected format
        format: String,
    },

    /// An I/O error occurred while writing.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl UtilError {
    /// Creates an `InvalidJson` error for well-formed JSON that is not
    /// wrapped in an object or array.
    pub fn not_wrapped(what: impl Into<String>) -> Self {
        UtilError::InvalidJson {
            message: format!("{} is not a JSON object or array", what.into()),
            source: None,
        }
    }

    /// Creates an `InvalidJson` error from a `serde_json` failure.
    pub fn from_json_error(what: impl Into<String>, err: serde_json::Error) -> Self {
        UtilError::InvalidJson {
            message: format!("{}: {}", what.into(), err),
            source: Some(err),
        }
    }

    /// Creates a `TypeConversionError` for the given key and type name.
    pub fn conversion(key: &str, target_type: &str) -> Self {
        UtilError::TypeConversionError {
            key: key.to_string(),
            target_type: target_type.to_string(),
        }
    }
}

/// A specialized Result type for the crate.
pub type Result<T> = std::result::Result<T, UtilError>;
