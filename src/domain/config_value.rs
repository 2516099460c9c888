// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with typed accessors.
//!
//! A `ConfigValue` is anything a JSON document can hold. Stores keep values in
//! this form and callers pull out the Rust type they expect.

use crate::domain::errors::{Result, UtilError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A value held by the config store.
///
/// The serde representation is untagged, so a `ConfigValue` reads and writes
/// as the plain JSON it mirrors.
///
/// # Examples
///
/// ```
/// use sitekit::domain::ConfigValue;
///
/// let value = ConfigValue::from(42);
/// assert_eq!(value.as_i64("site.port").unwrap(), 42);
///
/// let value: ConfigValue = serde_json::from_str(r#"{"debug": false}"#).unwrap();
/// assert!(value.as_map("site").is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum ConfigValue {
    /// An explicit null.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// An unsigned integer too large for [`ConfigValue::Integer`].
    Unsigned(u64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    List(Vec<ConfigValue>),
    /// A nested structure keyed by string.
    Map(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Returns `true` for [`ConfigValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the name of the variant, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) | ConfigValue::Unsigned(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "map",
        }
    }

    /// Returns the boolean, failing for any other variant.
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self {
            ConfigValue::Bool(b) => Ok(*b),
            _ => Err(UtilError::conversion(key, "boolean")),
        }
    }

    /// Returns the integer, failing for any other variant or one that does not
    /// fit in an `i64`.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        match self {
            ConfigValue::Integer(n) => Ok(*n),
            ConfigValue::Unsigned(n) => {
                i64::try_from(*n).map_err(|_| UtilError::conversion(key, "i64"))
            }
            _ => Err(UtilError::conversion(key, "integer")),
        }
    }

    /// Returns the integer as unsigned, failing for negative values and any
    /// other variant.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        match self {
            ConfigValue::Unsigned(n) => Ok(*n),
            ConfigValue::Integer(n) => {
                u64::try_from(*n).map_err(|_| UtilError::conversion(key, "u64"))
            }
            _ => Err(UtilError::conversion(key, "unsigned integer")),
        }
    }

    /// Returns the number as a float. Integers are widened.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match self {
            ConfigValue::Float(n) => Ok(*n),
            ConfigValue::Integer(n) => Ok(*n as f64),
            ConfigValue::Unsigned(n) => Ok(*n as f64),
            _ => Err(UtilError::conversion(key, "float")),
        }
    }

    /// Returns the string slice, failing for any other variant.
    pub fn as_str(&self, key: &str) -> Result<&str> {
        match self {
            ConfigValue::String(s) => Ok(s),
            _ => Err(UtilError::conversion(key, "string")),
        }
    }

    /// Returns the list, failing for any other variant.
    pub fn as_list(&self, key: &str) -> Result<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Ok(items),
            _ => Err(UtilError::conversion(key, "list")),
        }
    }

    /// Returns the nested map, failing for any other variant.
    pub fn as_map(&self, key: &str) -> Result<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Map(map) => Ok(map),
            _ => Err(UtilError::conversion(key, "map")),
        }
    }

    /// Converts the value into a `serde_json::Value`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self.clone())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Integer(n)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Integer(i64::from(n))
    }
}

impl From<u32> for ConfigValue {
    fn from(n: u32) -> Self {
        ConfigValue::Integer(i64::from(n))
    }
}

impl From<u64> for ConfigValue {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(ConfigValue::Unsigned(n), ConfigValue::Integer)
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Float(n)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::List(items)
    }
}

impl From<BTreeMap<String, ConfigValue>> for ConfigValue {
    fn from(map: BTreeMap<String, ConfigValue>) -> Self {
        ConfigValue::Map(map)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ConfigValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    ConfigValue::Unsigned(u)
                } else {
                    ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::List(items.into_iter().map(ConfigValue::from).collect())
            }
            serde_json::Value::Object(map) => ConfigValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<ConfigValue> for serde_json::Value {
    fn from(value: ConfigValue) -> Self {
        match value {
            ConfigValue::Null => serde_json::Value::Null,
            ConfigValue::Bool(b) => serde_json::Value::Bool(b),
            ConfigValue::Integer(n) => serde_json::Value::from(n),
            ConfigValue::Unsigned(n) => serde_json::Value::from(n),
            // Non-finite floats have no JSON form and become null.
            ConfigValue::Float(n) => serde_json::Number::from_f64(n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            ConfigValue::String(s) => serde_json::Value::String(s),
            ConfigValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            ConfigValue::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Unsigned(n) => write!(f, "{}", n),
            ConfigValue::Float(n) => write!(f, "{}", n),
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::List(_) | ConfigValue::Map(_) => write!(f, "{}", self.to_json()),
        }
    }
}
