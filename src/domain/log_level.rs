// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log levels and log message text.

use crate::domain::config_value::ConfigValue;
use crate::domain::errors::{Result, UtilError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// A lower value is more severe. A record is written when its value is less
/// than or equal to the logger's threshold. [`LogLevel::Custom`] is never
/// filtered and is written without any prefix.
///
/// # Examples
///
/// ```
/// use sitekit::domain::LogLevel;
///
/// let level: LogLevel = "warn".parse().unwrap();
/// assert_eq!(level, LogLevel::Warn);
/// assert!(LogLevel::Error.passes(level));
/// assert!(!LogLevel::Info.passes(level));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    /// Unformatted output that bypasses filtering.
    Custom,
    /// The application cannot continue.
    Fatal,
    /// An operation failed.
    Error,
    /// Something unexpected that did not fail.
    Warn,
    /// Normal but significant events. The default threshold.
    #[default]
    Notice,
    /// Informational messages.
    Info,
    /// Debugging output.
    Debug,
    /// A completed operation.
    Success,
}

impl LogLevel {
    /// Every level, ordered by value.
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Custom,
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Success,
    ];

    /// Returns the numeric value of the level.
    pub fn value(self) -> i32 {
        match self {
            LogLevel::Custom => -1,
            LogLevel::Fatal => 0,
            LogLevel::Error => 1,
            LogLevel::Warn => 2,
            LogLevel::Notice => 3,
            LogLevel::Info => 4,
            LogLevel::Debug => 5,
            LogLevel::Success => 6,
        }
    }

    /// Returns the lowercase name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Custom => "custom",
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Notice => "notice",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Success => "success",
        }
    }

    /// Returns the 7-character label written into log lines.
    ///
    /// `Custom` has no label and returns an empty string.
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Custom => "",
            LogLevel::Fatal => " FATAL ",
            LogLevel::Error => "ERROR  ",
            LogLevel::Warn => "WARNING",
            LogLevel::Notice => "NOTICE ",
            LogLevel::Info => "INFO   ",
            LogLevel::Debug => "DEBUG  ",
            LogLevel::Success => "SUCCESS",
        }
    }

    /// Returns the label wrapped in ANSI colour codes for terminal viewing.
    pub fn ansi_label(self) -> String {
        let colour = match self {
            LogLevel::Custom => return String::new(),
            LogLevel::Fatal => "\x1b[1;37m\x1b[41m",
            LogLevel::Error => "\x1b[1;31m\x1b[1m",
            LogLevel::Warn => "\x1b[0;33m\x1b[1m",
            LogLevel::Notice => "\x1b[0;36m\x1b[1m",
            LogLevel::Info => "\x1b[0;34m\x1b[1m",
            LogLevel::Debug => "\x1b[0;37m\x1b[1m",
            LogLevel::Success => "\x1b[0;32m\x1b[1m",
        };
        format!("{}{}\x1b[0m", colour, self.label())
    }

    /// Returns `true` if a record at this level is written under `threshold`.
    pub fn passes(self, threshold: LogLevel) -> bool {
        self == LogLevel::Custom || self.value() <= threshold.value()
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = UtilError;

    fn try_from(value: i32) -> Result<Self> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.value() == value)
            .ok_or_else(|| UtilError::UndefinedLogLevel {
                level: value.to_string(),
            })
    }
}

impl FromStr for LogLevel {
    type Err = UtilError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        if name == "warning" {
            return Ok(LogLevel::Warn);
        }
        LogLevel::ALL
            .into_iter()
            .find(|level| level.name() == name)
            .ok_or_else(|| UtilError::UndefinedLogLevel {
                level: s.to_string(),
            })
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Value(i32),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
            Raw::Value(value) => LogLevel::try_from(value).map_err(serde::de::Error::custom),
        }
    }
}

/// The text of a log record.
///
/// Booleans render as `true`/`false` and absent values as `null`, so any of
/// these can be passed straight to a logging call.
///
/// # Examples
///
/// ```
/// use sitekit::domain::LogMessage;
///
/// assert_eq!(LogMessage::from(true).as_str(), "true");
/// assert_eq!(LogMessage::from(None::<&str>).as_str(), "null");
/// assert_eq!(LogMessage::from("started").as_str(), "started");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogMessage(String);

impl LogMessage {
    /// Returns the rendered text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LogMessage {
    fn from(s: &str) -> Self {
        LogMessage(s.to_string())
    }
}

impl From<String> for LogMessage {
    fn from(s: String) -> Self {
        LogMessage(s)
    }
}

impl From<&String> for LogMessage {
    fn from(s: &String) -> Self {
        LogMessage(s.clone())
    }
}

impl From<bool> for LogMessage {
    fn from(b: bool) -> Self {
        LogMessage(b.to_string())
    }
}

impl From<()> for LogMessage {
    fn from(_: ()) -> Self {
        LogMessage("null".to_string())
    }
}

impl From<i64> for LogMessage {
    fn from(n: i64) -> Self {
        LogMessage(n.to_string())
    }
}

impl From<f64> for LogMessage {
    fn from(n: f64) -> Self {
        LogMessage(n.to_string())
    }
}

impl From<&ConfigValue> for LogMessage {
    fn from(value: &ConfigValue) -> Self {
        LogMessage(value.to_string())
    }
}

impl From<fmt::Arguments<'_>> for LogMessage {
    fn from(args: fmt::Arguments<'_>) -> Self {
        LogMessage(args.to_string())
    }
}

impl<T: Into<LogMessage>> From<Option<T>> for LogMessage {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(|| LogMessage("null".to_string()), Into::into)
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        let values: Vec<i32> = LogLevel::ALL.iter().map(|l| l.value()).collect();
        assert_eq!(values, vec![-1, 0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Fatal);
        assert_eq!("ERROR".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!(" Notice ".parse::<LogLevel>().unwrap(), LogLevel::Notice);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("custom".parse::<LogLevel>().unwrap(), LogLevel::Custom);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "verbose".parse::<LogLevel>().unwrap_err();
        assert!(matches!(err, UtilError::UndefinedLogLevel { ref level } if level == "verbose"));
    }

    #[test]
    fn test_try_from_int() {
        assert_eq!(LogLevel::try_from(-1).unwrap(), LogLevel::Custom);
        assert_eq!(LogLevel::try_from(4).unwrap(), LogLevel::Info);
        assert!(LogLevel::try_from(7).is_err());
    }

    #[test]
    fn test_labels_are_seven_chars() {
        for level in LogLevel::ALL.iter().filter(|l| **l != LogLevel::Custom) {
            assert_eq!(level.label().len(), 7, "{:?}", level);
        }
        assert_eq!(LogLevel::Custom.label(), "");
    }

    #[test]
    fn test_ansi_label() {
        assert_eq!(
            LogLevel::Warn.ansi_label(),
            "\x1b[0;33m\x1b[1mWARNING\x1b[0m"
        );
        assert_eq!(LogLevel::Custom.ansi_label(), "");
    }

    #[test]
    fn test_passes() {
        assert!(LogLevel::Fatal.passes(LogLevel::Warn));
        assert!(LogLevel::Warn.passes(LogLevel::Warn));
        assert!(!LogLevel::Info.passes(LogLevel::Warn));
        assert!(LogLevel::Custom.passes(LogLevel::Fatal));
        assert!(!LogLevel::Fatal.passes(LogLevel::Custom));
    }

    #[test]
    fn test_default_is_notice() {
        assert_eq!(LogLevel::default(), LogLevel::Notice);
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&LogLevel::Debug).unwrap(), "\"debug\"");
        assert_eq!(
            serde_json::from_str::<LogLevel>("\"warn\"").unwrap(),
            LogLevel::Warn
        );
        assert_eq!(serde_json::from_str::<LogLevel>("2").unwrap(), LogLevel::Warn);
        assert!(serde_json::from_str::<LogLevel>("\"loud\"").is_err());
    }

    #[test]
    fn test_message_rendering() {
        assert_eq!(LogMessage::from(false).as_str(), "false");
        assert_eq!(LogMessage::from(()).as_str(), "null");
        assert_eq!(LogMessage::from(Some("x")).as_str(), "x");
        assert_eq!(LogMessage::from(None::<bool>).as_str(), "null");
        assert_eq!(LogMessage::from(&ConfigValue::Null).as_str(), "null");
        assert_eq!(LogMessage::from(format_args!("{}-{}", 1, 2)).as_str(), "1-2");
    }
}
