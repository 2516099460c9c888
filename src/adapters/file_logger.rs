// SPDX-License-Identifier: MIT OR Apache-2.0

//! Leveled, append-only file logger.
//!
//! A [`FileLogger`] writes one line per record:
//!
//! ```text
//! 19/10/2026 14:03:52 [IP: 203.0.113.9    ] WARNING - disk nearly full
//! ```
//!
//! Records below the configured threshold are dropped. `custom` records are
//! written verbatim and are never dropped. The logger is safe to share behind
//! an `Arc`; lines from different threads never interleave.

use crate::adapters::remote_addr::NoRemoteAddress;
use crate::domain::{ConfigKey, ConfigValue, LogLevel, LogMessage, Result, UtilError};
use crate::ports::{ConfigObserver, RemoteAddress};
use crate::service::ConfigStore;
use chrono::{DateTime, Local};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Directory used when none is configured.
pub const DEFAULT_LOG_DIRECTORY: &str = "logs/";

/// Width of the address column in a log line.
const ADDRESS_WIDTH: usize = 15;

/// Lifecycle of a [`FileLogger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoggerState {
    /// `init` has never been called.
    Uninitialized,
    /// A log file is open for appending.
    Open,
    /// The file was released by `reset`.
    Closed,
}

#[derive(Debug)]
enum Output {
    Uninitialized,
    Open { file: File, path: PathBuf },
    Closed,
}

#[derive(Debug)]
struct Inner {
    output: Output,
    level: LogLevel,
    ansi_labels: bool,
}

/// Appends leveled records to a log file.
///
/// Until [`init`](Self::init) is called, and again after
/// [`reset`](Self::reset), every logging call is a silent no-op that returns
/// `Ok(())`.
///
/// # Examples
///
/// ```rust
/// use sitekit::adapters::FileLogger;
/// use sitekit::domain::LogLevel;
///
/// # fn main() -> sitekit::domain::Result<()> {
/// let dir = tempfile::tempdir()?;
///
/// let log = FileLogger::new();
/// log.init(dir.path().join("logs"), Some("app.log"), Some(LogLevel::Warn))?;
/// log.error("could not reach the mail server")?;
/// log.info("ignored, below the threshold")?;
///
/// let content = std::fs::read_to_string(dir.path().join("logs/app.log"))?;
/// assert_eq!(content.lines().count(), 1);
/// # Ok(())
/// # }
/// ```
pub struct FileLogger {
    inner: Mutex<Inner>,
    remote: Arc<dyn RemoteAddress>,
}

impl FileLogger {
    /// Creates an uninitialized logger with no remote address source.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                output: Output::Uninitialized,
                level: LogLevel::default(),
                ansi_labels: false,
            }),
            remote: Arc::new(NoRemoteAddress),
        }
    }

    /// Creates a logger from settings and opens its file.
    pub fn from_settings(settings: &LoggerSettings) -> Result<Self> {
        let logger = Self::new();
        logger.init_with(settings)?;
        Ok(logger)
    }

    /// Sets where the address column of each line comes from.
    pub fn with_remote_address(mut self, remote: Arc<dyn RemoteAddress>) -> Self {
        self.remote = remote;
        self
    }

    /// Wraps level labels in ANSI colour codes when `enabled`.
    pub fn with_ansi_labels(mut self, enabled: bool) -> Self {
        self.inner
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .ansi_labels = enabled;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens the log file and sets the threshold.
    ///
    /// `directory` is created, with any missing parents, if it does not exist.
    /// `filename` defaults to the current date as `YYYY-MM-DD.log` and `level`
    /// to [`LogLevel::Notice`]. If the logger is already open, the existing
    /// file is kept and only the threshold changes.
    ///
    /// # Errors
    ///
    /// `DirectoryCreate` if the directory cannot be created,
    /// `DirectoryNotWritable` if this process may not create files in it, and
    /// `FileOpen` if the file cannot be opened for appending.
    pub fn init<P: AsRef<Path>>(
        &self,
        directory: P,
        filename: Option<&str>,
        level: Option<LogLevel>,
    ) -> Result<()> {
        let level = level.unwrap_or_default();
        let mut inner = self.lock();

        if let Output::Open { path, .. } = &inner.output {
            tracing::debug!(
                "Logger already writing to {}, updating level to {}",
                path.display(),
                level
            );
            inner.level = level;
            return Ok(());
        }

        let (file, path) = open_log_file(directory.as_ref(), filename)?;
        tracing::debug!("Logging to {} at level {}", path.display(), level);
        inner.output = Output::Open { file, path };
        inner.level = level;
        Ok(())
    }

    /// Opens the log file described by `settings`.
    pub fn init_with(&self, settings: &LoggerSettings) -> Result<()> {
        self.lock().ansi_labels = settings.ansi_labels;
        self.init(
            &settings.directory,
            settings.filename.as_deref(),
            Some(settings.level),
        )
    }

    /// Closes the log file. Calling it on a logger that is not open does
    /// nothing.
    pub fn reset(&self) {
        let mut inner = self.lock();
        if let Output::Open { path, .. } = &inner.output {
            tracing::debug!("Closing log file {}", path.display());
            inner.output = Output::Closed;
        }
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> LoggerState {
        match self.lock().output {
            Output::Uninitialized => LoggerState::Uninitialized,
            Output::Open { .. } => LoggerState::Open,
            Output::Closed => LoggerState::Closed,
        }
    }

    /// Returns `true` while a log file is open.
    pub fn is_open(&self) -> bool {
        self.state() == LoggerState::Open
    }

    /// Returns the path of the open log file.
    pub fn path(&self) -> Option<PathBuf> {
        match &self.lock().output {
            Output::Open { path, .. } => Some(path.clone()),
            _ => None,
        }
    }

    /// Returns the severity threshold.
    pub fn level(&self) -> LogLevel {
        self.lock().level
    }

    /// Changes the severity threshold without touching the file.
    pub fn set_level(&self, level: LogLevel) {
        self.lock().level = level;
    }

    /// Writes `message` at `level` if the logger is open and the level passes
    /// the threshold.
    pub fn log(&self, level: LogLevel, message: impl Into<LogMessage>) -> Result<()> {
        let message = message.into();
        let remote = self.remote.remote_addr();

        let mut inner = self.lock();
        let threshold = inner.level;
        let ansi_labels = inner.ansi_labels;
        let Output::Open { file, .. } = &mut inner.output else {
            tracing::debug!("Logger not open, dropping {} record", level);
            return Ok(());
        };

        if !level.passes(threshold) {
            return Ok(());
        }

        let line = format_line(level, &message, remote.as_deref(), ansi_labels, Local::now());
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Logs at [`LogLevel::Fatal`].
    pub fn fatal(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Fatal, message)
    }

    /// Logs at [`LogLevel::Error`].
    pub fn error(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    /// Logs at [`LogLevel::Warn`].
    pub fn warn(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Warn, message)
    }

    /// Logs at [`LogLevel::Notice`].
    pub fn notice(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Notice, message)
    }

    /// Logs at [`LogLevel::Info`].
    pub fn info(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    /// Logs at [`LogLevel::Debug`].
    pub fn debug(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    /// Logs at [`LogLevel::Success`].
    pub fn success(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Success, message)
    }

    /// Writes `message` and a newline with no timestamp, address or label.
    /// The threshold does not apply.
    pub fn custom(&self, message: impl Into<LogMessage>) -> Result<()> {
        self.log(LogLevel::Custom, message)
    }

    fn observe(&self, message: String) {
        if let Err(e) = self.info(message) {
            tracing::warn!("Failed to log config activity: {}", e);
        }
    }
}

impl Default for FileLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FileLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLogger")
            .field("state", &self.state())
            .field("level", &self.level())
            .field("path", &self.path())
            .finish()
    }
}

impl ConfigObserver for FileLogger {
    fn on_set(&self, key: &ConfigKey, value: &ConfigValue) {
        self.observe(format!("Setting Config['{}'] to \"{}\"", key, value));
    }

    fn on_get(&self, key: &ConfigKey, found: bool) {
        if found {
            self.observe(format!("Getting Config['{}']", key));
        } else {
            self.observe(format!("Getting Config['{}'] (not set)", key));
        }
    }

    fn on_clear(&self) {
        self.observe("Clearing config".to_string());
    }
}

/// Returns the default file name for today, `YYYY-MM-DD.log`.
pub fn default_filename() -> String {
    Local::now().format("%Y-%m-%d.log").to_string()
}

fn open_log_file(directory: &Path, filename: Option<&str>) -> Result<(File, PathBuf)> {
    if !directory.is_dir() {
        fs::create_dir_all(directory).map_err(|e| UtilError::DirectoryCreate {
            path: directory.to_path_buf(),
            source: e,
        })?;
        tracing::debug!("Created log directory {}", directory.display());
    }

    if !is_writable(directory) {
        return Err(UtilError::DirectoryNotWritable {
            path: directory.to_path_buf(),
        });
    }

    let path = match filename {
        Some(name) => directory.join(name),
        None => directory.join(default_filename()),
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| UtilError::FileOpen {
            path: path.clone(),
            source: e,
        })?;

    Ok((file, path))
}

/// Asks the OS whether this process may create files in `directory`.
#[cfg(unix)]
fn is_writable(directory: &Path) -> bool {
    use nix::unistd::{access, AccessFlags};

    access(directory, AccessFlags::W_OK | AccessFlags::X_OK).is_ok()
}

#[cfg(not(unix))]
fn is_writable(directory: &Path) -> bool {
    fs::metadata(directory)
        .map(|metadata| !metadata.permissions().readonly())
        .unwrap_or(false)
}

/// Builds one log line, including the trailing newline.
fn format_line(
    level: LogLevel,
    message: &LogMessage,
    remote: Option<&str>,
    ansi_labels: bool,
    now: DateTime<Local>,
) -> String {
    if level == LogLevel::Custom {
        return format!("{}\n", message);
    }

    let label = if ansi_labels {
        level.ansi_label()
    } else {
        level.label().to_string()
    };

    format!(
        "{} [IP: {:<width$}] {} - {}\n",
        now.format("%d/%m/%Y %H:%M:%S"),
        remote.unwrap_or(""),
        label,
        message,
        width = ADDRESS_WIDTH
    )
}

/// Settings for opening a [`FileLogger`].
///
/// Can be deserialized from JSON or read from a [`ConfigStore`] under the
/// `log.` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// Directory holding the log file.
    pub directory: PathBuf,
    /// File name; `None` means a date-named file.
    pub filename: Option<String>,
    /// Severity threshold.
    pub level: LogLevel,
    /// Whether labels carry ANSI colour codes.
    pub ansi_labels: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
            filename: None,
            level: LogLevel::default(),
            ansi_labels: false,
        }
    }
}

impl LoggerSettings {
    /// Config key for the log directory.
    pub const DIRECTORY_KEY: &'static str = "log.directory";
    /// Config key for the log file name.
    pub const FILENAME_KEY: &'static str = "log.filename";
    /// Config key for the threshold, a level name or number.
    pub const LEVEL_KEY: &'static str = "log.level";
    /// Config key for coloured labels.
    pub const ANSI_LABELS_KEY: &'static str = "log.ansi_labels";

    /// Default settings with the directory set to the platform's local data
    /// directory for the application, e.g. `~/.local/share/myapp/logs` on
    /// Linux.
    ///
    /// Returns `None` if no home directory can be determined.
    pub fn for_project(qualifier: &str, organization: &str, application: &str) -> Option<Self> {
        let dirs = ProjectDirs::from(qualifier, organization, application)?;
        Some(Self {
            directory: dirs.data_local_dir().join("logs"),
            ..Self::default()
        })
    }

    /// Reads settings from `store`, falling back to defaults for missing keys.
    ///
    /// # Errors
    ///
    /// `TypeConversionError` if a key holds the wrong kind of value, and
    /// `UndefinedLogLevel` if the level is not a known level.
    pub fn from_config(store: &ConfigStore) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(value) = store.in_config(Self::DIRECTORY_KEY) {
            settings.directory = PathBuf::from(value.as_str(Self::DIRECTORY_KEY)?);
        }
        if let Some(value) = store.in_config(Self::FILENAME_KEY) {
            if !value.is_null() {
                settings.filename = Some(value.as_str(Self::FILENAME_KEY)?.to_string());
            }
        }
        if let Some(value) = store.in_config(Self::LEVEL_KEY) {
            settings.level = match value {
                ConfigValue::String(name) => name.parse()?,
                ConfigValue::Integer(n) => i32::try_from(n)
                    .map_err(|_| UtilError::UndefinedLogLevel {
                        level: n.to_string(),
                    })
                    .and_then(LogLevel::try_from)?,
                ConfigValue::Unsigned(n) => {
                    return Err(UtilError::UndefinedLogLevel {
                        level: n.to_string(),
                    })
                }
                _ => return Err(UtilError::conversion(Self::LEVEL_KEY, "log level")),
            };
        }
        if let Some(value) = store.in_config(Self::ANSI_LABELS_KEY) {
            settings.ansi_labels = value.as_bool(Self::ANSI_LABELS_KEY)?;
        }

        Ok(settings)
    }
}
