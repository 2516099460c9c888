// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for the integration tests.

use sitekit::domain::{ConfigKey, ConfigValue};
use sitekit::ports::ConfigObserver;
use std::path::Path;
use std::sync::Mutex;

/// Reads a log file and returns its lines.
#[allow(dead_code)]
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Pattern matching a formatted log line at the given label.
#[allow(dead_code)]
pub fn line_pattern(label: &str, message: &str) -> regex::Regex {
    regex::Regex::new(&format!(
        r"^\d{{2}}/\d{{2}}/\d{{4}} \d{{2}}:\d{{2}}:\d{{2}} \[IP: (?:\S+\s*|\s{{15}})\] {} - {}$",
        regex::escape(label),
        regex::escape(message)
    ))
    .unwrap()
}

/// An observer that records every event it sees.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingObserver {
    /// Returns the recorded events in order.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ConfigObserver for RecordingObserver {
    fn on_set(&self, key: &ConfigKey, value: &ConfigValue) {
        self.events.lock().unwrap().push(format!("set {}={}", key, value));
    }

    fn on_get(&self, key: &ConfigKey, found: bool) {
        self.events.lock().unwrap().push(format!("get {} {}", key, found));
    }

    fn on_clear(&self) {
        self.events.lock().unwrap().push("clear".to_string());
    }
}
