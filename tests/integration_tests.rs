// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the start-up flow.
//!
//! These tests wire the logger, config store, JSON codec and container together
//! the way an application does at start-up.

mod common;

use common::{line_pattern, read_lines, RecordingObserver};
use serde_json::json;
use sitekit::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

struct Site {
    log_dir: std::path::PathBuf,
    config_file: std::path::PathBuf,
}

impl Populate for Site {
    fn populate(&self, container: &mut DependencyContainer) -> Result<()> {
        let log = Arc::new(FileLogger::new());
        log.init(&self.log_dir, Some("site.log"), Some(LogLevel::Info))?;

        let config = ConfigStore::new().with_observer(log.clone());
        config.load_json_file(&self.config_file, &JsonFile::new())?;

        container.add_shared("log", log);
        container.add("config", config);
        container.add("json", JsonFile::new());
        Ok(())
    }
}

fn site(dir: &TempDir) -> Site {
    let config_file = dir.path().join("config.json");
    JsonFile::new()
        .write_to_file(
            &json!({"site.name": "demo", "site.debug": false, "mail": {"host": "smtp"}}),
            &config_file,
        )
        .unwrap();

    Site {
        log_dir: dir.path().join("logs"),
        config_file,
    }
}

#[test]
fn test_startup_registers_services() {
    let dir = TempDir::new().unwrap();
    let container = DependencyContainer::populated(&site(&dir)).unwrap();

    assert!(container.key_exists("log"));
    assert!(container.key_exists("config"));
    assert!(container.key_exists("json"));
    assert!(!container.key_exists("db"));

    let config = container.get::<ConfigStore>("config").unwrap();
    assert_eq!(config.size(), 3);
    assert_eq!(
        config.get_item("site.name").unwrap().as_str("site.name").unwrap(),
        "demo"
    );
    assert_eq!(config.in_config("site.debug"), Some(ConfigValue::Bool(false)));
}

#[test]
fn test_business_code_logs_through_container() {
    let dir = TempDir::new().unwrap();
    let container = DependencyContainer::populated(&site(&dir)).unwrap();

    let log = container.get::<FileLogger>("log").unwrap();
    log.error("payment failed").unwrap();
    log.debug("not written at info").unwrap();

    let lines = read_lines(&dir.path().join("logs/site.log"));
    // Three INFO lines from loading config, then the error.
    assert_eq!(lines.len(), 4);
    assert!(line_pattern("ERROR  ", "payment failed").is_match(&lines[3]));
}

#[test]
fn test_config_activity_is_logged() {
    let dir = TempDir::new().unwrap();
    let container = DependencyContainer::populated(&site(&dir)).unwrap();

    let config = container.get::<ConfigStore>("config").unwrap();
    let _ = config.in_config("missing.key");

    let lines = read_lines(&dir.path().join("logs/site.log"));
    assert!(lines
        .iter()
        .any(|l| l.ends_with("Setting Config['site.name'] to \"demo\"")));
    assert!(lines
        .last()
        .unwrap()
        .ends_with("Getting Config['missing.key'] (not set)"));
}

#[test]
fn test_registered_config_stays_writable() {
    let dir = TempDir::new().unwrap();
    let container = DependencyContainer::populated(&site(&dir)).unwrap();

    let config = container.get::<ConfigStore>("config").unwrap();
    config.set_item("site.maintenance", true);
    assert_eq!(
        container
            .get::<ConfigStore>("config")
            .unwrap()
            .in_config("site.maintenance"),
        Some(ConfigValue::Bool(true))
    );

    config.clear();
    assert!(container.get::<ConfigStore>("config").unwrap().is_empty());

    let lines = read_lines(&dir.path().join("logs/site.log"));
    assert!(lines
        .iter()
        .any(|l| l.ends_with("Setting Config['site.maintenance'] to \"true\"")));
    assert!(lines.last().unwrap().ends_with("Clearing config"));
}

#[test]
fn test_missing_element() {
    let dir = TempDir::new().unwrap();
    let container = DependencyContainer::populated(&site(&dir)).unwrap();

    assert!(matches!(
        container.get::<ConfigStore>("db"),
        Err(UtilError::ElementNotFound { .. })
    ));
    assert!(matches!(
        container.get::<ConfigStore>("log"),
        Err(UtilError::ElementTypeMismatch { .. })
    ));
}

#[test]
fn test_startup_fails_on_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let site = Site {
        log_dir: dir.path().join("logs"),
        config_file: dir.path().join("absent.json"),
    };

    let result = DependencyContainer::populated(&site);
    assert!(matches!(result, Err(UtilError::FileNotFound { .. })));
}

#[test]
fn test_logger_settings_from_loaded_config() {
    let dir = TempDir::new().unwrap();
    let config_file = dir.path().join("config.json");
    JsonFile::new()
        .pretty()
        .write_to_file(
            &json!({
                "log.directory": dir.path().join("var/log").to_string_lossy(),
                "log.filename": "app.log",
                "log.level": "warn"
            }),
            &config_file,
        )
        .unwrap();

    let config = ConfigStore::new();
    config.load_json_file(&config_file, &JsonFile::new()).unwrap();

    let log = FileLogger::from_settings(&LoggerSettings::from_config(&config).unwrap()).unwrap();
    log.info("hidden").unwrap();
    log.warn("shown").unwrap();

    let lines = read_lines(&dir.path().join("var/log/app.log"));
    assert_eq!(lines.len(), 1);
    assert!(line_pattern("WARNING", "shown").is_match(&lines[0]));
}

#[test]
fn test_json_round_trip_as_mapping() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    let json = JsonFile::new();

    let mut original = serde_json::Map::new();
    original.insert("b".to_string(), json!(1));
    original.insert("a".to_string(), json!([true, null, "x"]));
    original.insert("c".to_string(), json!({"nested": 2.5}));

    json.write_to_file(&original, &path).unwrap();
    assert_eq!(json.read_mapping(&path).unwrap(), original);
}

#[test]
fn test_config_store_round_trip_through_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dump.json");
    let json = JsonFile::new();

    let config = ConfigStore::new();
    config.set_item("name", "demo");
    config.set_item("port", 8080);
    config.set_item("ratio", 0.25);
    config.set_item("enabled", true);
    config.set_item("nothing", ConfigValue::Null);

    let dump: std::collections::BTreeMap<String, ConfigValue> = config
        .entries()
        .into_iter()
        .map(|(k, v)| (k.into_string(), v))
        .collect();
    json.write_to_file(&dump, &path).unwrap();

    let restored = ConfigStore::new();
    assert_eq!(restored.load_json_file(&path, &json).unwrap(), 5);
    assert_eq!(restored.entries(), config.entries());
}

#[test]
fn test_observer_sees_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("c.json");
    std::fs::write(&path, r#"{"only": 1}"#).unwrap();

    let recorder = Arc::new(RecordingObserver::default());
    let config = ConfigStore::new().with_observer(recorder.clone());
    config.load_json_file(&path, &JsonFile::new()).unwrap();
    config.clear();

    assert_eq!(recorder.events(), vec!["set only=1", "clear"]);
}

#[test]
fn test_validators_from_prelude() {
    assert!(is_email("test@test.co.uk"));
    assert!(!is_email("test@@test.com"));
    assert!(is_date("29/02/2000", "dd/mm/yyyy"));
    assert!(!is_date("29/02/2001", "dd/mm/yyyy"));
    assert!(!is_date("31/04/2000", "dd/mm/yyyy"));
}
