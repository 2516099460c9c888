// SPDX-License-Identifier: MIT OR Apache-2.0

//! Start-up example for a small site.
//!
//! This example demonstrates:
//! - Writing and loading a JSON config file
//! - Opening a file logger from settings held in config
//! - Registering the logger and config in a dependency container
//! - Logging a request with the client address in every line
//! - Validating user input
//!
//! To run this example:
//! ```bash
//! cargo run --example startup
//! ```

use serde_json::json;
use sitekit::prelude::*;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

struct Site {
    config_file: PathBuf,
}

impl Populate for Site {
    fn populate(&self, container: &mut DependencyContainer) -> Result<()> {
        let config = ConfigStore::new();
        config.load_json_file(&self.config_file, &JsonFile::new())?;

        let settings = LoggerSettings::from_config(&config)?;
        let log = Arc::new(FileLogger::new().with_remote_address(Arc::new(RequestRemoteAddress)));
        log.init_with(&settings)?;
        config.set_observer(Some(log.clone() as Arc<dyn ConfigObserver>));

        container.add_shared("log", log);
        container.add("config", config);
        container.add("json", JsonFile::new().pretty());
        Ok(())
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== sitekit: Start-up ===\n");

    let root = std::env::temp_dir().join("sitekit-startup");
    let config_file = root.join("config.json");
    std::fs::create_dir_all(&root)?;

    JsonFile::new().pretty().write_to_file(
        &json!({
            "site.name": "Example Site",
            "log.directory": root.join("logs").to_string_lossy(),
            "log.filename": "site.log",
            "log.level": "info"
        }),
        &config_file,
    )?;
    println!("Config written to {}", config_file.display());

    let container = DependencyContainer::populated(&Site { config_file })?;
    println!("Container holds: {:?}\n", container);

    let config = container.get::<ConfigStore>("config")?;
    let log = container.get::<FileLogger>("log")?;

    let name = config.get_item("site.name")?;
    log.notice(format!("{} starting", name))?;

    println!("--- Handling a request ---");
    let peer: SocketAddr = "192.0.2.10:40000".parse().expect("valid socket address");
    {
        let _scope = RequestRemoteAddress::enter([("X-Forwarded-For", "203.0.113.20")], Some(peer));

        for input in ["someone@example.com", "not-an-address"] {
            if is_email(input) {
                log.info(format!("Accepted email {}", input))?;
            } else {
                log.warn(format!("Rejected email {}", input))?;
            }
        }

        if !is_date("31/02/2024", "dd/mm/yyyy") {
            log.warn("Rejected date 31/02/2024")?;
        }
    }

    log.debug("Not written at info")?;
    log.notice("Start-up complete")?;

    if let Some(path) = log.path() {
        println!("\n--- {} ---", path.display());
        print!("{}", std::fs::read_to_string(path)?);
    }

    Ok(())
}
