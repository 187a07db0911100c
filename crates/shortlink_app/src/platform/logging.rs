//! Platform logging initialization for the shortlink binary.
//!
//! The terminal belongs to the UI, so logs go to a file in the current
//! working directory.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

pub const LOG_FILE: &str = "./shortlink.log";

/// Installs a file logger at `path`. Logging is skipped (with a warning on
/// stderr) when the file cannot be created.
pub fn initialize(path: &Path) {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            return;
        }
    };

    let _ = WriteLogger::init(shortlink_logging::default_level(), build_config(), file);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        // reqwest/hyper internals are noise at debug level.
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .add_filter_ignore_str("rustls")
        .build()
}
