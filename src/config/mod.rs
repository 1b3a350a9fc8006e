//! Configuration file loading and parsing.
//!
//! This module handles loading the configuration file from disk and parsing
//! it into validated, type-safe structures.
//!
//! # Configuration File Locations
//!
//! The configuration file is searched in the following order:
//!
//! 1. Path given on the command line (must exist)
//! 2. Default location, if present:
//!    - **Linux/macOS:** `~/.battery-spacer/config.json`
//!    - **Windows:** `%USERPROFILE%\.battery-spacer\config.json`
//!
//! Without either, the built-in defaults describe a 6S5P staggered 18650
//! plate.
//!
//! # Example Configuration
//!
//! ```json
//! {
//!     "cell_format": "21700",
//!     "plate": { "series_cells": 4, "parallel_cells": 3, "slanted": false },
//!     "output": { "path": "pack.scad" },
//!     "logging": { "level": "info" }
//! }
//! ```

mod settings;

pub use settings::{Config, LoggingConfig, OutputConfig};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.battery-spacer/`
/// - **Windows:** `%USERPROFILE%\.battery-spacer\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".battery-spacer"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads and parses the configuration file.
///
/// If `path` is `None`, uses the platform-specific default location when a
/// file exists there, and the built-in defaults otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given file does not exist
/// - The file cannot be read
/// - The JSON is malformed or has unknown fields
/// - A value fails validation
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound {
                    path: p.to_path_buf(),
                });
            }
            p.to_path_buf()
        }
        None => match default_config_path().filter(|p| p.exists()) {
            Some(p) => p,
            None => {
                debug!("No configuration file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;

    let config = parse_config(&contents).map_err(|e| match e {
        ConfigError::ParseError { source, .. } => ConfigError::ParseError {
            path: config_path.clone(),
            source,
        },
        other => other,
    })?;

    debug!(path = %config_path.display(), "Loaded configuration");
    Ok(config)
}

/// Parses and validates configuration text.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] (with an empty path) for malformed
/// JSON and [`ConfigError::ValidationError`] for invalid values.
pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(contents).map_err(|e| ConfigError::ParseError {
        path: PathBuf::new(),
        source: e,
    })?;

    // Validate the configuration
    config.validate()?;

    Ok(config)
}
