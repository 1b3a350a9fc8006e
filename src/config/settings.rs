//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::layout::{standard_cell_diameter, LayoutParameters, ManufacturingConstants};
use crate::scad::{ScadOptions, DEFAULT_PRECISION};

/// Fewest circle segments that still describe a closed polygon.
const MIN_SEGMENTS: u32 = 3;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Standard cell format (e.g. "18650"). Overrides `plate.cell_diameter`.
    #[serde(default)]
    pub cell_format: Option<String>,

    /// Plate parameters.
    #[serde(default)]
    pub plate: LayoutParameters,

    /// Manufacturing constants.
    #[serde(default)]
    pub constants: ManufacturingConstants,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref format) = self.cell_format {
            if standard_cell_diameter(format).is_none() {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "cell_format '{format}' is not a known cell; use 14500, 18650, 20700, 21700, 26650 or 32700"
                    ),
                });
            }
        }

        self.layout_parameters()
            .check()
            .map_err(|message| ConfigError::ValidationError { message })?;

        if self.output.precision == 0 {
            return Err(ConfigError::ValidationError {
                message: "output.precision must be at least 1".to_string(),
            });
        }

        for (name, segments) in [
            ("cell_segments", self.output.cell_segments),
            ("hole_segments", self.output.hole_segments),
            ("ring_segments", self.output.ring_segments),
        ] {
            if segments < MIN_SEGMENTS {
                return Err(ConfigError::ValidationError {
                    message: format!("output.{name} must be at least {MIN_SEGMENTS}, got {segments}"),
                });
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Plate parameters with the cell format applied.
    #[must_use]
    pub fn layout_parameters(&self) -> LayoutParameters {
        let mut params = self.plate.clone();
        if let Some(diameter) = self.cell_format.as_deref().and_then(standard_cell_diameter) {
            params.cell_diameter = diameter;
        }
        params
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Script file to write.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Significant digits for emitted numbers.
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Circle segments for cell holes.
    #[serde(default = "default_fine_segments")]
    pub cell_segments: u32,

    /// Circle segments for balancer wire holes.
    #[serde(default = "default_hole_segments")]
    pub hole_segments: u32,

    /// Circle segments for insulation rings.
    #[serde(default = "default_fine_segments")]
    pub ring_segments: u32,
}

impl OutputConfig {
    /// Script rendering options.
    #[must_use]
    pub const fn scad_options(&self) -> ScadOptions {
        ScadOptions {
            precision: self.precision,
            cell_segments: self.cell_segments,
            hole_segments: self.hole_segments,
            ring_segments: self.ring_segments,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            precision: default_precision(),
            cell_segments: default_fine_segments(),
            hole_segments: default_hole_segments(),
            ring_segments: default_fine_segments(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("battery_spacer.scad")
}

const fn default_precision() -> usize {
    DEFAULT_PRECISION
}

const fn default_fine_segments() -> u32 {
    100
}

const fn default_hole_segments() -> u32 {
    40
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
