//! Errors raised while loading a spacer plate configuration.
//!
//! Script output errors live in [`crate::scad::error`].

use std::path::PathBuf;

use thiserror::Error;

/// Why a spacer plate configuration could not be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but reading it failed.
    #[error("cannot read spacer config {path}")]
    ReadError {
        /// Config file that was being read.
        path: PathBuf,
        /// I/O failure from the filesystem.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON, or has fields the plate does not know.
    #[error("spacer config {path} is not valid JSON for a plate")]
    ParseError {
        /// Config file that was being parsed.
        path: PathBuf,
        /// Position and cause reported by `serde_json`.
        #[source]
        source: serde_json::Error,
    },

    /// An explicitly named config file does not exist.
    #[error("no spacer config at {path}")]
    NotFound {
        /// Path given on the command line.
        path: PathBuf,
    },

    /// The config parsed, but describes a plate or output that cannot be built
    /// (unknown cell format, zero cells, too few segments, ...).
    #[error("invalid plate configuration: {message}")]
    ValidationError {
        /// Which setting was rejected and why.
        message: String,
    },
}
