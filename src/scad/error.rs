//! Error types for script output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for script output.
pub type ScadResult<T> = Result<T, ScadError>;

/// Errors that can occur while writing a script.
#[derive(Debug, Error)]
pub enum ScadError {
    /// Failed to create or write the output file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write to standard output.
    #[error("Failed to write to stdout")]
    Stdout {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ScadError {
    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}
