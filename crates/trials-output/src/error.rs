//! Output error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while persisting artifacts.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize {what}")]
    Serialize {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
