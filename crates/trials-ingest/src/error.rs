//! Ingestion error types.
//!
//! [`IngestError`] covers discovery and file-open failures; [`DecodeError`]
//! covers everything a decoder can report. Decode errors split into
//! recoverable per-record failures (one bad array element or NDJSON line)
//! and fatal per-file failures (broken array structure, unparseable single
//! object, I/O); [`DecodeError::is_fatal`] is the distinction the pipeline
//! acts on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Discovery and file-access failures.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input directory does not exist or is not a directory. This is the
    /// one run-aborting condition.
    #[error("input directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read input directory {path}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Failures reported while decoding one input file.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// One array element was not valid JSON; decoding continues with the
    /// next element.
    #[error("array element {index} is not valid JSON: {source}")]
    Element {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// One NDJSON line was not valid JSON; decoding continues with the next
    /// line.
    #[error("line {line} is not valid JSON: {source}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The top-level array syntax itself is broken; the rest of the file is
    /// undecodable.
    #[error("malformed JSON array: {detail}")]
    Structure { detail: String },

    /// A single-object file failed to parse as one JSON value.
    #[error("invalid JSON document: {source}")]
    Document {
        #[source]
        source: serde_json::Error,
    },

    /// Reading the file failed mid-stream.
    #[error("read failed: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl DecodeError {
    /// Whether this failure ends the file (as opposed to skipping one
    /// record).
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Structure { .. } | Self::Document { .. } | Self::Io { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatality_split() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(
            !DecodeError::Element {
                index: 0,
                source: bad_json,
            }
            .is_fatal()
        );
        let bad_line = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        assert!(
            !DecodeError::Line {
                line: 3,
                source: bad_line,
            }
            .is_fatal()
        );
        assert!(
            DecodeError::Structure {
                detail: "expected ',' or ']'".to_string(),
            }
            .is_fatal()
        );
    }
}
