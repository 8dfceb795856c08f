//! Error taxonomy shared by the loader, store, and query engine.
//!
//! Every variant names the file (or pattern) involved; the underlying
//! parser or OS error is attached as the `source`, so `{:#}` prints both.
//! The index builder never produces these: malformed schema entries degrade
//! to defaults instead of failing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for api-index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Debug, Error)]
pub enum IndexError {
    /// An expected artifact is missing. `hint` names the step that creates it.
    #[error("file not found at {}. {hint}", .path.display())]
    NotFound { path: PathBuf, hint: String },

    /// The file exists but is not valid JSON (or not the expected shape).
    #[error("invalid JSON in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any read or write failure other than absence.
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The user-supplied search pattern does not compile.
    #[error("invalid search pattern '{pattern}'")]
    Query {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl IndexError {
    /// Map an I/O error to `NotFound` when the file is absent, `Io` otherwise.
    pub(crate) fn from_read(path: PathBuf, source: std::io::Error, hint: &str) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            IndexError::NotFound {
                path,
                hint: hint.to_string(),
            }
        } else {
            IndexError::Io { path, source }
        }
    }
}
