//! Index persistence as a single pretty-printed JSON file.
//!
//! Writes go through a temporary file in the destination directory that is
//! renamed over the target, so a failed build never leaves a truncated
//! index behind.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{IndexError, Result};
use crate::models::EndpointIndex;

#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `index` and atomically replace the file on disk.
    pub fn save(&self, index: &EndpointIndex) -> Result<()> {
        let mut json =
            serde_json::to_string_pretty(index).map_err(|source| self.encode_err(source))?;
        json.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|source| self.io_err(source))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|source| self.io_err(source))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|source| self.io_err(source))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_err(e.error))?;

        Ok(())
    }

    /// Read the index back. A missing file points the caller at the build step.
    pub fn load(&self) -> Result<EndpointIndex> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            IndexError::from_read(
                self.path.clone(),
                source,
                "Run `apidex build` to generate the endpoint index.",
            )
        })?;

        serde_json::from_str(&content).map_err(|source| IndexError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Serialization failures are write failures, not bad file contents.
    fn encode_err(&self, source: serde_json::Error) -> IndexError {
        self.io_err(std::io::Error::from(source))
    }

    fn io_err(&self, source: std::io::Error) -> IndexError {
        IndexError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
