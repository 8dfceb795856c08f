//! TOML configuration for file locations and search defaults.
//!
//! Every key is optional. When no config file exists the built-in defaults
//! point at the conventional `assets/schema/` layout.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{IndexError, Result};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    /// Raw OpenAPI document produced by the fetch step.
    #[serde(default = "default_schema_path")]
    pub schema: PathBuf,
    /// Flattened endpoint index written by `apidex build`.
    #[serde(default = "default_index_path")]
    pub index: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            schema: default_schema_path(),
            index: default_index_path(),
        }
    }
}

fn default_schema_path() -> PathBuf {
    PathBuf::from("assets/schema/render-api-schema.json")
}
fn default_index_path() -> PathBuf {
    PathBuf::from("assets/schema/endpoints-index.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    10
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        IndexError::from_read(path.to_path_buf(), source, "Check the --config argument.")
    })?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| IndexError::Config(format!("{}: {}", path.display(), e)))?;

    if config.search.default_limit == 0 {
        return Err(IndexError::Config(
            "search.default_limit must be >= 1".to_string(),
        ));
    }

    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to the defaults.
///
/// Used for the implicit default location; an explicit `--config` goes
/// through [`load_config`] so a typo is reported instead of ignored.
pub fn load_config_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_sections_missing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("apidex.toml");
        fs::write(&path, "").unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.paths.schema, default_schema_path());
        assert_eq!(cfg.paths.index, default_index_path());
        assert_eq!(cfg.search.default_limit, 10);
    }

    #[test]
    fn test_partial_override() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("apidex.toml");
        fs::write(
            &path,
            "[paths]\nindex = \"/tmp/idx.json\"\n\n[search]\ndefault_limit = 25\n",
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.paths.schema, default_schema_path());
        assert_eq!(cfg.paths.index, PathBuf::from("/tmp/idx.json"));
        assert_eq!(cfg.search.default_limit, 25);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("apidex.toml");
        fs::write(&path, "[search]\ndefault_limit = 0\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, IndexError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_config_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, IndexError::NotFound { .. }));
    }

    #[test]
    fn test_missing_default_config_falls_back() {
        let tmp = TempDir::new().unwrap();
        let cfg = load_config_or_default(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.search.default_limit, 10);
    }
}
