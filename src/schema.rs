//! Schema loading and typed views over the raw OpenAPI document.
//!
//! The document is kept as a `serde_json::Value` because only a handful of
//! keys matter and any of them may be missing or wrongly typed. The views
//! ([`SchemaInfo`], [`Operation`]) coerce those keys once, with a default
//! for every field, so the index builder never touches raw JSON.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{IndexError, Result};
use crate::models::{DEFAULT_TITLE, DEFAULT_VERSION};

/// HTTP methods recognised under a path item, in indexing order.
pub const HTTP_METHODS: [&str; 7] = ["get", "post", "put", "patch", "delete", "head", "options"];

/// Reads the schema document from a configured location.
#[derive(Debug, Clone)]
pub struct SchemaLoader {
    path: PathBuf,
}

impl SchemaLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SchemaDocument> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            IndexError::from_read(
                self.path.clone(),
                source,
                "Run the schema fetch step first to download it.",
            )
        })?;

        let value: Value = serde_json::from_str(&content).map_err(|source| IndexError::Parse {
            path: self.path.clone(),
            source,
        })?;

        Ok(SchemaDocument(value))
    }
}

/// A parsed but unvalidated OpenAPI document.
#[derive(Debug, Clone)]
pub struct SchemaDocument(pub Value);

impl SchemaDocument {
    pub fn info(&self) -> SchemaInfo {
        SchemaInfo::from_value(self.0.get("info"))
    }

    /// True when the document declares a top-level `security` key or a
    /// non-empty `components.securitySchemes` mapping.
    pub fn has_global_security(&self) -> bool {
        if self.0.get("security").is_some() {
            return true;
        }
        self.0
            .get("components")
            .and_then(|c| c.get("securitySchemes"))
            .and_then(Value::as_object)
            .is_some_and(|schemes| !schemes.is_empty())
    }

    /// The `paths` mapping, or `None` when absent or not an object.
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.0.get("paths").and_then(Value::as_object)
    }
}

/// `info.version` / `info.title` with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaInfo {
    pub version: String,
    pub title: String,
}

impl SchemaInfo {
    fn from_value(info: Option<&Value>) -> Self {
        let field = |key: &str, default: &str| {
            info.and_then(|i| i.get(key))
                .and_then(Value::as_str)
                .unwrap_or(default)
                .to_string()
        };
        Self {
            version: field("version", DEFAULT_VERSION),
            title: field("title", DEFAULT_TITLE),
        }
    }
}

/// The fields of one operation that the index keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operation {
    pub summary: String,
    pub description: String,
    pub tags: Vec<String>,
    pub operation_id: String,
    pub parameters_count: usize,
    pub has_request_body: bool,
    pub deprecated: bool,
    /// Operation-level `security` override is present (even if empty).
    pub declares_security: bool,
}

impl Operation {
    /// Coerce a raw operation object. Non-object values yield all defaults;
    /// wrongly typed fields are treated as absent.
    pub fn from_value(value: &Value) -> Self {
        let Some(op) = value.as_object() else {
            return Self::default();
        };

        let text = |key: &str| {
            op.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let tags = op
            .get("tags")
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|t| t.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            summary: text("summary"),
            description: text("description"),
            tags,
            operation_id: text("operationId"),
            parameters_count: op
                .get("parameters")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            has_request_body: op.contains_key("requestBody"),
            deprecated: op
                .get("deprecated")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            declares_security: op.contains_key("security"),
        }
    }
}
