//! Index data types.
//!
//! [`EndpointIndex`] is the only persisted artifact. Its JSON field names
//! (`operationId`, `has_requestBody`) are part of the on-disk format and
//! must not change.

use serde::{Deserialize, Serialize};

pub const DEFAULT_VERSION: &str = "unknown";
pub const DEFAULT_TITLE: &str = "Render API";

/// One flattened `(path, method)` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub path: String,
    /// Uppercased HTTP verb.
    pub method: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "operationId", default)]
    pub operation_id: String,
    #[serde(default)]
    pub security_required: bool,
    #[serde(default)]
    pub parameters_count: usize,
    #[serde(rename = "has_requestBody", default)]
    pub has_request_body: bool,
    #[serde(default)]
    pub deprecated: bool,
}

impl EndpointRecord {
    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }

    /// Text searched by the query engine: path, method, summary,
    /// description, operationId and tags, space-joined in that order.
    pub fn searchable_text(&self) -> String {
        let tags = self.tags.join(" ");
        [
            self.path.as_str(),
            self.method.as_str(),
            self.summary.as_str(),
            self.description.as_str(),
            self.operation_id.as_str(),
            tags.as_str(),
        ]
        .join(" ")
    }
}

/// The full index: schema metadata plus endpoints sorted by `(path, method)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointIndex {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointRecord>,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}
fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for EndpointIndex {
    fn default() -> Self {
        Self {
            version: default_version(),
            title: default_title(),
            endpoints: Vec::new(),
        }
    }
}

#[cfg(test)]
pub(crate) fn record(path: &str, method: &str, tags: &[&str]) -> EndpointRecord {
    EndpointRecord {
        path: path.to_string(),
        method: method.to_string(),
        summary: String::new(),
        description: String::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        operation_id: String::new(),
        security_required: false,
        parameters_count: 0,
        has_request_body: false,
        deprecated: false,
    }
}
