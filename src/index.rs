//! Index builder: flattens a schema document into sorted endpoint records.
//!
//! Building never fails. Missing or malformed entries are logged and either
//! skipped (a path item that is not an object) or indexed with defaults
//! (an operation with wrongly typed fields).

use tracing::{debug, warn};

use crate::models::{EndpointIndex, EndpointRecord};
use crate::schema::{Operation, SchemaDocument, HTTP_METHODS};

/// Build the endpoint index for `schema`.
///
/// Records are sorted by `(path, method)` so repeated builds of the same
/// schema serialize byte-for-byte identically.
pub fn build_index(schema: &SchemaDocument) -> EndpointIndex {
    let info = schema.info();
    let global_security = schema.has_global_security();

    let mut endpoints = Vec::new();

    match schema.paths() {
        Some(paths) if !paths.is_empty() => {
            for (path, path_item) in paths {
                let Some(item) = path_item.as_object() else {
                    warn!(path = %path, "Skipping path item that is not an object");
                    continue;
                };

                for method in HTTP_METHODS {
                    let Some(raw) = item.get(method) else {
                        continue;
                    };
                    if !raw.is_object() {
                        warn!(
                            path = %path,
                            method,
                            "Operation is not an object; indexing with defaults"
                        );
                    }
                    let op = Operation::from_value(raw);
                    endpoints.push(to_record(path, method, op, global_security));
                }
            }
        }
        _ => warn!("No paths found in schema"),
    }

    endpoints.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.method.cmp(&b.method)));

    debug!(
        endpoints = endpoints.len(),
        global_security, "Built endpoint index"
    );

    EndpointIndex {
        version: info.version,
        title: info.title,
        endpoints,
    }
}

fn to_record(path: &str, method: &str, op: Operation, global_security: bool) -> EndpointRecord {
    EndpointRecord {
        path: path.to_string(),
        method: method.to_uppercase(),
        summary: op.summary,
        description: op.description,
        tags: op.tags,
        operation_id: op.operation_id,
        security_required: op.declares_security || global_security,
        parameters_count: op.parameters_count,
        has_request_body: op.has_request_body,
        deprecated: op.deprecated,
    }
}
