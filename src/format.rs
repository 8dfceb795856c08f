//! Plain-text rendering for search results, listings, and statistics.
//!
//! Renderers return a `String` ending in a newline; the binary decides where
//! to print it. Nothing here touches stdout directly.

use crate::models::{EndpointIndex, EndpointRecord};
use crate::query::ApiStats;

/// Descriptions longer than this are cut to `DESCRIPTION_KEEP` chars plus `...`.
const DESCRIPTION_MAX: usize = 100;
const DESCRIPTION_KEEP: usize = 97;
const DETAIL_INDENT: &str = "        ";

// ============ Single record ============

/// Render one endpoint as a multi-line block (no trailing newline).
pub fn format_record(ep: &EndpointRecord, show_description: bool) -> String {
    let mut lines = vec![format!("{:<7} {}", ep.method, ep.path)];

    if !ep.summary.is_empty() {
        lines.push(format!("{DETAIL_INDENT}Summary: {}", ep.summary));
    }

    if show_description && !ep.description.is_empty() && ep.description != ep.summary {
        lines.push(format!(
            "{DETAIL_INDENT}Description: {}",
            truncate_description(&ep.description)
        ));
    }

    if !ep.tags.is_empty() {
        lines.push(format!("{DETAIL_INDENT}Tags: {}", ep.tags.join(", ")));
    }

    let mut meta = Vec::new();
    if ep.security_required {
        meta.push("Auth required".to_string());
    }
    if ep.parameters_count > 0 {
        meta.push(format!("{} params", ep.parameters_count));
    }
    if ep.has_request_body {
        meta.push("Has request body".to_string());
    }
    if ep.deprecated {
        meta.push("DEPRECATED".to_string());
    }
    if !meta.is_empty() {
        lines.push(format!("{DETAIL_INDENT}{}", meta.join(" | ")));
    }

    lines.join("\n")
}

fn truncate_description(desc: &str) -> String {
    if desc.chars().count() > DESCRIPTION_MAX {
        let kept: String = desc.chars().take(DESCRIPTION_KEEP).collect();
        format!("{kept}...")
    } else {
        desc.to_string()
    }
}

// ============ Result sets ============

/// Render search results with a count header and an optional cap.
///
/// `limit: None` shows everything. When the cap hides results a footer
/// says how many and how to see them.
pub fn format_result_set(
    results: &[&EndpointRecord],
    query: &str,
    category: Option<&str>,
    limit: Option<usize>,
) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "Found {} endpoint(s) matching '{}'\n",
        results.len(),
        query
    ));
    if let Some(c) = category {
        out.push_str(&format!("  (filtered by category: {c})\n"));
    }
    out.push('\n');

    if results.is_empty() {
        out.push_str("No matching endpoints found. Try:\n");
        out.push_str("  - Different search terms\n");
        out.push_str("  - Broader search (remove --category filter)\n");
        out.push_str("  - List all endpoints: apidex search --list-endpoints\n");
        return out;
    }

    let shown = match limit {
        Some(n) => &results[..results.len().min(n)],
        None => results,
    };

    let blocks: Vec<String> = shown.iter().map(|ep| format_record(ep, true)).collect();
    out.push_str(&blocks.join("\n\n"));
    out.push('\n');

    let hidden = results.len() - shown.len();
    if hidden > 0 {
        out.push_str(&format!("\n... and {hidden} more result(s).\n"));
        out.push_str("Use --all to see all results, or refine your search.\n");
    }

    out
}

// ============ Listing & stats ============

/// One line per endpoint, deprecated ones marked.
pub fn format_listing(index: &EndpointIndex, endpoints: &[&EndpointRecord]) -> String {
    let mut out = format!(
        "API: {} v{}\nTotal endpoints: {}\n\n",
        index.title,
        index.version,
        endpoints.len()
    );
    for ep in endpoints {
        let marker = if ep.deprecated { " [DEPRECATED]" } else { "" };
        out.push_str(&format!("{:<7} {}{}\n", ep.method, ep.path, marker));
    }
    out
}

pub fn format_stats(index: &EndpointIndex, stats: &ApiStats) -> String {
    let mut out = format!(
        "API: {} v{}\n\nTotal Endpoints: {}\n\nBy Method:\n",
        index.title, index.version, stats.total
    );
    for (method, count) in &stats.method_counts {
        out.push_str(&format!("  {method:<7} {count}\n"));
    }

    out.push_str("\nBy Category (Tag):\n");
    for (tag, count) in stats.tags_by_count() {
        out.push_str(&format!("  {tag:<30} {count}\n"));
    }
    out
}
