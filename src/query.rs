//! Query engine over a loaded [`EndpointIndex`].
//!
//! All functions preserve the index order (`path`, then `method`); there is
//! no relevance ranking.
//!
//! Deprecated endpoints are treated differently per operation:
//! [`search`] always drops them, while [`list_endpoints`] and
//! [`compute_stats`] count them like any other record.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;

use crate::error::{IndexError, Result};
use crate::models::{EndpointIndex, EndpointRecord};

/// Tag used in statistics for endpoints that declare none.
pub const UNTAGGED: &str = "Untagged";

/// How a query string is matched against an endpoint's searchable text.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Case-insensitive substring; stored lowercased.
    Literal(String),
    /// Case-insensitive regular expression.
    Pattern(Regex),
}

impl Matcher {
    pub fn new(query: &str, exact: bool) -> Result<Self> {
        if exact {
            return Ok(Matcher::Literal(query.to_lowercase()));
        }
        RegexBuilder::new(query)
            .case_insensitive(true)
            .build()
            .map(Matcher::Pattern)
            .map_err(|source| IndexError::Query {
                pattern: query.to_string(),
                source,
            })
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Literal(needle) => text.to_lowercase().contains(needle.as_str()),
            Matcher::Pattern(re) => re.is_match(text),
        }
    }
}

/// Inputs for a single search.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    /// Require a tag equal to this (case-insensitive).
    pub category: Option<&'a str>,
    /// Literal substring instead of a regular expression.
    pub exact: bool,
}

/// Search non-deprecated endpoints for `req.query`.
pub fn search<'i>(
    index: &'i EndpointIndex,
    req: &SearchRequest<'_>,
) -> Result<Vec<&'i EndpointRecord>> {
    let matcher = Matcher::new(req.query, req.exact)?;

    Ok(index
        .endpoints
        .iter()
        .filter(|ep| !ep.deprecated)
        .filter(|ep| matcher.is_match(&ep.searchable_text()))
        .filter(|ep| req.category.map_or(true, |c| ep.has_tag(c)))
        .collect())
}

/// All endpoints, deprecated included, optionally restricted to one tag.
pub fn list_endpoints<'i>(
    index: &'i EndpointIndex,
    tag: Option<&str>,
) -> Vec<&'i EndpointRecord> {
    index
        .endpoints
        .iter()
        .filter(|ep| tag.map_or(true, |t| ep.has_tag(t)))
        .collect()
}

/// Per-method and per-tag endpoint counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiStats {
    pub total: usize,
    pub method_counts: BTreeMap<String, usize>,
    pub tag_counts: BTreeMap<String, usize>,
}

impl ApiStats {
    /// Tag counts ordered by count descending, then tag name.
    pub fn tags_by_count(&self) -> Vec<(&str, usize)> {
        let mut tags: Vec<(&str, usize)> = self
            .tag_counts
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags
    }
}

pub fn compute_stats(index: &EndpointIndex) -> ApiStats {
    let mut stats = ApiStats {
        total: index.endpoints.len(),
        ..ApiStats::default()
    };

    for ep in &index.endpoints {
        *stats.method_counts.entry(ep.method.clone()).or_insert(0) += 1;

        if ep.tags.is_empty() {
            *stats.tag_counts.entry(UNTAGGED.to_string()).or_insert(0) += 1;
        }
        for tag in &ep.tags {
            *stats.tag_counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record;

    fn sample_index() -> EndpointIndex {
        let mut services = record("/services", "GET", &["Services"]);
        services.summary = "List services".to_string();
        services.operation_id = "listServices".to_string();

        let mut deploys = record("/deploys", "POST", &["Deploys"]);
        deploys.summary = "Trigger a deploy".to_string();
        deploys.security_required = true;
        deploys.deprecated = true;

        let mut postgres = record("/postgres", "GET", &["Postgres"]);
        postgres.summary = "List Postgres instances".to_string();

        let mut service_deploys = record(
            "/services/{serviceId}/deploys",
            "GET",
            &["Deploys", "Services"],
        );
        service_deploys.summary = "List deploys".to_string();

        let untagged = record("/version", "GET", &[]);

        let mut endpoints = vec![services, deploys, postgres, service_deploys, untagged];
        endpoints.sort_by(|a, b| (&a.path, &a.method).cmp(&(&b.path, &b.method)));
        EndpointIndex {
            version: "1.0.0".to_string(),
            title: "Render API".to_string(),
            endpoints,
        }
    }

    fn req(query: &str) -> SearchRequest<'_> {
        SearchRequest {
            query,
            category: None,
            exact: false,
        }
    }

    fn paths(results: &[&EndpointRecord]) -> Vec<String> {
        results.iter().map(|e| e.path.clone()).collect()
    }

    #[test]
    fn test_search_excludes_deprecated() {
        let idx = sample_index();
        let results = search(&idx, &req("trigger")).unwrap();
        assert!(results.is_empty());

        for q in ["", ".", "deploy", "services"] {
            let results = search(&idx, &req(q)).unwrap();
            assert!(results.iter().all(|e| !e.deprecated), "query {q:?}");
        }
    }

    #[test]
    fn test_search_deploy_scenario() {
        let mut idx = sample_index();
        idx.endpoints.retain(|e| e.path == "/services" || e.path == "/deploys");
        assert!(search(&idx, &req("deploy")).unwrap().is_empty());
    }

    #[test]
    fn test_search_regex_case_insensitive() {
        let idx = sample_index();
        let results = search(&idx, &req("^/SERVICES")).unwrap();
        assert_eq!(
            paths(&results),
            vec!["/services", "/services/{serviceId}/deploys"]
        );

        let results = search(&idx, &req("postgres|version")).unwrap();
        assert_eq!(paths(&results), vec!["/postgres", "/version"]);
    }

    #[test]
    fn test_search_matches_method_and_operation_id() {
        let idx = sample_index();
        let results = search(&idx, &req("listservices")).unwrap();
        assert_eq!(paths(&results), vec!["/services"]);

        let results = search(&idx, &req("post ")).unwrap();
        assert!(results.is_empty(), "only deprecated POST exists");
    }

    #[test]
    fn test_search_exact_treats_metacharacters_literally() {
        let idx = sample_index();
        let results = search(
            &idx,
            &SearchRequest {
                query: "{SERVICEID}",
                category: None,
                exact: true,
            },
        )
        .unwrap();
        assert_eq!(paths(&results), vec!["/services/{serviceId}/deploys"]);

        let results = search(
            &idx,
            &SearchRequest {
                query: ".*",
                category: None,
                exact: true,
            },
        )
        .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_query_error() {
        let idx = sample_index();
        let err = search(&idx, &req("deploy(")).unwrap_err();
        assert!(matches!(err, IndexError::Query { .. }));

        assert!(search(
            &idx,
            &SearchRequest {
                query: "deploy(",
                category: None,
                exact: true,
            }
        )
        .is_ok());
    }

    #[test]
    fn test_category_filter() {
        let idx = sample_index();
        let filtered = search(
            &idx,
            &SearchRequest {
                query: "list",
                category: Some("deploys"),
                exact: false,
            },
        )
        .unwrap();
        assert_eq!(paths(&filtered), vec!["/services/{serviceId}/deploys"]);
    }

    #[test]
    fn test_category_absent_is_superset() {
        let idx = sample_index();
        for q in ["", "list", "services", "get"] {
            let all = search(&idx, &req(q)).unwrap();
            for c in ["Services", "deploys", "Postgres", "missing"] {
                let filtered = search(
                    &idx,
                    &SearchRequest {
                        query: q,
                        category: Some(c),
                        exact: false,
                    },
                )
                .unwrap();
                assert!(filtered.iter().all(|f| all.contains(f)), "q={q} c={c}");
            }
        }
    }

    #[test]
    fn test_list_endpoints_includes_deprecated() {
        let idx = sample_index();
        let all = list_endpoints(&idx, None);
        assert_eq!(all.len(), idx.endpoints.len());
        assert!(all.iter().any(|e| e.deprecated));

        let deploys = list_endpoints(&idx, Some("DEPLOYS"));
        assert_eq!(
            paths(&deploys),
            vec!["/deploys", "/services/{serviceId}/deploys"]
        );
    }

    #[test]
    fn test_list_endpoints_by_tag_scenario() {
        let mut idx = sample_index();
        idx.endpoints.retain(|e| e.path == "/services" || e.path == "/deploys");
        let services = list_endpoints(&idx, Some("Services"));
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].path, "/services");
        assert_eq!(services[0].method, "GET");
    }

    #[test]
    fn test_compute_stats() {
        let idx = sample_index();
        let stats = compute_stats(&idx);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.method_counts.get("GET"), Some(&4));
        assert_eq!(stats.method_counts.get("POST"), Some(&1));
        assert_eq!(stats.tag_counts.get("Deploys"), Some(&2));
        assert_eq!(stats.tag_counts.get("Services"), Some(&2));
        assert_eq!(stats.tag_counts.get(UNTAGGED), Some(&1));

        let ordered = stats.tags_by_count();
        assert_eq!(ordered[0], ("Deploys", 2));
        assert_eq!(ordered[1], ("Services", 2));
        assert_eq!(ordered.last().unwrap().1, 1);
    }
}
