//! # api-index
//!
//! Flattens an OpenAPI document into a small, sorted endpoint index and
//! answers keyword, tag, and statistics queries against it without
//! re-reading the full schema.
//!
//! ## Architecture
//!
//! ```text
//!  build phase (once per schema update)
//!  ┌──────────────┐   ┌───────────────┐   ┌──────────────┐
//!  │ SchemaLoader │──▶│  build_index  │──▶│  IndexStore  │──▶ endpoints-index.json
//!  └──────────────┘   └───────────────┘   └──────────────┘
//!
//!  query phase (every invocation)
//!  ┌──────────────┐   ┌───────────────┐   ┌──────────────┐
//!  │  IndexStore  │──▶│ search / list │──▶│    format    │──▶ stdout
//!  └──────────────┘   │    / stats    │   └──────────────┘
//!                     └───────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! apidex build                          # schema -> index
//! apidex search postgres                # regex search
//! apidex search deploy --category Services
//! apidex search --list-endpoints --tag Owners
//! apidex search --stats
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration (file locations, default limit) |
//! | [`error`] | Error taxonomy |
//! | [`models`] | Endpoint record and index types |
//! | [`schema`] | Schema loading and typed operation views |
//! | [`index`] | Schema → index flattening |
//! | [`store`] | Index persistence |
//! | [`query`] | Search, listing, statistics |
//! | [`format`] | Text rendering |
//! | [`logging`] | stderr diagnostics |

pub mod config;
pub mod error;
pub mod format;
pub mod index;
pub mod logging;
pub mod models;
pub mod query;
pub mod schema;
pub mod store;

pub use error::{IndexError, Result};
pub use index::build_index;
pub use models::{EndpointIndex, EndpointRecord};
pub use query::{compute_stats, list_endpoints, search, ApiStats, Matcher, SearchRequest};
pub use schema::{SchemaDocument, SchemaLoader};
pub use store::IndexStore;
