//! # apidex CLI
//!
//! Builds the endpoint index from a downloaded OpenAPI schema and searches
//! it.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `apidex build` | Flatten the schema into the endpoint index |
//! | `apidex search "<query>"` | Regex (or `--exact` substring) search |
//! | `apidex search --list-endpoints` | List every endpoint, optionally by `--tag` |
//! | `apidex search --stats` | Endpoint counts by method and tag |
//!
//! ## Exit status
//!
//! `0` on success, `1` on any error or a missing query, `130` when
//! interrupted with Ctrl+C. Errors go to stderr; stdout carries results only.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use api_index::config::{self, Config};
use api_index::format::{format_listing, format_result_set, format_stats};
use api_index::logging::init_logging;
use api_index::{build_index, compute_stats, search, IndexStore, SchemaLoader, SearchRequest};

const DEFAULT_CONFIG_PATH: &str = "./config/apidex.toml";
const EXIT_INTERRUPTED: i32 = 130;

/// apidex: index an OpenAPI schema once, search it quickly.
#[derive(Parser)]
#[command(
    name = "apidex",
    about = "Index an OpenAPI schema into a flat endpoint list and search it",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When omitted, `./config/apidex.toml` is used if it exists, otherwise
    /// built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the schema file location.
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    /// Override the index file location.
    #[arg(long, global = true)]
    index: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the endpoint index from the schema file.
    ///
    /// Rewrites the index in full; running it twice on the same schema
    /// produces identical output.
    Build,

    /// Search, list, or summarise indexed endpoints.
    ///
    /// Deprecated endpoints are excluded from search results but included in
    /// `--list-endpoints` and `--stats`.
    Search {
        /// Search term (a case-insensitive regular expression unless --exact).
        query: Option<String>,

        /// Filter by category/tag (case-insensitive).
        #[arg(long, visible_alias = "tag")]
        category: Option<String>,

        /// Match the query as a literal substring.
        #[arg(short, long)]
        exact: bool,

        /// Maximum results to show (default from config, 10).
        #[arg(short = 'n', long, value_parser = parse_limit)]
        limit: Option<usize>,

        /// Show all results (no limit).
        #[arg(short, long)]
        all: bool,

        /// List all endpoints.
        #[arg(short, long = "list-endpoints")]
        list_endpoints: bool,

        /// Show API statistics.
        #[arg(short, long)]
        stats: bool,
    },
}

/// Parse `--limit`, rejecting zero.
fn parse_limit(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("invalid limit '{}': expected a positive integer", s))?;
    if n == 0 {
        return Err("limit must be >= 1 (use --all for no limit)".to_string());
    }
    Ok(n)
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    // The work is synchronous; run it off the async thread so Ctrl+C can
    // win the race and exit with the conventional status.
    let work = tokio::task::spawn_blocking(move || run(cli));

    let code = tokio::select! {
        joined = work => match joined {
            Ok(Ok(code)) => code,
            Ok(Err(err)) => {
                eprintln!("Error: {:#}", err);
                1
            }
            Err(err) => {
                eprintln!("Unexpected error: {}", err);
                1
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted by user");
            EXIT_INTERRUPTED
        }
    };

    let _ = std::io::stdout().flush();
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let cfg = resolve_config(&cli)?;

    match cli.command {
        Commands::Build => {
            run_build(&cfg)?;
            Ok(0)
        }
        Commands::Search {
            query,
            category,
            exact,
            limit,
            all,
            list_endpoints,
            stats,
        } => {
            let store = IndexStore::new(&cfg.paths.index);

            if stats {
                let index = store.load()?;
                print!("{}", format_stats(&index, &compute_stats(&index)));
                return Ok(0);
            }

            if list_endpoints {
                let index = store.load()?;
                let endpoints = api_index::list_endpoints(&index, category.as_deref());
                print!("{}", format_listing(&index, &endpoints));
                return Ok(0);
            }

            let Some(query) = query.filter(|q| !q.is_empty()) else {
                print_search_usage();
                return Ok(1);
            };

            let index = store.load()?;
            let req = SearchRequest {
                query: &query,
                category: category.as_deref(),
                exact,
            };
            let results = search(&index, &req)?;
            let cap = if all {
                None
            } else {
                Some(limit.unwrap_or(cfg.search.default_limit))
            };
            print!(
                "{}",
                format_result_set(&results, &query, category.as_deref(), cap)
            );
            Ok(0)
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_config_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
    };
    if let Some(schema) = &cli.schema {
        cfg.paths.schema = schema.clone();
    }
    if let Some(index) = &cli.index {
        cfg.paths.index = index.clone();
    }
    Ok(cfg)
}

fn run_build(cfg: &Config) -> Result<()> {
    let loader = SchemaLoader::new(&cfg.paths.schema);
    debug!(schema = %loader.path().display(), "Loading schema");
    let schema = loader.load()?;
    let index = build_index(&schema);

    let store = IndexStore::new(&cfg.paths.index);
    store.save(&index)?;

    println!("✓ Generated index with {} endpoints", index.endpoints.len());
    println!("  Index saved to: {}", store.path().display());
    Ok(())
}

fn print_search_usage() {
    let mut cmd = Cli::command();
    cmd.build();
    if let Some(search_cmd) = cmd.find_subcommand_mut("search") {
        eprintln!("{}", search_cmd.render_help());
    }
}
