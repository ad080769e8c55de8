//! Dashboard Search - relevance search across dashboard business records
//!
//! This library answers free-text queries over an in-memory corpus of
//! projects, clients, tasks, communications, payments and invoices. It provides:
//!
//! - Weighted substring scoring per entity kind, with configurable field weights
//! - Kind, status and date filtering, plus a small filter expression language
//! - Ranking by score then recency, capped to a fixed result count
//! - A keyboard-driven search session with stale-result protection
//! - A bounded, deduplicated recent-query history over an injected store
//!
//! # Example
//!
//! ```no_run
//! use dashboard_search::{Query, SearchEngine, SearchFilters, load_corpus};
//! use std::path::Path;
//!
//! let corpus = load_corpus(Path::new("corpus.json"))?;
//! let query = Query::parse("banking", 3).expect("long enough");
//! for result in SearchEngine::default().search(&corpus, &query, &SearchFilters::default()) {
//!     println!("{} ({}) score {}", result.title, result.kind, result.score);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod recent;
pub mod search;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use config::{ConfigError, SearchConfig};
pub use filters::{SearchFilters, apply_filters, parse_filter};
pub use models::{Corpus, CorpusData, Entity, EntityKind, Query, SearchResult};
pub use parsers::load_corpus;
pub use recent::{FileStore, MemoryStore, RecentSearchStore, RecentSearches, StoreError};
pub use search::{SearchEngine, SearchOutcome, SearchRequest, WeightTable};
pub use session::{Action, NoopHandler, Phase, SearchDriver, SearchSession, SessionHandler};
