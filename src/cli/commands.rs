use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use super::format::{format_result_detail, format_results_table};
use crate::config::SearchConfig;
use crate::filters::{SearchFilters, parse_filter};
use crate::models::{Corpus, EntityKind, Query};
use crate::parsers::load_corpus;
use crate::recent::{FileStore, RecentSearchStore};
use crate::session::{NoopHandler, Phase};
use crate::utils::{format_path_with_tilde, get_data_dir};

#[derive(Parser)]
#[command(name = "dashboard-search")]
#[command(version)]
#[command(about = "Relevance search over dashboard projects, clients, tasks and billing", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one search and print the ranked results
    Search {
        /// Free text to look for
        query: String,
        /// Corpus JSON file
        #[arg(long)]
        corpus: PathBuf,
        /// Filter expression, e.g. "type:project status:active"
        #[arg(long)]
        filter: Option<String>,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Config JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show entity counts for a corpus
    Stats {
        #[arg(long)]
        corpus: PathBuf,
    },
    /// List or clear recent searches
    Recent {
        #[arg(long)]
        clear: bool,
    },
    /// Search, pick a result by position and record the query as recent
    Accept {
        query: String,
        #[arg(long)]
        corpus: PathBuf,
        /// Zero-based row to accept
        #[arg(long, default_value_t = 0)]
        index: usize,
        #[arg(long)]
        filter: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Search { query, corpus, filter, limit, json, config }) => {
            search(&query, &corpus, filter.as_deref(), limit, json, config.as_deref())?;
        }
        Some(Commands::Stats { corpus }) => {
            show_stats(&corpus)?;
        }
        Some(Commands::Recent { clear }) => {
            recent(clear)?;
        }
        Some(Commands::Accept { query, corpus, index, filter, config }) => {
            accept(&query, &corpus, index, filter.as_deref(), config.as_deref())?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    SearchConfig::load(path).context("Failed to load search configuration")
}

fn load_filters(expr: Option<&str>) -> Result<SearchFilters> {
    match expr {
        Some(expr) => parse_filter(expr),
        None => Ok(SearchFilters::default()),
    }
}

fn recent_store() -> Result<FileStore> {
    Ok(FileStore::in_dir(&get_data_dir()?))
}

fn search(
    query: &str,
    corpus_path: &Path,
    filter: Option<&str>,
    limit: Option<usize>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(limit) = limit {
        if limit == 0 {
            bail!("--limit must be at least 1");
        }
        config.result_limit = limit;
    }
    let filters = load_filters(filter)?;
    let corpus = load_corpus(corpus_path)?;

    let Some(parsed) = Query::parse(query, config.min_query_len) else {
        println!("Type at least {} characters to search", config.min_query_len);
        return Ok(());
    };

    let results = config.engine().search(&corpus, &parsed, &filters);
    info!(query = parsed.as_str(), results = results.len(), "search finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No results for \"{}\"", query.trim());
    } else {
        print!("{}", format_results_table(&results));
    }

    Ok(())
}

fn show_stats(corpus_path: &Path) -> Result<()> {
    let corpus = load_corpus(corpus_path)?;

    println!("Corpus Statistics");
    println!("=================");
    println!("Total entities: {}", corpus.len());
    for kind in EntityKind::ALL {
        println!("  {:<15} {}", format!("{}:", kind.label()), corpus.count_of(kind));
    }
    println!();
    println!("Corpus file: {}", format_path_with_tilde(corpus_path));

    print_date_range(&corpus);
    Ok(())
}

fn print_date_range(corpus: &Corpus) {
    let oldest = corpus.entities().iter().map(|e| e.created_at()).min();
    let newest = corpus.entities().iter().map(|e| e.created_at()).max();
    if let Some(oldest) = oldest {
        println!("Oldest entity: {}", oldest.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = newest {
        println!("Newest entity: {}", newest.format("%Y-%m-%d %H:%M:%S"));
    }
}

fn recent(clear: bool) -> Result<()> {
    let store = recent_store()?;

    if clear {
        store.clear().context("Failed to clear recent searches")?;
        println!("Recent searches cleared");
        return Ok(());
    }

    let queries = store.get().context("Failed to read recent searches")?;
    if queries.is_empty() {
        println!("No recent searches");
    } else {
        for (idx, query) in queries.iter().enumerate() {
            println!("{}. {}", idx + 1, query);
        }
    }
    println!();
    println!("Stored in: {}", format_path_with_tilde(store.path()));
    Ok(())
}

fn accept(
    query: &str,
    corpus_path: &Path,
    index: usize,
    filter: Option<&str>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let filters = load_filters(filter)?;
    let corpus = load_corpus(corpus_path)?;

    let mut session = config.session(Box::new(recent_store()?), Box::new(NoopHandler));

    session.set_filters(filters);
    session.on_query_changed(query);
    session.search_now(&corpus);

    match session.phase() {
        Phase::Idle => bail!("Query must be at least {} characters", config.min_query_len),
        Phase::Empty => bail!("No results for \"{}\"", query.trim()),
        Phase::Results(n) if index >= n => {
            bail!("Index {} out of range ({} results)", index, n)
        }
        _ => {}
    }

    for _ in 0..=index {
        session.on_arrow_down();
    }
    let accepted = session.on_accept().context("No result selected")?;

    print!("{}", format_result_detail(&accepted));
    Ok(())
}
