//! Search tuning knobs.
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional JSON
//! file, then `DASHBOARD_SEARCH_*` environment variables.

use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::query::DEFAULT_MIN_QUERY_LEN;
use crate::recent::{DEFAULT_RECENT_LIMIT, RecentSearchStore, RecentSearches};
use crate::search::{DEFAULT_PARALLEL_THRESHOLD, DEFAULT_RESULT_LIMIT, SearchEngine, WeightTable};
use crate::session::driver::DEFAULT_DEBOUNCE_MS;
use crate::session::{SearchSession, SessionHandler};
use crate::utils::paths::MAX_FILE_SIZE_BYTES;

pub const MIN_QUERY_LEN_ENV: &str = "DASHBOARD_SEARCH_MIN_QUERY_LEN";
pub const RESULT_LIMIT_ENV: &str = "DASHBOARD_SEARCH_RESULT_LIMIT";
pub const DEBOUNCE_MS_ENV: &str = "DASHBOARD_SEARCH_DEBOUNCE_MS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path} is too large ({size} bytes, max {max} bytes)")]
    TooLarge { path: PathBuf, size: u64, max: u64 },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value for {var}: '{value}' (expected a non-negative integer)")]
    InvalidEnv { var: &'static str, value: String },
    #[error("{field} must be at least 1")]
    OutOfRange { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Characters required (after trimming) before a query is scored
    pub min_query_len: usize,
    pub result_limit: usize,
    pub recent_limit: usize,
    /// Delay before an issued search is scored; 0 disables debouncing
    pub debounce_ms: u64,
    /// Corpus size above which scoring runs in parallel
    pub parallel_threshold: usize,
    pub weights: WeightTable,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            result_limit: DEFAULT_RESULT_LIMIT,
            recent_limit: DEFAULT_RECENT_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            weights: WeightTable::default(),
        }
    }
}

impl SearchConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides(|var| env::var(var).ok())
    }

    /// Parse a JSON config file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let io_err = |source| ConfigError::Io { path: path.to_path_buf(), source };
        let file = File::open(path).map_err(io_err)?;
        let size = file.metadata().map_err(io_err)?.len();
        if size > MAX_FILE_SIZE_BYTES {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                size,
                max: MAX_FILE_SIZE_BYTES,
            });
        }

        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// File (if given) or defaults, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides(|var| env::var(var).ok())
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, MIN_QUERY_LEN_ENV)? {
            self.min_query_len = to_usize(MIN_QUERY_LEN_ENV, v)?;
        }
        if let Some(v) = parse_var(&lookup, RESULT_LIMIT_ENV)? {
            self.result_limit = to_usize(RESULT_LIMIT_ENV, v)?;
        }
        if let Some(v) = parse_var(&lookup, DEBOUNCE_MS_ENV)? {
            self.debounce_ms = v;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_query_len == 0 {
            return Err(ConfigError::OutOfRange { field: "min_query_len" });
        }
        if self.result_limit == 0 {
            return Err(ConfigError::OutOfRange { field: "result_limit" });
        }
        if self.recent_limit == 0 {
            return Err(ConfigError::OutOfRange { field: "recent_limit" });
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Engine configured with these weights and limits
    pub fn engine(&self) -> SearchEngine {
        SearchEngine::new(self.weights.clone())
            .with_result_limit(self.result_limit)
            .with_parallel_threshold(self.parallel_threshold)
    }

    /// Session over the given store with this engine, query length and recent limit
    pub fn session(
        &self,
        store: Box<dyn RecentSearchStore>,
        handler: Box<dyn SessionHandler>,
    ) -> SearchSession {
        let recent = RecentSearches::load_with_limit(store, self.recent_limit);
        SearchSession::new(self.engine(), recent, handler).with_min_query_len(self.min_query_len)
    }
}

fn parse_var<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<u64>().map(Some).map_err(|_| ConfigError::InvalidEnv { var, value: raw })
}

fn to_usize(var: &'static str, value: u64) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::InvalidEnv { var, value: value.to_string() })
}
