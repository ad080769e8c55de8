use tracing::{debug, warn};

use super::store::RecentSearchStore;

/// Default number of remembered queries
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Bounded, deduplicated, most-recent-first query history.
///
/// Loaded once from the injected store on construction and written back after
/// each change. The first store failure switches to degraded mode: the list
/// keeps working in memory and the store is not touched again.
pub struct RecentSearches {
    entries: Vec<String>,
    limit: usize,
    store: Box<dyn RecentSearchStore>,
    degraded: bool,
}

impl std::fmt::Debug for RecentSearches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentSearches")
            .field("entries", &self.entries)
            .field("limit", &self.limit)
            .field("degraded", &self.degraded)
            .finish_non_exhaustive()
    }
}

impl RecentSearches {
    pub fn load(store: Box<dyn RecentSearchStore>) -> Self {
        Self::load_with_limit(store, DEFAULT_RECENT_LIMIT)
    }

    pub fn load_with_limit(store: Box<dyn RecentSearchStore>, limit: usize) -> Self {
        let mut recent = Self { entries: Vec::new(), limit, store, degraded: false };

        match recent.store.get() {
            Ok(stored) => {
                // Stored data may predate the current limit or be hand-edited
                for query in stored.into_iter().rev() {
                    recent.promote(query);
                }
                debug!(count = recent.entries.len(), "loaded recent searches");
            }
            Err(e) => {
                warn!(error = %e, "recent searches unavailable, keeping history in memory only");
                recent.degraded = true;
            }
        }

        recent
    }

    /// Record a query as most recent.
    ///
    /// Blank input is ignored. Returns `true` when the list changed.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        if self.entries.first().is_some_and(|first| first == query) {
            return false;
        }

        self.promote(query.to_string());
        self.persist();
        true
    }

    /// Forget every entry, persisting the empty list
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.persist();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Whether a store failure has switched persistence off
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    fn promote(&mut self, query: String) {
        self.entries.retain(|existing| *existing != query);
        self.entries.insert(0, query);
        self.entries.truncate(self.limit);
    }

    fn persist(&mut self) {
        if self.degraded {
            return;
        }
        if let Err(e) = self.store.set(&self.entries) {
            warn!(error = %e, "failed to persist recent searches, keeping history in memory only");
            self.degraded = true;
        }
    }
}
