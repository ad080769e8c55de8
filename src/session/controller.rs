//! Search session state machine.
//!
//! A [`SearchSession`] owns one open search box: the query text, active
//! filters, the current result list, the highlighted row and the recent
//! query history. Every transition is a plain method call that never fails,
//! which keeps the whole machine testable without a runtime.
//!
//! # Phases
//!
//! ```text
//! Idle ──query ≥ min──▶ Searching ──outcome──▶ Results(n) | Empty
//!   ▲                      │  ▲                     │
//!   └──query < min─────────┘  └──────new query──────┘
//! any ──escape / accept──▶ Closed
//! ```
//!
//! Searches are tagged with a generation counter. Only the outcome carrying
//! the current generation is applied, so a slow search for an old query can
//! never overwrite the results of a newer one.

use tracing::debug;

use super::actions::Action;
use crate::filters::SearchFilters;
use crate::models::query::DEFAULT_MIN_QUERY_LEN;
use crate::models::{Corpus, Query, SearchResult};
use crate::recent::RecentSearches;
use crate::search::{SearchEngine, SearchOutcome, SearchRequest};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Query below the minimum length, nothing shown
    Idle,
    /// A request for the current generation is outstanding
    Searching,
    /// `n > 0` results displayed
    Results(usize),
    /// Search completed with no match
    Empty,
    /// Session dismissed; all input is ignored
    Closed,
}

/// Callbacks out of the session into the host application
pub trait SessionHandler: Send {
    /// User opened a result
    fn on_result_click(&mut self, result: &SearchResult);
    /// Session is closing; called exactly once
    fn on_close(&mut self);
}

/// Handler that ignores every callback
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl SessionHandler for NoopHandler {
    fn on_result_click(&mut self, _result: &SearchResult) {}
    fn on_close(&mut self) {}
}

pub struct SearchSession {
    engine: SearchEngine,
    recent: RecentSearches,
    handler: Box<dyn SessionHandler>,
    min_query_len: usize,
    query_text: String,
    /// Query of the most recently issued request
    active_query: Option<Query>,
    filters: SearchFilters,
    generation: u64,
    phase: Phase,
    results: Vec<SearchResult>,
    selected: Option<usize>,
}

impl std::fmt::Debug for SearchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("query_text", &self.query_text)
            .field("filters", &self.filters)
            .field("generation", &self.generation)
            .field("phase", &self.phase)
            .field("results", &self.results.len())
            .field("selected", &self.selected)
            .field("recent", &self.recent)
            .finish_non_exhaustive()
    }
}

impl SearchSession {
    pub fn new(
        engine: SearchEngine,
        recent: RecentSearches,
        handler: Box<dyn SessionHandler>,
    ) -> Self {
        Self {
            engine,
            recent,
            handler,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            query_text: String::new(),
            active_query: None,
            filters: SearchFilters::default(),
            generation: 0,
            phase: Phase::Idle,
            results: Vec::new(),
            selected: None,
        }
    }

    pub fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len;
        self
    }

    // --- transitions ---

    /// Input text changed.
    ///
    /// Returns the request to run when the change needs a new search.
    pub fn on_query_changed(&mut self, text: &str) -> Option<SearchRequest> {
        if self.is_closed() {
            return None;
        }
        self.query_text = text.to_string();

        let Some(query) = Query::parse(text, self.min_query_len) else {
            // Invalidate anything still in flight
            self.generation += 1;
            self.active_query = None;
            self.results.clear();
            self.selected = None;
            self.phase = Phase::Idle;
            return None;
        };

        let unchanged = self.active_query.as_ref() == Some(&query);
        if unchanged && matches!(self.phase, Phase::Searching | Phase::Results(_) | Phase::Empty) {
            return None;
        }

        Some(self.issue(query))
    }

    /// Replace the active filters, re-running the current query if there is one
    pub fn set_filters(&mut self, filters: SearchFilters) -> Option<SearchRequest> {
        if self.is_closed() || self.filters == filters {
            return None;
        }
        self.filters = filters;

        let query = Query::parse(&self.query_text, self.min_query_len)?;
        Some(self.issue(query))
    }

    /// Apply a finished search.
    ///
    /// Returns `false` when the outcome is stale and was discarded.
    pub fn apply_outcome(&mut self, outcome: SearchOutcome) -> bool {
        if self.phase != Phase::Searching || outcome.generation != self.generation {
            debug!(
                outcome_generation = outcome.generation,
                current_generation = self.generation,
                phase = ?self.phase,
                "discarding stale search outcome"
            );
            return false;
        }

        self.results = outcome.results;
        self.selected = None;
        self.phase = match self.results.len() {
            0 => Phase::Empty,
            n => Phase::Results(n),
        };
        true
    }

    /// Run the pending request synchronously against `corpus`
    pub fn search_now(&mut self, corpus: &Corpus) -> bool {
        let Some(request) = self.pending_request() else {
            return false;
        };
        let outcome = self.engine.execute(corpus, &request);
        self.apply_outcome(outcome)
    }

    pub fn on_arrow_down(&mut self) {
        if let Phase::Results(n) = self.phase {
            self.selected = Some(match self.selected {
                None => 0,
                Some(idx) => (idx + 1).min(n - 1),
            });
        }
    }

    pub fn on_arrow_up(&mut self) {
        if let Phase::Results(_) = self.phase {
            self.selected = match self.selected {
                None | Some(0) => None,
                Some(idx) => Some(idx - 1),
            };
        }
    }

    /// Open the highlighted result.
    ///
    /// Records the query, notifies the handler and closes the session. A
    /// no-op without a highlighted row.
    pub fn on_accept(&mut self) -> Option<SearchResult> {
        if self.is_closed() {
            return None;
        }
        let result = self.selected_result()?.clone();

        self.recent.record(&self.query_text);
        self.handler.on_result_click(&result);
        self.close();
        Some(result)
    }

    pub fn on_escape(&mut self) {
        self.close();
    }

    /// Close the session; the recent list is left untouched
    pub fn close(&mut self) {
        if self.is_closed() {
            return;
        }
        // Outcomes still in flight no longer match
        self.generation += 1;
        self.phase = Phase::Closed;
        self.selected = None;
        self.handler.on_close();
    }

    /// Dispatch a user action, returning a search request when one is issued
    pub fn handle_action(&mut self, action: Action) -> Option<SearchRequest> {
        match action {
            Action::QueryChanged(text) => return self.on_query_changed(&text),
            Action::ArrowDown => self.on_arrow_down(),
            Action::ArrowUp => self.on_arrow_up(),
            Action::Accept => {
                self.on_accept();
            }
            Action::Escape => self.on_escape(),
        }
        None
    }

    fn issue(&mut self, query: Query) -> SearchRequest {
        self.generation += 1;
        self.active_query = Some(query.clone());
        self.selected = None;
        self.phase = Phase::Searching;

        SearchRequest { generation: self.generation, query, filters: self.filters.clone() }
    }

    // --- accessors ---

    /// Request for the current generation, if one is outstanding
    pub fn pending_request(&self) -> Option<SearchRequest> {
        if self.phase != Phase::Searching {
            return None;
        }
        let query = self.active_query.clone()?;
        Some(SearchRequest { generation: self.generation, query, filters: self.filters.clone() })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// Results of the last applied search
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.selected.and_then(|idx| self.results.get(idx))
    }

    pub fn recent_searches(&self) -> &[String] {
        self.recent.entries()
    }

    pub fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}
