use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use super::adapter::WeightTable;
use super::ranker::{DEFAULT_RESULT_LIMIT, rank};
use super::scorer::{ScoredEntity, score_entity};
use crate::filters::{SearchFilters, matches_filters};
use crate::models::{Corpus, Entity, Query, SearchResult};

/// Corpus size above which scoring fans out over the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

/// One search to run, tagged with the session generation that issued it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: Query,
    pub filters: SearchFilters,
}

/// Results for a request, carrying the generation back so stale ones can be dropped
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub generation: u64,
    pub results: Vec<SearchResult>,
}

/// Stateless filter → score → rank pipeline.
///
/// Holds only configuration, so it can be cloned into blocking tasks and
/// shared across threads freely.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    weights: WeightTable,
    result_limit: usize,
    parallel_threshold: usize,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(WeightTable::default())
    }
}

impl SearchEngine {
    pub fn new(weights: WeightTable) -> Self {
        Self {
            weights,
            result_limit: DEFAULT_RESULT_LIMIT,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn result_limit(&self) -> usize {
        self.result_limit
    }

    /// Run one search over the corpus.
    ///
    /// Filters narrow the candidate set before scoring; entities with a zero
    /// score never appear. Output is sorted and capped at the result limit.
    pub fn search(
        &self,
        corpus: &Corpus,
        query: &Query,
        filters: &SearchFilters,
    ) -> Vec<SearchResult> {
        let start = Instant::now();
        let entities = corpus.entities();

        // Indexed collect keeps corpus order, which the stable sort relies on
        let candidates: Vec<ScoredEntity<'_>> = if entities.len() > self.parallel_threshold {
            entities.par_iter().filter_map(|e| self.score_one(e, query, filters)).collect()
        } else {
            entities.iter().filter_map(|e| self.score_one(e, query, filters)).collect()
        };

        let matched = candidates.len();
        let results = rank(candidates, self.result_limit);

        debug!(
            query = query.as_str(),
            corpus = entities.len(),
            matched,
            returned = results.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "search complete"
        );

        results
    }

    fn score_one<'a>(
        &self,
        entity: &'a Entity,
        query: &Query,
        filters: &SearchFilters,
    ) -> Option<ScoredEntity<'a>> {
        if !matches_filters(entity, filters) {
            return None;
        }
        score_entity(entity, query, &self.weights).map(|score| ScoredEntity { entity, score })
    }

    pub fn execute(&self, corpus: &Corpus, request: &SearchRequest) -> SearchOutcome {
        SearchOutcome {
            generation: request.generation,
            results: self.search(corpus, &request.query, &request.filters),
        }
    }
}
