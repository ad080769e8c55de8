//! Weighted substring scoring.
//!
//! A field contributes its weight when its lower-cased value contains the
//! query. Ties are common by construction and are left to the ranker, which
//! breaks them by recency.

use super::adapter::{SearchField, WeightTable, searchable_fields};
use crate::models::{Entity, Query};

/// Relevance of one entity for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Sum of the weights of matched fields, always > 0
    pub relevance: u32,
    /// Matched field names in weight-table order
    pub matched_fields: Vec<&'static str>,
}

/// An entity paired with its non-zero score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntity<'a> {
    pub entity: &'a Entity,
    pub score: Score,
}

/// Score an entity, returning `None` when no field contains the query
pub fn score_entity(entity: &Entity, query: &Query, weights: &WeightTable) -> Option<Score> {
    score_fields(&searchable_fields(entity, weights), query.as_str())
}

/// Score pre-extracted fields against an already normalized needle
pub fn score_fields(fields: &[SearchField], needle: &str) -> Option<Score> {
    let mut relevance = 0u32;
    let mut matched_fields = Vec::new();

    for field in fields {
        if field.value.contains(needle) {
            relevance = relevance.saturating_add(field.weight);
            matched_fields.push(field.name);
        }
    }

    if matched_fields.is_empty() {
        return None;
    }

    Some(Score { relevance, matched_fields })
}
