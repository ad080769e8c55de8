use std::cmp::Ordering;

use super::scorer::ScoredEntity;
use crate::models::SearchResult;

/// Default cap on returned results
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// Order two candidates: higher relevance first, then most recent first
fn compare(a: &ScoredEntity<'_>, b: &ScoredEntity<'_>) -> Ordering {
    b.score
        .relevance
        .cmp(&a.score.relevance)
        .then_with(|| b.entity.created_at().cmp(&a.entity.created_at()))
}

/// Sort scored candidates and keep the best `limit`.
///
/// The sort is stable, so full ties keep corpus order. Truncation happens
/// after sorting; cutting first would drop higher-relevance results.
pub fn rank(mut candidates: Vec<ScoredEntity<'_>>, limit: usize) -> Vec<SearchResult> {
    candidates.sort_by(compare);
    candidates.truncate(limit);

    candidates
        .into_iter()
        .map(|c| SearchResult::from_scored(c.entity, c.score.relevance, &c.score.matched_fields))
        .collect()
}
