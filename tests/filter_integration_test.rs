//! Integration tests for filter functionality
mod common;

use common::{CorpusBuilder, sample_corpus};
use dashboard_search::filters::{apply_filters, parse_filter};
use dashboard_search::models::{EntityKind, Query};
use dashboard_search::search::SearchEngine;

#[test]
fn test_filter_integration_type() {
    let corpus = sample_corpus().build();
    let filters = parse_filter("type:invoice").expect("Parse filter");
    let filtered = apply_filters(corpus.entities(), &filters);

    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|e| e.kind() == EntityKind::Invoice));
}

#[test]
fn test_filter_integration_multiple_types() {
    let corpus = sample_corpus().build();
    let filters = parse_filter("type:projects OR type:clients").expect("Parse filter");
    let filtered = apply_filters(corpus.entities(), &filters);

    assert_eq!(filtered.len(), 4);
    // Corpus order is preserved
    assert_eq!(filtered[0].id(), "p1");
    assert_eq!(filtered[3].id(), "c2");
}

#[test]
fn test_filter_integration_status_excludes_statusless_kinds() {
    let corpus = sample_corpus().build();
    let filters = parse_filter("status:completed").expect("Parse filter");
    let filtered = apply_filters(corpus.entities(), &filters);

    let ids: Vec<_> = filtered.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["p2", "pay1"]);
}

#[test]
fn test_filter_integration_type_and_status() {
    let corpus = sample_corpus().build();
    let filters = parse_filter("type:invoice status:pending").expect("Parse filter");
    let filtered = apply_filters(corpus.entities(), &filters);

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id(), "i2");
}

#[test]
fn test_filter_integration_date_range() {
    // base_time is 2024-06-01; ages 2..=10 days fall in late May
    let corpus = sample_corpus().build();
    let filters = parse_filter("since:2024-05-22 until:2024-05-31").expect("Parse filter");
    let filtered = apply_filters(corpus.entities(), &filters);

    let ids: Vec<_> = filtered.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["c2", "t1", "t2", "i2"]);
}

#[test]
fn test_filter_integration_with_search() {
    let corpus = CorpusBuilder::new()
        .task("t1", "Banking audit", "done", 1)
        .task("t2", "Banking rollout", "todo", 2)
        .project("p1", "Banking Platform", "active", 3)
        .build();
    let filters = parse_filter("type:task status:todo").expect("Parse filter");
    let query = Query::parse("banking", 3).unwrap();

    let results = SearchEngine::default().search(&corpus, &query, &filters);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "t2");
}

#[test]
fn test_filter_integration_invalid_expressions() {
    assert!(parse_filter("type:widget").is_err());
    assert!(parse_filter("type:project OR status:active").is_err());
    assert!(parse_filter("since:2024-13-01").is_err());
    assert!(parse_filter("since:2024-06-01 until:2024-01-01").is_err());
    assert!(parse_filter("owner:alice").is_err());
}
