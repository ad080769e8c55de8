use super::criteria::SearchFilters;
use crate::models::Entity;

/// Restrict the corpus to entities passing the filters, preserving input order.
///
/// Standalone form of the candidate step; [`SearchEngine`](crate::search::SearchEngine)
/// calls [`matches_filters`] per entity while scoring instead.
///
/// Filter logic:
/// - Kind: entity kind must be in the set (empty set = all kinds)
/// - Status: entity status must be in the set (empty set = any); kinds without
///   a status never pass a non-empty status filter
/// - Since/Until: inclusive bounds on `created_at`
pub fn apply_filters<'a>(entities: &'a [Entity], filters: &SearchFilters) -> Vec<&'a Entity> {
    if filters.is_empty() {
        return entities.iter().collect();
    }

    entities.iter().filter(|entity| matches_filters(entity, filters)).collect()
}

/// Evaluate all active constraints against a single entity
pub fn matches_filters(entity: &Entity, filters: &SearchFilters) -> bool {
    match_kind(entity, filters)
        && match_status(entity, filters)
        && match_date_range(entity, filters)
}

fn match_kind(entity: &Entity, filters: &SearchFilters) -> bool {
    filters.kinds.is_empty() || filters.kinds.contains(&entity.kind())
}

/// Match status (case-insensitive exact match)
fn match_status(entity: &Entity, filters: &SearchFilters) -> bool {
    if filters.statuses.is_empty() {
        return true;
    }
    entity.status().is_some_and(|status| filters.statuses.contains(&status.to_lowercase()))
}

fn match_date_range(entity: &Entity, filters: &SearchFilters) -> bool {
    let created_at = entity.created_at();
    filters.since.is_none_or(|since| created_at >= since)
        && filters.until.is_none_or(|until| created_at <= until)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::models::{Client, EntityKind, Project, Task};

    fn project(id: &str, status: &str, created_at: DateTime<Utc>) -> Entity {
        Entity::Project(Project {
            id: id.to_string(),
            name: format!("Project {}", id),
            description: None,
            status: status.to_string(),
            phase: None,
            created_at,
        })
    }

    fn client(id: &str, created_at: DateTime<Utc>) -> Entity {
        Entity::Client(Client {
            id: id.to_string(),
            name: format!("Client {}", id),
            email: None,
            company: None,
            notes: None,
            created_at,
        })
    }

    fn task(id: &str, status: &str, created_at: DateTime<Utc>) -> Entity {
        Entity::Task(Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            status: status.to_string(),
            priority: None,
            created_at,
        })
    }

    fn sample() -> Vec<Entity> {
        vec![
            project("p1", "active", Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()),
            client("c1", Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            task("t1", "Done", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            project("p2", "archived", Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap()),
        ]
    }

    fn ids(entities: &[&Entity]) -> Vec<String> {
        entities.iter().map(|e| e.id().to_string()).collect()
    }

    #[test]
    fn test_apply_filters_empty_returns_all_in_order() {
        let entities = sample();
        let result = apply_filters(&entities, &SearchFilters::new());
        assert_eq!(ids(&result), vec!["p1", "c1", "t1", "p2"]);
    }

    #[test]
    fn test_apply_filters_single_kind() {
        let entities = sample();
        let filters = SearchFilters::new().with_kind(EntityKind::Project);
        let result = apply_filters(&entities, &filters);
        assert_eq!(ids(&result), vec!["p1", "p2"]);
        assert!(result.iter().all(|e| e.kind() == EntityKind::Project));
    }

    #[test]
    fn test_apply_filters_multiple_kinds_preserves_order() {
        let entities = sample();
        let filters = SearchFilters::new().with_kinds([EntityKind::Task, EntityKind::Client]);
        let result = apply_filters(&entities, &filters);
        assert_eq!(ids(&result), vec!["c1", "t1"]);
    }

    #[test]
    fn test_match_status_case_insensitive() {
        let entities = sample();
        let filters = SearchFilters::new().with_status("DONE");
        let result = apply_filters(&entities, &filters);
        assert_eq!(ids(&result), vec!["t1"]);
    }

    #[test]
    fn test_status_filter_excludes_kinds_without_status() {
        let entity = client("c1", Utc::now());
        let filters = SearchFilters::new().with_status("active");
        assert!(!matches_filters(&entity, &filters));
    }

    #[test]
    fn test_match_since_inclusive() {
        let entities = sample();
        let filters =
            SearchFilters::new().with_since(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        let result = apply_filters(&entities, &filters);
        assert_eq!(ids(&result), vec!["p1", "c1"]);
    }

    #[test]
    fn test_match_until_inclusive() {
        let entities = sample();
        let filters =
            SearchFilters::new().with_until(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let result = apply_filters(&entities, &filters);
        assert_eq!(ids(&result), vec!["t1", "p2"]);
    }

    #[test]
    fn test_combined_filters_are_anded() {
        let entities = sample();
        let filters = SearchFilters::new()
            .with_kind(EntityKind::Project)
            .with_status("active")
            .with_since(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let result = apply_filters(&entities, &filters);
        assert_eq!(ids(&result), vec!["p1"]);
    }

    #[test]
    fn test_apply_filters_no_matches() {
        let entities = sample();
        let filters = SearchFilters::new().with_kind(EntityKind::Invoice);
        assert!(apply_filters(&entities, &filters).is_empty());
    }
}
