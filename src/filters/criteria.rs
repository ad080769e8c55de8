use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::models::EntityKind;

/// Filter field types accepted in filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Restrict to entity kinds (project, client, ...)
    Type,
    /// Restrict to workflow status (active, paid, ...)
    Status,
    /// Entities created on or after date (YYYY-MM-DD)
    Since,
    /// Entities created on or before date (YYYY-MM-DD)
    Until,
}

/// Active search filters.
///
/// Values within one field are OR'd (`type:project type:client` keeps both
/// kinds); different fields are AND'd. An empty kind set means "all kinds" and
/// an empty status set means "any status".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub kinds: BTreeSet<EntityKind>,
    /// Lower-cased status values
    pub statuses: BTreeSet<String>,
    /// Inclusive lower bound on `created_at`
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    pub until: Option<DateTime<Utc>>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kinds.insert(kind);
        self
    }

    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = EntityKind>) -> Self {
        self.kinds.extend(kinds);
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.statuses.insert(status.trim().to_lowercase());
        self
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    /// Add the kind if absent, remove it if present (filter chip behaviour)
    pub fn toggle_kind(&mut self, kind: EntityKind) {
        if !self.kinds.remove(&kind) {
            self.kinds.insert(kind);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
            && self.statuses.is_empty()
            && self.since.is_none()
            && self.until.is_none()
    }
}
