use std::fmt;

/// Default minimum number of characters before a query is scored
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Normalized search text: trimmed and lower-cased.
///
/// Only constructed through [`Query::parse`], so a `Query` always satisfies the
/// minimum length it was parsed with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Normalize raw input, returning `None` when it is shorter than `min_len` characters
    pub fn parse(input: &str, min_len: usize) -> Option<Self> {
        let normalized = normalize(input);
        if normalized.chars().count() < min_len {
            return None;
        }
        Some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}
