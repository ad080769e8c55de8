//! Filter expression parser.
//!
//! Parses user-provided filter expressions into [`SearchFilters`].
//!
//! # Syntax
//!
//! ```text
//! filter_expr := field_filter (operator? field_filter)*
//! field_filter := field_name:value | field_name:"quoted value"
//! operator := AND | OR (case-insensitive)
//! field_name := type | status | since | until (case-insensitive)
//! ```
//!
//! # Supported Fields
//!
//! - `type:project` - Restrict to an entity kind (plural forms accepted)
//! - `status:active` - Restrict to a workflow status
//! - `since:YYYY-MM-DD` - Entities created on or after the date
//! - `until:YYYY-MM-DD` - Entities created on or before the date
//!
//! # Examples
//!
//! ```rust
//! # use dashboard_search::filters::parser::parse_filter;
//! // Single filter
//! let filters = parse_filter("type:project").unwrap();
//!
//! // Same field gets implicit OR
//! let filters = parse_filter("type:project type:client").unwrap();
//!
//! // Different fields get implicit AND
//! let filters = parse_filter("type:task status:\"in progress\"").unwrap();
//!
//! // Explicit operators must agree with the implicit ones
//! let filters = parse_filter("type:project OR type:task AND since:2024-01-01").unwrap();
//! ```
//!
//! # Operator Semantics
//!
//! The filter model is a conjunction of per-field disjunctions, so `OR` is only
//! valid between values of the same field and `AND` only between different
//! fields. Anything else is rejected rather than silently reinterpreted.
//!
//! # Validation
//!
//! - `type` values must name an entity kind
//! - `since`/`until` dates must be YYYY-MM-DD and semantically valid, each may
//!   appear once, and `since` may not be after `until`
//! - Empty field names or values are rejected

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::criteria::{FilterField, SearchFilters};
use crate::models::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    FieldValue { field: String, value: String },
    And,
    Or,
}

impl Token {
    fn from_term(term: &str) -> Result<Self> {
        if term.eq_ignore_ascii_case("and") {
            return Ok(Token::And);
        }
        if term.eq_ignore_ascii_case("or") {
            return Ok(Token::Or);
        }

        let (field, raw) = term
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid token: '{}' (expected field:value or AND/OR)", term))?;
        let value = unquote(raw)?;
        if field.is_empty() || value.is_empty() {
            return Err(anyhow!("Invalid field:value format: {}", term));
        }
        Ok(Token::FieldValue { field: field.to_string(), value: value.to_string() })
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    split_terms(input)?.into_iter().map(Token::from_term).collect()
}

/// Split on whitespace, keeping double-quoted runs inside one term
fn split_terms(input: &str) -> Result<Vec<&str>> {
    let mut terms = Vec::new();
    let mut start: Option<usize> = None;
    let mut quoted = false;

    for (i, ch) in input.char_indices() {
        if ch.is_whitespace() && !quoted {
            if let Some(s) = start.take() {
                terms.push(&input[s..i]);
            }
            continue;
        }
        if ch == '"' {
            quoted = !quoted;
        }
        start.get_or_insert(i);
    }

    if quoted {
        return Err(anyhow!("Unterminated quoted string"));
    }
    if let Some(s) = start {
        terms.push(&input[s..]);
    }
    Ok(terms)
}

/// Strip one pair of surrounding quotes; nothing may follow the closing one
fn unquote(raw: &str) -> Result<&str> {
    let Some(inner) = raw.strip_prefix('"') else {
        return Ok(raw);
    };
    inner
        .strip_suffix('"')
        .filter(|value| !value.contains('"'))
        .ok_or_else(|| anyhow!("Unexpected text after closing quote: {}", raw))
}

fn parse_field(field: &str) -> Result<FilterField> {
    match field.to_lowercase().as_str() {
        "type" | "kind" => Ok(FilterField::Type),
        "status" => Ok(FilterField::Status),
        "since" => Ok(FilterField::Since),
        "until" => Ok(FilterField::Until),
        _ => Err(anyhow!("Unknown field: '{}' (valid fields: type, status, since, until)", field)),
    }
}

/// Parse filter string into SearchFilters
///
/// Examples:
/// - "type:project" → one kind
/// - "type:project type:client" → either kind
/// - "type:task status:done" → tasks whose status is done
/// - "since:2024-01-01 until:2024-06-30" → created within the first half of 2024
pub fn parse_filter(input: &str) -> Result<SearchFilters> {
    let mut filters = SearchFilters::new();

    if input.trim().is_empty() {
        return Ok(filters);
    }

    let tokens = tokenize(input).context("Failed to tokenize filter")?;

    let mut pending_operator: Option<Token> = None;
    let mut last_field: Option<FilterField> = None;

    for token in tokens {
        match token {
            Token::FieldValue { field, value } => {
                let filter_field = parse_field(&field)?;

                if let (Some(op), Some(prev)) = (pending_operator.take(), last_field) {
                    check_operator(&op, prev, filter_field)?;
                }

                apply_value(&mut filters, filter_field, &value)?;
                last_field = Some(filter_field);
            }
            op @ (Token::And | Token::Or) => {
                if last_field.is_none() || pending_operator.is_some() {
                    return Err(anyhow!(
                        "Unexpected {} operator (expected field:value)",
                        op_name(&op)
                    ));
                }
                pending_operator = Some(op);
            }
        }
    }

    if pending_operator.is_some() {
        return Err(anyhow!("Filter ended with operator (expected field:value)"));
    }

    if let (Some(since), Some(until)) = (filters.since, filters.until)
        && since > until
    {
        return Err(anyhow!("Invalid date range: since is after until"));
    }

    Ok(filters)
}

fn op_name(token: &Token) -> &'static str {
    match token {
        Token::Or => "OR",
        _ => "AND",
    }
}

/// Explicit operators must agree with the implicit same-field OR / cross-field AND
fn check_operator(op: &Token, prev: FilterField, next: FilterField) -> Result<()> {
    match op {
        Token::Or if prev != next => {
            Err(anyhow!("OR is only supported between values of the same field"))
        }
        Token::And if prev == next => {
            Err(anyhow!("AND between values of the same field never matches; use OR"))
        }
        _ => Ok(()),
    }
}

/// Validate the value for its field and fold it into the filters
fn apply_value(filters: &mut SearchFilters, field: FilterField, value: &str) -> Result<()> {
    match field {
        FilterField::Type => {
            let kind: EntityKind =
                value.parse().map_err(|e| anyhow!("Invalid type value: {}", e))?;
            filters.kinds.insert(kind);
        }
        FilterField::Status => {
            filters.statuses.insert(value.trim().to_lowercase());
        }
        FilterField::Since => {
            if filters.since.is_some() {
                return Err(anyhow!("since may only be given once"));
            }
            let date = parse_date(value)?;
            filters.since = Some(date.and_time(NaiveTime::MIN).and_utc());
        }
        FilterField::Until => {
            if filters.until.is_some() {
                return Err(anyhow!("until may only be given once"));
            }
            let date = parse_date(value)?;
            filters.until = Some(end_of_day(date));
        }
    }
    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    if !is_valid_date_format(value) {
        return Err(anyhow!("Invalid date format: '{}' (expected YYYY-MM-DD)", value));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: '{}'", value))
}

/// Last representable instant of the given day
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    date.and_time(last).and_utc()
}

/// Check if string is valid YYYY-MM-DD format
fn is_valid_date_format(s: &str) -> bool {
    // Enforce strict YYYY-MM-DD format (10 chars)
    if s.len() != 10 {
        return false;
    }
    // Use chrono for semantic validation (e.g., reject 2024-02-31)
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_tokenize_single_field() {
        let tokens = tokenize("type:project").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            tokens[0],
            Token::FieldValue { field: "type".to_string(), value: "project".to_string() }
        );
    }

    #[test]
    fn test_tokenize_with_operators() {
        let tokens = tokenize("type:project AND status:active").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], Token::And);
    }

    #[test]
    fn test_tokenize_quoted_value() {
        let tokens = tokenize("status:\"in progress\"").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            tokens[0],
            Token::FieldValue { field: "status".to_string(), value: "in progress".to_string() }
        );
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        let result = tokenize("status:\"in progress");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unterminated"));
    }

    #[test]
    fn test_tokenize_invalid_token() {
        let result = tokenize("invalid");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid token"));
    }

    #[test]
    fn test_tokenize_empty_field_or_value() {
        let result = tokenize(":value");
        assert!(result.unwrap_err().to_string().contains("Invalid field:value"));

        let result2 = tokenize("field:");
        assert!(result2.unwrap_err().to_string().contains("Invalid field:value"));
    }

    #[test]
    fn test_tokenize_quoted_value_edges() {
        let tokens = tokenize("status:\"on hold: client\"   type:task").unwrap();
        assert_eq!(
            tokens[0],
            Token::FieldValue { field: "status".to_string(), value: "on hold: client".to_string() }
        );
        assert_eq!(tokens.len(), 2);

        let err = tokenize("status:\"in progress\"extra").unwrap_err();
        assert!(err.to_string().contains("after closing quote"));
    }

    #[test]
    fn test_parse_field_valid() {
        assert_eq!(parse_field("type").unwrap(), FilterField::Type);
        assert_eq!(parse_field("kind").unwrap(), FilterField::Type);
        assert_eq!(parse_field("STATUS").unwrap(), FilterField::Status);
        assert_eq!(parse_field("since").unwrap(), FilterField::Since);
        assert_eq!(parse_field("until").unwrap(), FilterField::Until);
    }

    #[test]
    fn test_parse_field_invalid() {
        let result = parse_field("project");
        assert!(result.unwrap_err().to_string().contains("Unknown field"));
    }

    #[test]
    fn test_validate_date_format() {
        assert!(is_valid_date_format("2024-01-15"));
        assert!(is_valid_date_format("2024-02-29")); // Leap year

        assert!(!is_valid_date_format("2024-1-15"));
        assert!(!is_valid_date_format("2024/01/15"));
        assert!(!is_valid_date_format("2024-13-01"));
        assert!(!is_valid_date_format("2024-02-31"));
        assert!(!is_valid_date_format("2023-02-29")); // Not a leap year
    }

    #[test]
    fn test_parse_filter_empty() {
        assert!(parse_filter("").unwrap().is_empty());
        assert!(parse_filter("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_filter_single_kind() {
        let filters = parse_filter("type:projects").unwrap();
        assert_eq!(filters.kinds.len(), 1);
        assert!(filters.kinds.contains(&EntityKind::Project));
    }

    #[test]
    fn test_parse_filter_same_field_implicit_or() {
        let filters = parse_filter("type:project type:client").unwrap();
        assert_eq!(filters.kinds.len(), 2);
        assert!(filters.kinds.contains(&EntityKind::Client));
    }

    #[test]
    fn test_parse_filter_explicit_or_same_field() {
        let filters = parse_filter("status:active OR status:\"on hold\"").unwrap();
        assert!(filters.statuses.contains("active"));
        assert!(filters.statuses.contains("on hold"));
    }

    #[test]
    fn test_parse_filter_explicit_and_cross_field() {
        let filters = parse_filter("type:task AND status:Done").unwrap();
        assert!(filters.kinds.contains(&EntityKind::Task));
        assert!(filters.statuses.contains("done"));
    }

    #[test]
    fn test_parse_filter_or_across_fields_rejected() {
        let result = parse_filter("type:task OR status:done");
        assert!(result.unwrap_err().to_string().contains("same field"));
    }

    #[test]
    fn test_parse_filter_and_same_field_rejected() {
        let result = parse_filter("type:task AND type:project");
        assert!(result.unwrap_err().to_string().contains("never matches"));
    }

    #[test]
    fn test_parse_filter_dates() {
        let filters = parse_filter("since:2024-01-01 until:2024-06-30").unwrap();
        assert_eq!(filters.since, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        let until = filters.until.unwrap();
        assert!(until > Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap());
        assert!(until < Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_filter_inverted_range() {
        let result = parse_filter("since:2024-06-01 until:2024-01-01");
        assert!(result.unwrap_err().to_string().contains("since is after until"));
    }

    #[test]
    fn test_parse_filter_duplicate_since() {
        let result = parse_filter("since:2024-01-01 since:2024-02-01");
        assert!(result.unwrap_err().to_string().contains("only be given once"));
    }

    #[test]
    fn test_parse_filter_invalid_type() {
        let result = parse_filter("type:widget");
        assert!(result.unwrap_err().to_string().contains("Invalid type"));
    }

    #[test]
    fn test_parse_filter_invalid_date() {
        let result = parse_filter("since:2024-13-01");
        assert!(result.unwrap_err().to_string().contains("Invalid date"));
    }

    #[test]
    fn test_parse_filter_ends_with_operator() {
        let result = parse_filter("type:project AND");
        assert!(result.unwrap_err().to_string().contains("ended with operator"));
    }

    #[test]
    fn test_parse_filter_starts_with_operator() {
        assert!(parse_filter("AND type:project").is_err());
    }

    #[test]
    fn test_parse_filter_double_operator() {
        assert!(parse_filter("type:project AND OR status:active").is_err());
    }
}
