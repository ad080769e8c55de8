use std::fmt::Write;

use chrono::{DateTime, Datelike, Utc};

use crate::models::SearchResult;

const TITLE_WIDTH: usize = 36;
const SUBTITLE_WIDTH: usize = 28;

/// Tiered timestamp display:
/// - Relative for <7 days: "2h ago", "3d ago"
/// - Absolute for ≥7 days: "Jan 15", "Dec 3, 2024"
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    format_timestamp_at(timestamp, &Utc::now())
}

fn format_timestamp_at(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*timestamp);

    // Future timestamps (clock skew, scheduled items) show as dates
    if duration.num_seconds() >= 0 && duration.num_days() < 7 {
        format_relative(duration.num_seconds())
    } else {
        format_absolute(timestamp, now)
    }
}

fn format_relative(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "just now".to_string()
    }
}

fn format_absolute(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    if timestamp.year() == now.year() {
        timestamp.format("%b %-d").to_string()
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}

/// Cut to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// One ranked line per result
pub fn format_results_table(results: &[SearchResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<13} {:>5}  {:<tw$} {:<sw$} {:<12} MATCHED",
        "#",
        "KIND",
        "SCORE",
        "TITLE",
        "SUBTITLE",
        "CREATED",
        tw = TITLE_WIDTH,
        sw = SUBTITLE_WIDTH,
    );

    for (idx, result) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<13} {:>5}  {:<tw$} {:<sw$} {:<12} {}",
            idx,
            result.kind.as_str(),
            result.score,
            truncate(&result.title, TITLE_WIDTH),
            truncate(&result.subtitle, SUBTITLE_WIDTH),
            format_timestamp(&result.created_at),
            result.metadata.matched_fields.join(","),
            tw = TITLE_WIDTH,
            sw = SUBTITLE_WIDTH,
        );
    }

    out
}

/// Multi-line view of a single result
pub fn format_result_detail(result: &SearchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} {})", result.title, result.kind.label(), result.id);
    let _ = writeln!(out, "  {}", result.subtitle);
    if let Some(description) = &result.description {
        let _ = writeln!(out, "  {}", description);
    }
    for (key, value) in &result.metadata.details {
        let _ = writeln!(out, "  {}: {}", key, value);
    }
    let _ = writeln!(out, "  created: {}", result.created_at.format("%Y-%m-%d %H:%M:%S"));
    out
}
