//! Result shape handed to the presentation layer.
//!
//! A [`SearchResult`] is derived per query and never persisted. Each kind
//! projects its own title, subtitle, description and a small set of
//! display details; the matched field names travel alongside so the UI can
//! highlight why a row matched.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};

/// Maximum characters of communication content shown as description
const DESCRIPTION_PREVIEW_CHARS: usize = 120;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Kind-specific display fields (status, phase, amount, ...)
    pub details: BTreeMap<String, String>,
    /// Names of the fields whose value contained the query
    pub matched_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub kind: EntityKind,
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: Option<String>,
    pub metadata: ResultMetadata,
    pub score: u32,
    pub created_at: DateTime<Utc>,
}

impl SearchResult {
    /// Project a scored entity into its presentation shape
    pub fn from_scored(entity: &Entity, score: u32, matched_fields: &[&str]) -> Self {
        let mut details = BTreeMap::new();

        let (title, subtitle, description) = match entity {
            Entity::Project(p) => {
                details.insert("status".to_string(), p.status.clone());
                insert_opt(&mut details, "phase", p.phase.as_deref());
                let subtitle =
                    join_parts(&["Project", p.status.as_str(), p.phase.as_deref().unwrap_or("")]);
                (p.name.clone(), subtitle, p.description.clone())
            }
            Entity::Client(c) => {
                insert_opt(&mut details, "email", c.email.as_deref());
                insert_opt(&mut details, "company", c.company.as_deref());
                let subtitle = c
                    .company
                    .as_deref()
                    .or(c.email.as_deref())
                    .filter(|s| !s.is_empty())
                    .unwrap_or(EntityKind::Client.label())
                    .to_string();
                (c.name.clone(), subtitle, c.notes.clone())
            }
            Entity::Task(t) => {
                details.insert("status".to_string(), t.status.clone());
                insert_opt(&mut details, "priority", t.priority.as_deref());
                let subtitle =
                    join_parts(&["Task", t.status.as_str(), t.priority.as_deref().unwrap_or("")]);
                (t.title.clone(), subtitle, t.description.clone())
            }
            Entity::Communication(c) => {
                details.insert("type".to_string(), c.comm_type.clone());
                let description = c.content.as_deref().map(preview);
                (c.subject.clone(), c.comm_type.clone(), description)
            }
            Entity::Payment(p) => {
                details.insert("status".to_string(), p.status.clone());
                details.insert("type".to_string(), p.payment_type.clone());
                details.insert("amount".to_string(), format_amount(p.amount));
                let title = p
                    .description
                    .clone()
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| format!("Payment {}", p.id));
                let subtitle = join_parts(&[p.payment_type.as_str(), p.status.as_str()]);
                (title, subtitle, Some(format_amount(p.amount)))
            }
            Entity::Invoice(i) => {
                details.insert("status".to_string(), i.status.clone());
                details.insert("amount".to_string(), format_amount(i.amount));
                (format!("Invoice {}", i.number), i.status.clone(), i.notes.clone())
            }
        };

        Self {
            kind: entity.kind(),
            id: entity.id().to_string(),
            title,
            subtitle,
            description,
            metadata: ResultMetadata {
                details,
                matched_fields: matched_fields.iter().map(|f| f.to_string()).collect(),
            },
            score,
            created_at: entity.created_at(),
        }
    }
}

fn insert_opt(details: &mut BTreeMap<String, String>, key: &str, value: Option<&str>) {
    if let Some(value) = value
        && !value.is_empty()
    {
        details.insert(key.to_string(), value.to_string());
    }
}

/// Join non-empty parts with a middle dot
fn join_parts(parts: &[&str]) -> String {
    parts.iter().filter(|p| !p.is_empty()).copied().collect::<Vec<_>>().join(" · ")
}

fn preview(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    truncated.push('…');
    truncated
}

fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
