use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The six record kinds a dashboard corpus is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Project,
    Client,
    Task,
    Communication,
    Payment,
    Invoice,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Project,
        EntityKind::Client,
        EntityKind::Task,
        EntityKind::Communication,
        EntityKind::Payment,
        EntityKind::Invoice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Client => "client",
            EntityKind::Task => "task",
            EntityKind::Communication => "communication",
            EntityKind::Payment => "payment",
            EntityKind::Invoice => "invoice",
        }
    }

    /// Human readable label used in result subtitles
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Project => "Project",
            EntityKind::Client => "Client",
            EntityKind::Task => "Task",
            EntityKind::Communication => "Communication",
            EntityKind::Payment => "Payment",
            EntityKind::Invoice => "Invoice",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind: '{0}' (expected project, client, task, communication, payment or invoice)")]
pub struct UnknownKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownKind;

    /// Case-insensitive, accepts plural forms (`projects`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower || kind.as_str() == singular)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
    pub id: String,
    pub subject: String,
    #[serde(default)]
    pub content: Option<String>,
    /// email, call, meeting, ...
    #[serde(rename = "type")]
    pub comm_type: String,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(rename = "type")]
    pub payment_type: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A searchable business record.
///
/// Closed over the six kinds so field access is always checked by `match`.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Project(Project),
    Client(Client),
    Task(Task),
    Communication(Communication),
    Payment(Payment),
    Invoice(Invoice),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Project(_) => EntityKind::Project,
            Entity::Client(_) => EntityKind::Client,
            Entity::Task(_) => EntityKind::Task,
            Entity::Communication(_) => EntityKind::Communication,
            Entity::Payment(_) => EntityKind::Payment,
            Entity::Invoice(_) => EntityKind::Invoice,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Project(p) => &p.id,
            Entity::Client(c) => &c.id,
            Entity::Task(t) => &t.id,
            Entity::Communication(c) => &c.id,
            Entity::Payment(p) => &p.id,
            Entity::Invoice(i) => &i.id,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Entity::Project(p) => p.created_at,
            Entity::Client(c) => c.created_at,
            Entity::Task(t) => t.created_at,
            Entity::Communication(c) => c.created_at,
            Entity::Payment(p) => p.created_at,
            Entity::Invoice(i) => i.created_at,
        }
    }

    /// Workflow status; clients and communications have none
    pub fn status(&self) -> Option<&str> {
        match self {
            Entity::Project(p) => Some(&p.status),
            Entity::Task(t) => Some(&t.status),
            Entity::Payment(p) => Some(&p.status),
            Entity::Invoice(i) => Some(&i.status),
            Entity::Client(_) | Entity::Communication(_) => None,
        }
    }
}

impl From<Project> for Entity {
    fn from(value: Project) -> Self {
        Entity::Project(value)
    }
}

impl From<Client> for Entity {
    fn from(value: Client) -> Self {
        Entity::Client(value)
    }
}

impl From<Task> for Entity {
    fn from(value: Task) -> Self {
        Entity::Task(value)
    }
}

impl From<Communication> for Entity {
    fn from(value: Communication) -> Self {
        Entity::Communication(value)
    }
}

impl From<Payment> for Entity {
    fn from(value: Payment) -> Self {
        Entity::Payment(value)
    }
}

impl From<Invoice> for Entity {
    fn from(value: Invoice) -> Self {
        Entity::Invoice(value)
    }
}
