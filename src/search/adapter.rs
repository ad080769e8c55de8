//! Per-kind field extraction and field weights.
//!
//! Every kind has an ordered list of `(field, weight)` pairs. The adapter turns
//! an entity into the lower-cased field values the scorer tests, skipping
//! optional fields the record does not carry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Entity, EntityKind};

/// One weighted field of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldWeight {
    pub field: &'static str,
    pub weight: u32,
}

const fn fw(field: &'static str, weight: u32) -> FieldWeight {
    FieldWeight { field, weight }
}

// Primary identifying field = 10, descriptive text = 6-8, categorical = 5-6.
const PROJECT_WEIGHTS: &[FieldWeight] =
    &[fw("name", 10), fw("description", 8), fw("phase", 6), fw("status", 5)];
const CLIENT_WEIGHTS: &[FieldWeight] =
    &[fw("name", 10), fw("company", 8), fw("email", 7), fw("notes", 6)];
const TASK_WEIGHTS: &[FieldWeight] =
    &[fw("title", 10), fw("description", 8), fw("priority", 5), fw("status", 5)];
const COMMUNICATION_WEIGHTS: &[FieldWeight] =
    &[fw("subject", 10), fw("content", 8), fw("type", 5)];
const PAYMENT_WEIGHTS: &[FieldWeight] = &[fw("description", 10), fw("type", 6), fw("status", 5)];
const INVOICE_WEIGHTS: &[FieldWeight] = &[fw("number", 10), fw("notes", 8), fw("status", 5)];

fn default_weights(kind: EntityKind) -> &'static [FieldWeight] {
    match kind {
        EntityKind::Project => PROJECT_WEIGHTS,
        EntityKind::Client => CLIENT_WEIGHTS,
        EntityKind::Task => TASK_WEIGHTS,
        EntityKind::Communication => COMMUNICATION_WEIGHTS,
        EntityKind::Payment => PAYMENT_WEIGHTS,
        EntityKind::Invoice => INVOICE_WEIGHTS,
    }
}

fn kind_index(kind: EntityKind) -> usize {
    match kind {
        EntityKind::Project => 0,
        EntityKind::Client => 1,
        EntityKind::Task => 2,
        EntityKind::Communication => 3,
        EntityKind::Payment => 4,
        EntityKind::Invoice => 5,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeightError {
    #[error("unknown field '{field}' for {kind} (known fields: {known})")]
    UnknownField { kind: EntityKind, field: String, known: String },
    #[error("weight for {kind}.{field} must be greater than zero")]
    ZeroWeight { kind: EntityKind, field: String },
}

/// Weight overrides as read from configuration: kind → field → weight
pub type WeightOverrides = BTreeMap<EntityKind, BTreeMap<String, u32>>;

/// Field weights for every kind.
///
/// Immutable once built; a session keeps the same table for its whole life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    tables: [Vec<FieldWeight>; 6],
}

impl Default for WeightTable {
    fn default() -> Self {
        Self { tables: EntityKind::ALL.map(|kind| default_weights(kind).to_vec()) }
    }
}

impl WeightTable {
    /// Default table with selected weights replaced.
    ///
    /// Field order stays that of the defaults; unknown fields and zero
    /// weights are rejected so a match always raises the score.
    pub fn with_overrides(overrides: &WeightOverrides) -> Result<Self, WeightError> {
        let mut table = Self::default();

        for (kind, fields) in overrides {
            let entries = &mut table.tables[kind_index(*kind)];
            for (field, weight) in fields {
                if *weight == 0 {
                    return Err(WeightError::ZeroWeight { kind: *kind, field: field.clone() });
                }
                let entry = entries.iter_mut().find(|fw| fw.field == field.as_str()).ok_or_else(
                    || WeightError::UnknownField {
                        kind: *kind,
                        field: field.clone(),
                        known: default_weights(*kind)
                            .iter()
                            .map(|fw| fw.field)
                            .collect::<Vec<_>>()
                            .join(", "),
                    },
                )?;
                entry.weight = *weight;
            }
        }

        Ok(table)
    }

    pub fn fields(&self, kind: EntityKind) -> &[FieldWeight] {
        &self.tables[kind_index(kind)]
    }

    pub fn weight_of(&self, kind: EntityKind, field: &str) -> Option<u32> {
        self.fields(kind).iter().find(|fw| fw.field == field).map(|fw| fw.weight)
    }
}

/// Serializable view of the table, used for config dumps
impl Serialize for WeightTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let view: WeightOverrides = EntityKind::ALL
            .into_iter()
            .map(|kind| {
                let fields: BTreeMap<String, u32> =
                    self.fields(kind).iter().map(|fw| (fw.field.to_string(), fw.weight)).collect();
                (kind, fields)
            })
            .collect();
        view.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeightTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overrides = WeightOverrides::deserialize(deserializer)?;
        WeightTable::with_overrides(&overrides).map_err(serde::de::Error::custom)
    }
}

/// A field value ready for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchField {
    pub name: &'static str,
    /// Lower-cased value
    pub value: String,
    pub weight: u32,
}

/// Extract the weighted, lower-cased fields of an entity in table order.
///
/// Absent optional fields are skipped rather than treated as empty strings.
pub fn searchable_fields(entity: &Entity, weights: &WeightTable) -> Vec<SearchField> {
    weights
        .fields(entity.kind())
        .iter()
        .filter_map(|fw| {
            field_value(entity, fw.field).map(|value| SearchField {
                name: fw.field,
                value: value.to_lowercase(),
                weight: fw.weight,
            })
        })
        .collect()
}

/// Raw value of a named field, `None` when absent
pub fn field_value<'a>(entity: &'a Entity, field: &str) -> Option<&'a str> {
    match entity {
        Entity::Project(p) => match field {
            "name" => Some(p.name.as_str()),
            "description" => p.description.as_deref(),
            "phase" => p.phase.as_deref(),
            "status" => Some(p.status.as_str()),
            _ => None,
        },
        Entity::Client(c) => match field {
            "name" => Some(c.name.as_str()),
            "company" => c.company.as_deref(),
            "email" => c.email.as_deref(),
            "notes" => c.notes.as_deref(),
            _ => None,
        },
        Entity::Task(t) => match field {
            "title" => Some(t.title.as_str()),
            "description" => t.description.as_deref(),
            "priority" => t.priority.as_deref(),
            "status" => Some(t.status.as_str()),
            _ => None,
        },
        Entity::Communication(c) => match field {
            "subject" => Some(c.subject.as_str()),
            "content" => c.content.as_deref(),
            "type" => Some(c.comm_type.as_str()),
            _ => None,
        },
        Entity::Payment(p) => match field {
            "description" => p.description.as_deref(),
            "type" => Some(p.payment_type.as_str()),
            "status" => Some(p.status.as_str()),
            _ => None,
        },
        Entity::Invoice(i) => match field {
            "number" => Some(i.number.as_str()),
            "notes" => i.notes.as_deref(),
            "status" => Some(i.status.as_str()),
            _ => None,
        },
    }
}
