//! Data models for the dashboard search corpus.
//!
//! - [`Entity`] - Closed sum type over the six searchable record kinds
//! - [`Corpus`] - Read-only, ordered collection of entities for one session
//! - [`Query`] - Normalized (trimmed, lower-cased) search text
//! - [`SearchResult`] - Ranked, field-annotated projection handed to the UI
//!
//! Records deserialize from camelCase JSON; `createdAt` accepts RFC3339 strings
//! or Unix milliseconds via the `deserializers` module.

pub mod corpus;
pub mod entity;
pub mod query;
pub mod result;

pub use corpus::{Corpus, CorpusData};
pub use entity::{
    Client, Communication, Entity, EntityKind, Invoice, Payment, Project, Task, UnknownKind,
};
pub use query::Query;
pub use result::{ResultMetadata, SearchResult};
