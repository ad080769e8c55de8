//! Corpus loading from JSON exports.
//!
//! # Error Handling Strategy
//!
//! Corpus files are all-or-nothing: a corpus that fails to parse is rejected
//! with context rather than partially loaded, since a silently truncated corpus
//! would make searches quietly miss records.
//!
//! - **I/O errors**: Missing or unreadable files are reported with the path
//! - **Size limit**: Files larger than 10MB are rejected before parsing
//! - **Timestamps**: `createdAt` accepts RFC3339 strings or Unix milliseconds

pub mod corpus;
pub mod deserializers;

pub use corpus::load_corpus;
