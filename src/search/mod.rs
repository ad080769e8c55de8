//! Relevance search over a corpus.
//!
//! The pipeline is adapter → filters → scorer → ranker, wrapped by
//! [`SearchEngine`]. Everything here is synchronous and side-effect free.

pub mod adapter;
pub mod engine;
pub mod ranker;
pub mod scorer;

pub use adapter::{FieldWeight, SearchField, WeightError, WeightOverrides, WeightTable};
pub use engine::{DEFAULT_PARALLEL_THRESHOLD, SearchEngine, SearchOutcome, SearchRequest};
pub use ranker::{DEFAULT_RESULT_LIMIT, rank};
pub use scorer::{Score, ScoredEntity, score_entity};
