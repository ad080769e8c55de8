//! Recent-query history and its durable backing stores

pub mod file_store;
pub mod history;
pub mod store;

pub use file_store::FileStore;
pub use history::{DEFAULT_RECENT_LIMIT, RecentSearches};
pub use store::{MemoryStore, RecentSearchStore, StoreError};
