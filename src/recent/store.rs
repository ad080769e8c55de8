use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

/// Failure of the durable recent-search store.
///
/// Always non-fatal for a search session: the caller logs it and keeps an
/// in-memory list.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("recent search store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("recent search store holds invalid data: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("recent search store unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value slot holding the recent query list, most recent first
pub trait RecentSearchStore: Send {
    fn get(&self) -> Result<Vec<String>, StoreError>;
    fn set(&mut self, queries: &[String]) -> Result<(), StoreError>;
}

impl<S: RecentSearchStore + ?Sized> RecentSearchStore for Box<S> {
    fn get(&self) -> Result<Vec<String>, StoreError> {
        (**self).get()
    }

    fn set(&mut self, queries: &[String]) -> Result<(), StoreError> {
        (**self).set(queries)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    queries: Vec<String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

/// In-process store.
///
/// Clones share state, so a test can keep a handle and inspect what a
/// session persisted, or flip failure injection mid-session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queries<I, S>(queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::default();
        store.state.lock().queries = queries.into_iter().map(Into::into).collect();
        store
    }

    /// Make every subsequent `get` fail
    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().fail_reads = fail;
    }

    /// Make every subsequent `set` fail
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    /// Current contents, bypassing failure injection
    pub fn snapshot(&self) -> Vec<String> {
        self.state.lock().queries.clone()
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.state.lock().writes
    }
}

impl RecentSearchStore for MemoryStore {
    fn get(&self) -> Result<Vec<String>, StoreError> {
        let state = self.state.lock();
        if state.fail_reads {
            return Err(StoreError::Unavailable("read failure injected".to_string()));
        }
        Ok(state.queries.clone())
    }

    fn set(&mut self, queries: &[String]) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(StoreError::Unavailable("write failure injected".to_string()));
        }
        state.queries = queries.to_vec();
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get().unwrap().is_empty());

        store.set(&["alpha".to_string(), "beta".to_string()]).unwrap();
        assert_eq!(store.get().unwrap(), vec!["alpha", "beta"]);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let handle = MemoryStore::new();
        let mut session_side = handle.clone();
        session_side.set(&["invoice".to_string()]).unwrap();
        assert_eq!(handle.snapshot(), vec!["invoice"]);
    }

    #[test]
    fn test_memory_store_failure_injection() {
        let mut store = MemoryStore::with_queries(["kept"]);
        store.fail_reads(true);
        store.fail_writes(true);

        assert!(matches!(store.get(), Err(StoreError::Unavailable(_))));
        assert!(store.set(&["new".to_string()]).is_err());
        assert_eq!(store.snapshot(), vec!["kept"]);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let handle = MemoryStore::with_queries(["boxed"]);
        let boxed: Box<dyn RecentSearchStore> = Box::new(handle.clone());
        assert_eq!(boxed.get().unwrap(), vec!["boxed"]);
    }
}
