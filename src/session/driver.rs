//! Async execution of session search requests.
//!
//! Each request runs on its own tokio task: wait out the debounce interval,
//! then score on the blocking pool and send the outcome back over a channel.
//! Superseded tasks are not aborted. A task that wakes up after a newer
//! request was issued skips scoring, and any outcome that still arrives late
//! is discarded by the session's generation check.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::actions::Action;
use super::controller::{Phase, SearchSession};
use crate::config::SearchConfig;
use crate::filters::SearchFilters;
use crate::models::Corpus;
use crate::search::{SearchOutcome, SearchRequest};

pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Default delay between the last keystroke and scoring
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_MS);

#[derive(Debug)]
enum TaskMessage {
    Completed(SearchOutcome),
    Superseded(u64),
    Failed(u64),
}

/// Drives a [`SearchSession`] against a shared corpus on the tokio runtime
pub struct SearchDriver {
    session: SearchSession,
    corpus: Arc<Corpus>,
    debounce: Duration,
    latest_generation: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<TaskMessage>,
    rx: mpsc::UnboundedReceiver<TaskMessage>,
    in_flight: usize,
}

impl SearchDriver {
    pub fn new(session: SearchSession, corpus: Arc<Corpus>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let latest_generation = Arc::new(AtomicU64::new(session.generation()));
        Self {
            session,
            corpus,
            debounce: DEFAULT_DEBOUNCE,
            latest_generation,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Driver whose debounce interval comes from the config
    pub fn from_config(session: SearchSession, corpus: Arc<Corpus>, config: &SearchConfig) -> Self {
        Self::new(session, corpus).with_debounce(config.debounce())
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Forward an input change; spawns a search task when one is issued
    pub fn query_changed(&mut self, text: &str) -> bool {
        let request = self.session.on_query_changed(text);
        self.dispatch(request)
    }

    pub fn set_filters(&mut self, filters: SearchFilters) -> bool {
        let request = self.session.set_filters(filters);
        self.dispatch(request)
    }

    pub fn handle_action(&mut self, action: Action) -> bool {
        let request = self.session.handle_action(action);
        self.dispatch(request)
    }

    /// Wait for one task to report back and apply its outcome.
    ///
    /// Returns `None` when nothing is in flight, otherwise whether the
    /// session accepted the message.
    pub async fn next_outcome(&mut self) -> Option<bool> {
        if self.in_flight == 0 {
            return None;
        }
        let message = self.rx.recv().await?;
        self.in_flight -= 1;

        let applied = match message {
            TaskMessage::Completed(outcome) => self.session.apply_outcome(outcome),
            TaskMessage::Superseded(generation) => {
                debug!(generation, "search superseded before scoring");
                false
            }
            TaskMessage::Failed(generation) => {
                // Leave Searching rather than hang on a request that will never finish
                self.session.apply_outcome(SearchOutcome { generation, results: Vec::new() })
            }
        };
        Some(applied)
    }

    /// Drain task messages until the current request has been applied
    pub async fn settle(&mut self) {
        while self.session.phase() == Phase::Searching {
            if self.next_outcome().await.is_none() {
                break;
            }
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    pub fn into_session(self) -> SearchSession {
        self.session
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn dispatch(&mut self, request: Option<SearchRequest>) -> bool {
        // Short queries and closes bump the generation without a request
        self.latest_generation.store(self.session.generation(), Ordering::SeqCst);

        let Some(request) = request else {
            return false;
        };
        self.spawn(request);
        true
    }

    fn spawn(&mut self, request: SearchRequest) {
        let engine = self.session.engine().clone();
        let corpus = Arc::clone(&self.corpus);
        let latest = Arc::clone(&self.latest_generation);
        let tx = self.tx.clone();
        let debounce = self.debounce;
        let generation = request.generation;

        self.in_flight += 1;
        tokio::spawn(async move {
            if !debounce.is_zero() {
                tokio::time::sleep(debounce).await;
            }

            let message = if latest.load(Ordering::SeqCst) != generation {
                TaskMessage::Superseded(generation)
            } else {
                match tokio::task::spawn_blocking(move || engine.execute(&corpus, &request)).await {
                    Ok(outcome) => TaskMessage::Completed(outcome),
                    Err(e) => {
                        warn!(generation, error = %e, "search task failed");
                        TaskMessage::Failed(generation)
                    }
                }
            };

            // Receiver gone means the driver was dropped
            let _ = tx.send(message);
        });
    }
}
