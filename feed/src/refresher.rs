//! Timed snapshot refresh
//!
//! At most one fetch runs at a time. A fetch result replaces the stored
//! snapshot only on success and only while the refresher is live; failures
//! leave the previous snapshot untouched. Shutting down stops the timer but
//! lets an in-flight fetch run to completion on its own task, where its
//! result is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::FeedError;
use crate::provider::SnapshotProvider;
use crate::store::SnapshotStore;

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// New snapshot stored
    Updated,
    /// Fetch failed; previous snapshot retained
    Failed(FeedError),
    /// A fetch was already in flight
    Skipped,
    /// Fetch finished after shutdown; result dropped
    Discarded,
}

pub struct Refresher {
    provider: Arc<dyn SnapshotProvider>,
    store: SnapshotStore,
    timeout: Duration,
    in_flight: Arc<AtomicBool>,
    torn_down: Arc<AtomicBool>,
}

impl Refresher {
    pub fn new(
        provider: Arc<dyn SnapshotProvider>,
        store: SnapshotStore,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            store,
            timeout,
            in_flight: Arc::new(AtomicBool::new(false)),
            torn_down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_shut_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Start a fetch on its own task, or return `None` if one is running
    pub fn trigger(&self) -> Option<JoinHandle<RefreshOutcome>> {
        if self.is_shut_down() {
            return None;
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("Refresh skipped, fetch already in flight");
            return None;
        }

        let provider = self.provider.clone();
        let store = self.store.clone();
        let in_flight = self.in_flight.clone();
        let torn_down = self.torn_down.clone();
        let timeout = self.timeout;

        Some(tokio::spawn(async move {
            let result = match time::timeout(timeout, provider.fetch_current_state()).await {
                Ok(result) => result,
                Err(_) => Err(FeedError::Timeout),
            };

            let outcome = match result {
                _ if torn_down.load(Ordering::SeqCst) => RefreshOutcome::Discarded,
                Ok(state) => {
                    let source = provider.source();
                    // Teardown is re-checked under the write lock
                    let live = || !torn_down.load(Ordering::SeqCst);
                    if store.replace_if(state, source, live).await {
                        info!(source = ?source, "Snapshot refreshed");
                        RefreshOutcome::Updated
                    } else {
                        RefreshOutcome::Discarded
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Snapshot refresh failed, keeping previous data");
                    RefreshOutcome::Failed(e)
                }
            };
            if outcome == RefreshOutcome::Discarded {
                debug!("Refresh finished after shutdown, result discarded");
            }

            in_flight.store(false, Ordering::SeqCst);
            outcome
        }))
    }

    /// Trigger and wait for the outcome
    pub async fn refresh(&self) -> RefreshOutcome {
        match self.trigger() {
            Some(handle) => handle
                .await
                .unwrap_or_else(|e| RefreshOutcome::Failed(FeedError::Http(e.to_string()))),
            None if self.is_shut_down() => RefreshOutcome::Discarded,
            None => RefreshOutcome::Skipped,
        }
    }

    /// Run `trigger` on every tick of `interval`, starting immediately
    pub fn spawn(self: Arc<Self>, interval: Duration) -> RefreshHandle {
        let refresher = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if refresher.is_shut_down() {
                    break;
                }
                // Not awaited: a slow fetch must not delay the next tick
                let _ = refresher.trigger();
            }
        });

        RefreshHandle {
            task,
            refresher: self,
        }
    }

    fn shutdown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
    }
}

/// Owner of a running refresh timer
pub struct RefreshHandle {
    task: JoinHandle<()>,
    refresher: Arc<Refresher>,
}

impl RefreshHandle {
    pub fn refresher(&self) -> &Arc<Refresher> {
        &self.refresher
    }

    /// Stop the timer. An in-flight fetch is abandoned, not cancelled.
    pub fn shutdown(self) {
        self.refresher.shutdown();
        self.task.abort();
        debug!("Refresh timer stopped");
    }
}
