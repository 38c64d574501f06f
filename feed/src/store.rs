//! Externally owned snapshot container
//!
//! The pure core never holds state between calls. The dashboard keeps the
//! latest snapshot here and hands a copy to each recomputation.

use chrono::{DateTime, Utc};
use sait_economics::EcosystemState;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Baseline,
    OnChain,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredSnapshot {
    pub state: EcosystemState,
    pub source: DataSource,
    /// Time of the last successful replacement
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    inner: Arc<RwLock<StoredSnapshot>>,
}

impl SnapshotStore {
    pub fn new(state: EcosystemState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoredSnapshot {
                state,
                source: DataSource::Baseline,
                updated_at: None,
            })),
        }
    }

    pub async fn current(&self) -> StoredSnapshot {
        self.inner.read().await.clone()
    }

    pub async fn state(&self) -> EcosystemState {
        self.inner.read().await.state
    }

    /// Swap in a new snapshot as a whole
    pub async fn replace(&self, state: EcosystemState, source: DataSource) {
        self.replace_if(state, source, || true).await;
    }

    /// Swap in a new snapshot only if `accept` holds once the write lock is
    /// taken. Returns whether the snapshot was written.
    pub async fn replace_if(
        &self,
        state: EcosystemState,
        source: DataSource,
        accept: impl FnOnce() -> bool,
    ) -> bool {
        let mut guard = self.inner.write().await;
        if !accept() {
            return false;
        }
        *guard = StoredSnapshot {
            state,
            source,
            updated_at: Some(Utc::now()),
        };
        true
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(EcosystemState::baseline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_swaps_whole_snapshot() {
        let store = SnapshotStore::default();
        let initial = store.current().await;
        assert_eq!(initial.source, DataSource::Baseline);
        assert!(initial.updated_at.is_none());

        let mut next = EcosystemState::baseline();
        next.circulating_supply = 12_000_000.0;
        store.replace(next, DataSource::OnChain).await;

        let current = store.current().await;
        assert_eq!(current.state, next);
        assert_eq!(current.source, DataSource::OnChain);
        assert!(current.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_rejected_replace_leaves_snapshot() {
        let store = SnapshotStore::default();
        let mut next = EcosystemState::baseline();
        next.token_price = 180.0;

        assert!(!store.replace_if(next, DataSource::OnChain, || false).await);
        let current = store.current().await;
        assert_eq!(current.state, EcosystemState::baseline());
        assert!(current.updated_at.is_none());

        assert!(store.replace_if(next, DataSource::OnChain, || true).await);
        assert_eq!(store.state().await.token_price, 180.0);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let store = SnapshotStore::default();
        let other = store.clone();

        let mut next = EcosystemState::baseline();
        next.token_price = 170.0;
        other.replace(next, DataSource::OnChain).await;

        assert_eq!(store.state().await.token_price, 170.0);
    }
}
