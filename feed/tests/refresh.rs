use async_trait::async_trait;
use sait_economics::EcosystemState;
use sait_feed::*;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

struct MockProvider {
    results: Mutex<VecDeque<Result<EcosystemState>>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
    delay: Option<Duration>,
}

impl MockProvider {
    fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            gate: None,
            delay: None,
        }
    }

    fn with_results(results: Vec<Result<EcosystemState>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            ..Self::new()
        }
    }

    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn live_state() -> EcosystemState {
    let mut state = EcosystemState::baseline();
    state.circulating_supply = 11_000_000.0;
    state
}

#[async_trait]
impl SnapshotProvider for MockProvider {
    async fn fetch_current_state(&self) -> Result<EcosystemState> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.results.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(live_state()))
    }

    fn source(&self) -> DataSource {
        DataSource::OnChain
    }
}

fn refresher(provider: Arc<MockProvider>) -> Arc<Refresher> {
    Arc::new(Refresher::new(
        provider,
        SnapshotStore::default(),
        Duration::from_secs(10),
    ))
}

#[tokio::test]
async fn test_successful_refresh_replaces_snapshot() {
    let provider = Arc::new(MockProvider::new());
    let refresher = refresher(provider.clone());

    assert_eq!(refresher.refresh().await, RefreshOutcome::Updated);

    let snapshot = refresher.store().current().await;
    assert_eq!(snapshot.state, live_state());
    assert_eq!(snapshot.source, DataSource::OnChain);
    assert!(snapshot.updated_at.is_some());
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let provider = Arc::new(MockProvider::with_results(vec![
        Ok(live_state()),
        Err(FeedError::Http("connection refused".to_string())),
    ]));
    let refresher = refresher(provider);

    assert_eq!(refresher.refresh().await, RefreshOutcome::Updated);
    let before = refresher.store().current().await;

    let outcome = refresher.refresh().await;
    assert_eq!(
        outcome,
        RefreshOutcome::Failed(FeedError::Http("connection refused".to_string()))
    );
    assert_eq!(refresher.store().current().await, before);
    assert!(!refresher.is_in_flight());
}

#[tokio::test]
async fn test_single_flight() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(MockProvider::gated(gate.clone()));
    let refresher = refresher(provider.clone());

    let first = refresher.trigger().expect("first fetch should start");
    assert!(refresher.is_in_flight());
    assert!(refresher.trigger().is_none());
    assert_eq!(refresher.refresh().await, RefreshOutcome::Skipped);

    gate.notify_one();
    assert_eq!(first.await.unwrap(), RefreshOutcome::Updated);
    assert_eq!(provider.calls(), 1);

    // The slot is free again once the fetch resolves
    gate.notify_one();
    assert_eq!(refresher.refresh().await, RefreshOutcome::Updated);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_shutdown_discards_in_flight_result() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(MockProvider::gated(gate.clone()));
    let refresher = refresher(provider.clone());

    let handle = refresher.clone().spawn(Duration::from_secs(60));
    let in_flight = handle.refresher().trigger().expect("fetch should start");

    handle.shutdown();
    gate.notify_one();

    assert_eq!(in_flight.await.unwrap(), RefreshOutcome::Discarded);
    let snapshot = refresher.store().current().await;
    assert_eq!(snapshot.source, DataSource::Baseline);
    assert_eq!(snapshot.state, EcosystemState::baseline());
    assert!(refresher.trigger().is_none());
    assert_eq!(refresher.refresh().await, RefreshOutcome::Discarded);
}

#[tokio::test(start_paused = true)]
async fn test_fetch_timeout_is_a_failure() {
    let provider = Arc::new(MockProvider {
        delay: Some(Duration::from_secs(60)),
        ..MockProvider::new()
    });
    let refresher = refresher(provider);

    assert_eq!(
        refresher.refresh().await,
        RefreshOutcome::Failed(FeedError::Timeout)
    );
    assert_eq!(refresher.store().current().await.source, DataSource::Baseline);
    assert!(!refresher.is_in_flight());
}

#[tokio::test(start_paused = true)]
async fn test_timer_fetches_each_interval_until_shutdown() {
    let provider = Arc::new(MockProvider::new());
    let refresher = refresher(provider.clone());

    let handle = refresher.clone().spawn(Duration::from_secs(60));
    tokio::time::sleep(Duration::from_secs(125)).await;
    assert_eq!(provider.calls(), 3);
    assert_eq!(refresher.store().current().await.source, DataSource::OnChain);

    handle.shutdown();
    tokio::time::sleep(Duration::from_secs(300)).await;
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn test_baseline_provider_through_refresher() {
    let provider = Arc::new(BaselineProvider::new(Default::default()));
    let refresher = Refresher::new(provider, SnapshotStore::default(), Duration::from_secs(10));

    assert_eq!(refresher.refresh().await, RefreshOutcome::Updated);

    let snapshot = refresher.store().current().await;
    assert_eq!(snapshot.state, EcosystemState::baseline());
    assert_eq!(snapshot.source, DataSource::Baseline);
    assert!(snapshot.updated_at.is_some());
}

#[test]
fn test_config_file_round_trip() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "horizon_periods = 36\n[market]\nmonthly_buyback_rate = 0.02").unwrap();

    let config = DashboardConfig::from_file(file.path()).unwrap();
    assert_eq!(config.horizon_periods, 36);
    assert_eq!(config.market.monthly_buyback_rate, 0.02);
    assert!(DashboardConfig::from_file(std::path::Path::new("/nonexistent.toml")).is_err());
}
