//! SAIT Governance Dashboard
//!
//! Terminal dashboard for the SAIT token ecosystem: price and supply
//! metrics, reserve-backed buyback analytics, a 24-month projection and
//! the grant governance audit.

mod render;
mod report;

use anyhow::Context;
use clap::Parser;
use sait_economics::EcosystemState;
use sait_feed::{
    BaselineProvider, DashboardConfig, RefreshHandle, Refresher, RpcSnapshotProvider,
    SnapshotProvider, SnapshotStore,
};
use sait_governance::{load_grants, seed_grants, GrantRecord};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::report::Report;

/// Redraw period for the live view
const REDRAW_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "sait-dashboard")]
#[command(about = "SAIT ecosystem metrics and grant governance dashboard")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render a single frame and exit
    #[arg(long)]
    once: bool,

    /// Print the report as JSON and exit
    #[arg(long)]
    json: bool,

    /// Override the projection horizon
    #[arg(long, value_name = "PERIODS")]
    horizon: Option<u32>,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_grant_records(config: &DashboardConfig) -> anyhow::Result<Vec<GrantRecord>> {
    match &config.grants_file {
        Some(path) => load_grants(path)
            .with_context(|| format!("loading grants from {}", path.display())),
        None => Ok(seed_grants()),
    }
}

/// The on-chain provider when configured, otherwise none
fn live_provider(config: &DashboardConfig) -> Option<Arc<dyn SnapshotProvider>> {
    if !config.is_configured() {
        info!("Web3 not configured - using baseline data");
        return None;
    }
    match RpcSnapshotProvider::from_config(config) {
        Ok(provider) => Some(Arc::new(provider)),
        Err(e) => {
            warn!(error = %e, "On-chain provider unavailable - using baseline data");
            None
        }
    }
}

async fn initial_state(config: &DashboardConfig) -> anyhow::Result<EcosystemState> {
    let state = BaselineProvider::new(config.market)
        .fetch_current_state()
        .await
        .context("baseline market assumptions are invalid")?;
    Ok(state)
}

async fn build_report(
    store: &SnapshotStore,
    grants: &[GrantRecord],
    config: &DashboardConfig,
) -> anyhow::Result<Report> {
    let snapshot = store.current().await;
    let report = Report::build(
        snapshot,
        grants,
        config.horizon_periods,
        config.history_periods,
    )?;
    Ok(report)
}

async fn run_live(
    store: SnapshotStore,
    grants: Vec<GrantRecord>,
    config: DashboardConfig,
    refresh: Option<RefreshHandle>,
) {
    let mut ticker = time::interval(REDRAW_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match build_report(&store, &grants, &config).await {
                    Ok(report) => {
                        render::clear_screen();
                        render::render(&report, true);
                    }
                    Err(e) => error!(error = %e, "Failed to compute dashboard"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    if let Some(handle) = refresh {
        handle.shutdown();
    }
    println!("Dashboard stopped gracefully.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(horizon) = cli.horizon {
        config.horizon_periods = horizon;
        config.validate()?;
    }

    let grants = load_grant_records(&config)?;
    let store = SnapshotStore::new(initial_state(&config).await?);
    let refresher = live_provider(&config)
        .map(|provider| Arc::new(Refresher::new(provider, store.clone(), config.fetch_timeout())));

    if cli.once || cli.json {
        if let Some(refresher) = &refresher {
            refresher.refresh().await;
        }
        let report = build_report(&store, &grants, &config).await?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            render::render(&report, false);
        }
        return Ok(());
    }

    let refresh = refresher.map(|r| r.spawn(config.refresh_interval()));
    run_live(store, grants, config, refresh).await;
    Ok(())
}
