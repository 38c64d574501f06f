//! Everything one dashboard frame shows, computed from a single snapshot

use sait_economics::{
    allocation, compute_metrics, generate_history, project, AllocationSlice, EcosystemState,
    HistoricalPoint, MetricsSnapshot, Projection, Runway,
};
use sait_feed::StoredSnapshot;
use sait_governance::{aggregate, GrantAudit, GrantRecord};
use serde::Serialize;

/// Periods shown in the projection summary table
pub const MILESTONE_PERIODS: [u32; 4] = [6, 12, 18, 24];

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneRow {
    pub period: u32,
    pub price: f64,
    pub market_cap: f64,
    pub reserve_balance: f64,
    pub treasury_value: f64,
    pub runway: Runway,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub snapshot: StoredSnapshot,
    pub metrics: MetricsSnapshot,
    pub allocation: Vec<AllocationSlice>,
    pub history: Vec<HistoricalPoint>,
    pub projection: Projection,
    pub milestones: Vec<MilestoneRow>,
    pub grants: Vec<GrantRecord>,
    pub audit: GrantAudit,
}

impl Report {
    pub fn build(
        snapshot: StoredSnapshot,
        grants: &[GrantRecord],
        horizon: u32,
        history_periods: u32,
    ) -> sait_economics::Result<Self> {
        let state = snapshot.state;
        let metrics = compute_metrics(&state)?;
        let projection = project(&state, horizon)?;

        let milestones = projection
            .milestones(&MILESTONE_PERIODS)
            .into_iter()
            .map(|p| MilestoneRow {
                period: p.period,
                price: p.price,
                market_cap: p.market_cap(),
                reserve_balance: p.reserve_balance,
                treasury_value: p.treasury_value,
                runway: projection.runway(p),
            })
            .collect();

        Ok(Self {
            snapshot,
            metrics,
            allocation: allocation(&state),
            // History is illustrative and always anchored on the baseline
            history: generate_history(&EcosystemState::baseline(), history_periods),
            projection,
            milestones,
            grants: grants.to_vec(),
            audit: aggregate(grants),
        })
    }

    pub fn state(&self) -> &EcosystemState {
        &self.snapshot.state
    }
}
