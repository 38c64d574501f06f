//! Synthetic backward-looking series for chart continuity
//!
//! The series is illustrative: every field grows by a fixed linear step,
//! no compounding.

use serde::{Deserialize, Serialize};

use crate::constants::PERIODS_PER_YEAR;
use crate::state::EcosystemState;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    /// Zero-based index in the series
    pub index: u32,
    pub label: String,
    pub price: f64,
    pub circulation: f64,
    pub buyback_volume: f64,
    pub reserve_balance: f64,
}

/// Linear increments for each series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryParams {
    /// Appreciation reached after one year of steps
    pub annual_appreciation: f64,
    pub circulation_start: f64,
    pub circulation_step: f64,
    pub buyback_start: f64,
    pub buyback_step: f64,
    pub reserve_start: f64,
    pub reserve_step: f64,
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self {
            annual_appreciation: 0.10,
            circulation_start: 3_000_000.0,
            circulation_step: 583_333.0,
            buyback_start: 24_000.0,
            buyback_step: 26_000.0,
            reserve_start: 113_000.0,
            reserve_step: 126_416.0,
        }
    }
}

impl HistoryParams {
    /// Per-period price increment for a given starting price
    pub fn price_step(&self, start_price: f64) -> f64 {
        start_price * self.annual_appreciation / PERIODS_PER_YEAR as f64
    }
}

/// Generate `periods` points with the default increments
pub fn generate_history(baseline: &EcosystemState, periods: u32) -> Vec<HistoricalPoint> {
    generate_history_with(baseline, periods, &HistoryParams::default())
}

pub fn generate_history_with(
    baseline: &EcosystemState,
    periods: u32,
    params: &HistoryParams,
) -> Vec<HistoricalPoint> {
    let price_step = params.price_step(baseline.token_price);

    (0..periods)
        .map(|i| {
            let step = i as f64;
            HistoricalPoint {
                index: i,
                label: MONTH_LABELS[i as usize % MONTH_LABELS.len()].to_string(),
                price: baseline.token_price + step * price_step,
                circulation: params.circulation_start + step * params.circulation_step,
                buyback_volume: params.buyback_start + step * params.buyback_step,
                reserve_balance: params.reserve_start + step * params.reserve_step,
            }
        })
        .collect()
}
