//! SAIT Economics Module
//!
//! Pure numeric core of the dashboard:
//! - Ecosystem state snapshots and supply derivation
//! - Historical series for chart continuity
//! - 24-period forward projection of price, reserves and circulation
//! - Instantaneous metrics (market cap, premium, buyback runway)
//!
//! Nothing in this crate performs I/O or holds state between calls.

pub mod error;
pub mod history;
pub mod metrics;
pub mod pricing;
pub mod projection;
pub mod state;
pub mod supply;

pub use error::{EconomicsError, Result};
pub use history::{generate_history, HistoricalPoint, HistoryParams};
pub use metrics::{allocation, compute_metrics, AllocationSlice, MetricsSnapshot, Runway};
pub use pricing::MarketAssumptions;
pub use projection::{
    project, project_with, ClampedValueWarning, Projection, ProjectionParams, ProjectionPoint,
    RegimeSchedule,
};
pub use state::EcosystemState;
pub use supply::SupplyBreakdown;

/// Economic constants for the baseline model
pub mod constants {
    /// Periods per year (monthly periods)
    pub const PERIODS_PER_YEAR: u32 = 12;

    /// Default projection horizon (24 months)
    pub const DEFAULT_HORIZON: u32 = 24;

    /// Longest supported projection or history series (100 years)
    pub const MAX_HORIZON: u32 = 1_200;

    /// Last period of the first growth regime
    pub const REGIME_SWITCH_PERIOD: u32 = 12;

    /// Monthly price growth, year 1 (0.83%)
    pub const YEAR_ONE_GROWTH: f64 = 0.0083;

    /// Monthly price growth, year 2+ (1.25%)
    pub const LATER_GROWTH: f64 = 0.0125;

    /// Monthly treasury token sales, year 1
    pub const YEAR_ONE_SALES: f64 = 120_833.0;

    /// Monthly treasury token sales, year 2+
    pub const LATER_SALES: f64 = 125_000.0;

    /// Monthly unlock volume (year 1 average)
    pub const MONTHLY_UNLOCKS: f64 = 583_333.0;

    /// Share of sale proceeds converted to reserve (150% overcollateralization)
    pub const COLLATERAL_FACTOR: f64 = 0.667;

    /// Reference price of the reserve token
    pub const RESERVE_TOKEN_PRICE: f64 = 150.0;

    /// Baseline native token price
    pub const BASELINE_TOKEN_PRICE: f64 = 165.0;

    /// Baseline monthly buyback rate (1.5%)
    pub const BASELINE_BUYBACK_RATE: f64 = 0.015;

    /// Fixed total supply (100M)
    pub const TOTAL_SUPPLY: f64 = 100_000_000.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regime_constants() {
        assert_eq!(constants::REGIME_SWITCH_PERIOD, 12);
        assert!(constants::LATER_GROWTH > constants::YEAR_ONE_GROWTH);
        assert!((1.0 / constants::COLLATERAL_FACTOR - 1.5).abs() < 0.01);
    }
}
