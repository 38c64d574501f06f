//! Instantaneous ecosystem metrics

use serde::{Deserialize, Serialize};

use crate::constants::PERIODS_PER_YEAR;
use crate::error::Result;
use crate::state::EcosystemState;

/// Periods the reserve can fund the current buyback volume.
///
/// A zero buyback volume against a positive reserve never depletes it;
/// that case is `Unbounded` rather than a silent `inf`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Runway {
    Periods(f64),
    Unbounded,
}

impl Runway {
    pub(crate) fn from_values(reserve_value: f64, monthly_buyback_value: f64) -> Self {
        if monthly_buyback_value > 0.0 {
            Runway::Periods(reserve_value / monthly_buyback_value)
        } else if reserve_value > 0.0 {
            Runway::Unbounded
        } else {
            Runway::Periods(0.0)
        }
    }

    /// Numeric view, `f64::INFINITY` when unbounded
    pub fn as_f64(&self) -> f64 {
        match self {
            Runway::Periods(p) => *p,
            Runway::Unbounded => f64::INFINITY,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Runway::Unbounded)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub market_cap: f64,
    pub treasury_value: f64,
    /// Fraction of total supply in circulation (0.10 = 10%)
    pub circulating_percent: f64,
    /// Tokens repurchased per period
    pub monthly_buyback_volume: f64,
    /// Currency spent on buybacks per period
    pub monthly_buyback_value: f64,
    pub buyback_runway: Runway,
    pub premium_ratio: f64,
    /// Circulation left after a year of buybacks at the current volume
    pub projected_annual_net_circulation: f64,
}

impl MetricsSnapshot {
    /// Premium over the reserve price in percent
    pub fn premium_pct(&self) -> f64 {
        (self.premium_ratio - 1.0) * 100.0
    }
}

pub fn compute_metrics(state: &EcosystemState) -> Result<MetricsSnapshot> {
    state.validate()?;

    let monthly_buyback_volume = state.circulating_supply * state.monthly_buyback_rate;
    let monthly_buyback_value = monthly_buyback_volume * state.token_price;

    Ok(MetricsSnapshot {
        market_cap: state.circulating_supply * state.token_price,
        treasury_value: state.treasury_token_balance * state.token_price + state.reserve_value(),
        circulating_percent: state.circulating_supply / state.total_supply,
        monthly_buyback_volume,
        monthly_buyback_value,
        buyback_runway: Runway::from_values(state.reserve_value(), monthly_buyback_value),
        premium_ratio: state.token_price / state.reserve_token_price,
        projected_annual_net_circulation: state.circulating_supply
            - monthly_buyback_volume * PERIODS_PER_YEAR as f64,
    })
}

/// Allocation caps used by the breakdown chart
pub const AI_FUND_CAP: f64 = 50_000_000.0;
pub const AI_FUND_OFFSET: f64 = 10_000_000.0;
pub const TEAM_PARTNER_ALLOCATION: f64 = 20_000_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub name: String,
    pub tokens: f64,
    /// Share of the sum of all slices
    pub share: f64,
}

/// Token allocation across circulating, treasury, AI fund and team pools
pub fn allocation(state: &EcosystemState) -> Vec<AllocationSlice> {
    let slices = [
        ("Circulating", state.circulating_supply),
        ("Treasury", state.treasury_token_balance),
        (
            "AI Fund Reserve",
            (AI_FUND_CAP - state.circulating_supply - AI_FUND_OFFSET).max(0.0),
        ),
        ("Team/Partners", TEAM_PARTNER_ALLOCATION),
    ];
    let total: f64 = slices.iter().map(|(_, tokens)| tokens).sum();

    slices
        .iter()
        .map(|(name, tokens)| AllocationSlice {
            name: name.to_string(),
            tokens: *tokens,
            share: if total > 0.0 { tokens / total } else { 0.0 },
        })
        .collect()
}
