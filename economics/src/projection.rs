//! Forward projection engine
//!
//! Simulates price, reserve balance and circulating supply period by period.
//! Each period depends on the one before it, so the projection is a single
//! left-to-right fold over `1..=horizon`.
//!
//! Per period:
//! 1. price compounds by the regime growth rate
//! 2. the regime sale volume is sold at the new price and the proceeds,
//!    scaled by the collateral factor, buy reserve tokens
//! 3. circulation gains the unlock volume and loses the buyback volume
//! 4. treasury value and buyback capacity are derived from the above
//!
//! Treasury value assumes treasury holdings deplete by `period * sales`
//! and prices them at the current period's price. This is an illustrative
//! approximation, not a cash-flow model.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::{
    COLLATERAL_FACTOR, LATER_GROWTH, LATER_SALES, MAX_HORIZON, MONTHLY_UNLOCKS,
    REGIME_SWITCH_PERIOD, YEAR_ONE_GROWTH, YEAR_ONE_SALES,
};
use crate::error::{EconomicsError, Result};
use crate::metrics::Runway;
use crate::state::EcosystemState;

/// Two-regime per-period value: `first` up to and including `switch_after`,
/// `later` from the following period on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeSchedule {
    pub first: f64,
    pub later: f64,
    pub switch_after: u32,
}

impl RegimeSchedule {
    pub fn at(&self, period: u32) -> f64 {
        if period <= self.switch_after {
            self.first
        } else {
            self.later
        }
    }
}

/// Model parameters for the projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Monthly price growth rate
    pub growth: RegimeSchedule,
    /// Monthly treasury token sale volume
    pub sales: RegimeSchedule,
    /// Tokens unlocked into circulation each period (negative re-locks)
    pub monthly_unlocks: f64,
    /// Share of sale proceeds converted into reserve tokens
    pub collateral_factor: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            growth: RegimeSchedule {
                first: YEAR_ONE_GROWTH,
                later: LATER_GROWTH,
                switch_after: REGIME_SWITCH_PERIOD,
            },
            sales: RegimeSchedule {
                first: YEAR_ONE_SALES,
                later: LATER_SALES,
                switch_after: REGIME_SWITCH_PERIOD,
            },
            monthly_unlocks: MONTHLY_UNLOCKS,
            collateral_factor: COLLATERAL_FACTOR,
        }
    }
}

impl ProjectionParams {
    fn validate(&self) -> Result<()> {
        let values = [
            self.growth.first,
            self.growth.later,
            self.sales.first,
            self.sales.later,
            self.monthly_unlocks,
            self.collateral_factor,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(EconomicsError::InvalidState(
                "projection parameters must be finite".to_string(),
            ));
        }
        // A rate of -100% or below drives the price to zero or negative
        if self.growth.first <= -1.0 || self.growth.later <= -1.0 {
            return Err(EconomicsError::InvalidState(
                "growth rate must be greater than -1".to_string(),
            ));
        }
        if self.sales.first < 0.0 || self.sales.later < 0.0 || self.collateral_factor < 0.0 {
            return Err(EconomicsError::InvalidState(
                "sale volume and collateral factor must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// 1-based period index
    pub period: u32,
    pub price: f64,
    pub reserve_balance: f64,
    pub circulating_supply: f64,
    pub treasury_value: f64,
    /// Native tokens the reserve could repurchase at this period's price
    pub buyback_capacity: f64,
    /// Tokens bought back during this period
    pub buyback_volume: f64,
    /// Circulation would have gone negative and was clamped to zero
    pub clamped: bool,
}

impl ProjectionPoint {
    pub fn market_cap(&self) -> f64 {
        self.circulating_supply * self.price
    }

    fn is_finite(&self) -> bool {
        [
            self.price,
            self.reserve_balance,
            self.circulating_supply,
            self.treasury_value,
            self.buyback_capacity,
            self.buyback_volume,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Circulation was forced to zero in a period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampedValueWarning {
    pub period: u32,
    /// The negative value that was replaced by zero
    pub unclamped: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub points: Vec<ProjectionPoint>,
    pub warnings: Vec<ClampedValueWarning>,
    reserve_token_price: f64,
    buyback_rate: f64,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn has_clamped(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn point(&self, period: u32) -> Option<&ProjectionPoint> {
        period
            .checked_sub(1)
            .and_then(|idx| self.points.get(idx as usize))
    }

    /// Points for the requested periods, skipping any beyond the horizon
    pub fn milestones(&self, periods: &[u32]) -> Vec<&ProjectionPoint> {
        periods.iter().filter_map(|p| self.point(*p)).collect()
    }

    /// Buyback runway at a projected point, using the snapshot's buyback rate
    pub fn runway(&self, point: &ProjectionPoint) -> Runway {
        let reserve_value = point.reserve_balance * self.reserve_token_price;
        let monthly_value = point.circulating_supply * self.buyback_rate * point.price;
        Runway::from_values(reserve_value, monthly_value)
    }
}

/// Project `horizon` periods with the baseline model parameters
pub fn project(state: &EcosystemState, horizon: u32) -> Result<Projection> {
    project_with(state, horizon, &ProjectionParams::default())
}

pub fn project_with(
    state: &EcosystemState,
    horizon: u32,
    params: &ProjectionParams,
) -> Result<Projection> {
    state.validate()?;
    params.validate()?;
    if horizon > MAX_HORIZON {
        return Err(EconomicsError::InvalidState(format!(
            "horizon {} exceeds the maximum of {} periods",
            horizon, MAX_HORIZON
        )));
    }

    let mut points = Vec::with_capacity(horizon as usize);
    let mut warnings = Vec::new();

    let mut price = state.token_price;
    let mut reserve = state.reserve_token_balance;
    let mut circulation = state.circulating_supply;

    for period in 1..=horizon {
        price *= 1.0 + params.growth.at(period);

        let sales = params.sales.at(period);
        reserve += (sales * price / state.reserve_token_price) * params.collateral_factor;

        let buyback = circulation * state.monthly_buyback_rate;
        let next = circulation + params.monthly_unlocks - buyback;
        let clamped = next < 0.0;
        if clamped {
            warn!(
                "Projected circulation clamped at period {}: {:.2} -> 0",
                period, next
            );
            warnings.push(ClampedValueWarning {
                period,
                unclamped: next,
            });
            circulation = 0.0;
        } else {
            circulation = next;
        }

        let treasury_tokens = state.treasury_token_balance - period as f64 * sales;
        let reserve_value = reserve * state.reserve_token_price;

        let point = ProjectionPoint {
            period,
            price,
            reserve_balance: reserve,
            circulating_supply: circulation,
            treasury_value: treasury_tokens * price + reserve_value,
            buyback_capacity: reserve_value / price,
            buyback_volume: buyback,
            clamped,
        };
        if !point.is_finite() {
            return Err(EconomicsError::InvalidState(format!(
                "projection overflowed at period {}",
                period
            )));
        }
        points.push(point);
    }

    Ok(Projection {
        points,
        warnings,
        reserve_token_price: state.reserve_token_price,
        buyback_rate: state.monthly_buyback_rate,
    })
}
