//! Ecosystem state snapshot

use serde::{Deserialize, Serialize};

use crate::constants::{
    BASELINE_BUYBACK_RATE, BASELINE_TOKEN_PRICE, RESERVE_TOKEN_PRICE, TOTAL_SUPPLY,
};
use crate::error::{EconomicsError, Result};

/// Snapshot of the token ecosystem consumed by every computation.
///
/// Values are plain `f64` token and currency amounts. A snapshot is never
/// mutated by the engine; each call receives its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemState {
    /// Tokens outside treasury and locked pools
    pub circulating_supply: f64,
    /// Native tokens held by the treasury
    pub treasury_token_balance: f64,
    /// Reserve token units held by the treasury
    pub reserve_token_balance: f64,
    /// Current native token price
    pub token_price: f64,
    /// Fixed reference price of the reserve token
    pub reserve_token_price: f64,
    /// Fraction of circulating supply repurchased per period
    pub monthly_buyback_rate: f64,
    /// Upper bound on all tokens ever minted
    pub total_supply: f64,
}

impl EcosystemState {
    /// Year-one baseline used before any live data is available
    pub fn baseline() -> Self {
        Self {
            circulating_supply: 10_000_000.0,
            treasury_token_balance: 28_550_000.0,
            reserve_token_balance: 1_629_000.0,
            token_price: BASELINE_TOKEN_PRICE,
            reserve_token_price: RESERVE_TOKEN_PRICE,
            monthly_buyback_rate: BASELINE_BUYBACK_RATE,
            total_supply: TOTAL_SUPPLY,
        }
    }

    /// Check the snapshot invariants.
    ///
    /// Prices and total supply must be strictly positive, balances
    /// non-negative, circulation bounded by total supply and the buyback
    /// rate inside `[0, 1)`. Non-finite values are rejected outright.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("circulating supply", self.circulating_supply),
            ("treasury token balance", self.treasury_token_balance),
            ("reserve token balance", self.reserve_token_balance),
            ("token price", self.token_price),
            ("reserve token price", self.reserve_token_price),
            ("buyback rate", self.monthly_buyback_rate),
            ("total supply", self.total_supply),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(EconomicsError::InvalidState(format!(
                    "{} is not finite: {}",
                    name, value
                )));
            }
        }

        if self.token_price <= 0.0 {
            return Err(EconomicsError::InvalidState(format!(
                "token price must be positive, got {}",
                self.token_price
            )));
        }
        if self.reserve_token_price <= 0.0 {
            return Err(EconomicsError::InvalidState(format!(
                "reserve token price must be positive, got {}",
                self.reserve_token_price
            )));
        }
        if self.total_supply <= 0.0 {
            return Err(EconomicsError::InvalidState(format!(
                "total supply must be positive, got {}",
                self.total_supply
            )));
        }
        if self.circulating_supply < 0.0
            || self.treasury_token_balance < 0.0
            || self.reserve_token_balance < 0.0
        {
            return Err(EconomicsError::InvalidState(
                "supply and balances must be non-negative".to_string(),
            ));
        }
        if self.circulating_supply > self.total_supply {
            return Err(EconomicsError::InvalidState(format!(
                "circulating supply {} exceeds total supply {}",
                self.circulating_supply, self.total_supply
            )));
        }
        if !(0.0..1.0).contains(&self.monthly_buyback_rate) {
            return Err(EconomicsError::InvalidState(format!(
                "buyback rate must be in [0, 1), got {}",
                self.monthly_buyback_rate
            )));
        }

        Ok(())
    }

    /// Reserve holdings valued at the reference price
    pub fn reserve_value(&self) -> f64 {
        self.reserve_token_balance * self.reserve_token_price
    }
}

impl Default for EcosystemState {
    fn default() -> Self {
        Self::baseline()
    }
}
