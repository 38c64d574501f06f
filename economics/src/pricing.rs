//! Market price assumptions
//!
//! Prices and the buyback rate are not readable on-chain; they are supplied
//! alongside fetched balances until an oracle feed exists.

use serde::{Deserialize, Serialize};

use crate::constants::{BASELINE_BUYBACK_RATE, BASELINE_TOKEN_PRICE, RESERVE_TOKEN_PRICE};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    #[serde(default = "default_token_price")]
    pub token_price: f64,
    #[serde(default = "default_reserve_token_price")]
    pub reserve_token_price: f64,
    #[serde(default = "default_buyback_rate")]
    pub monthly_buyback_rate: f64,
}

fn default_token_price() -> f64 {
    BASELINE_TOKEN_PRICE
}

fn default_reserve_token_price() -> f64 {
    RESERVE_TOKEN_PRICE
}

fn default_buyback_rate() -> f64 {
    BASELINE_BUYBACK_RATE
}

impl MarketAssumptions {
    /// Premium of the native token over the reserve reference price
    pub fn premium_ratio(&self) -> f64 {
        self.token_price / self.reserve_token_price
    }
}

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self {
            token_price: default_token_price(),
            reserve_token_price: default_reserve_token_price(),
            monthly_buyback_rate: default_buyback_rate(),
        }
    }
}
