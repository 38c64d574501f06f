//! Supply derivation from holder balances

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pricing::MarketAssumptions;
use crate::state::EcosystemState;

/// Token balances of the locked holders, as read from the token contract.
///
/// Circulating supply is whatever the locked holders do not own.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SupplyBreakdown {
    pub total_supply: f64,
    pub treasury: f64,
    pub ai_fund_reserve: f64,
    pub team: f64,
    pub partner: f64,
    /// Reserve token units held by the treasury
    pub reserve_treasury: f64,
}

impl SupplyBreakdown {
    pub fn locked(&self) -> f64 {
        self.treasury + self.ai_fund_reserve + self.team + self.partner
    }

    pub fn circulating(&self) -> f64 {
        (self.total_supply - self.locked()).max(0.0)
    }

    /// Merge the balances with price assumptions into a validated snapshot
    pub fn into_state(self, market: MarketAssumptions) -> Result<EcosystemState> {
        let state = EcosystemState {
            circulating_supply: self.circulating(),
            treasury_token_balance: self.treasury,
            reserve_token_balance: self.reserve_treasury,
            token_price: market.token_price,
            reserve_token_price: market.reserve_token_price,
            monthly_buyback_rate: market.monthly_buyback_rate,
            total_supply: self.total_supply,
        };
        state.validate()?;
        Ok(state)
    }
}
