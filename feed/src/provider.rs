//! Snapshot providers
//!
//! A provider produces a validated `EcosystemState` or a `FeedError`. It
//! never panics on network or decode failures, so callers can always fall
//! back to the snapshot they already hold.

use async_trait::async_trait;
use sait_economics::{EcosystemState, MarketAssumptions, SupplyBreakdown};
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::error::{FeedError, Result};
use crate::rpc::RpcClient;
use crate::store::DataSource;

#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn fetch_current_state(&self) -> Result<EcosystemState>;

    /// Label stored alongside every snapshot this provider produces
    fn source(&self) -> DataSource;
}

/// Serves the built-in baseline with the configured price assumptions
pub struct BaselineProvider {
    market: MarketAssumptions,
}

impl BaselineProvider {
    pub fn new(market: MarketAssumptions) -> Self {
        Self { market }
    }
}

#[async_trait]
impl SnapshotProvider for BaselineProvider {
    async fn fetch_current_state(&self) -> Result<EcosystemState> {
        let state = EcosystemState {
            token_price: self.market.token_price,
            reserve_token_price: self.market.reserve_token_price,
            monthly_buyback_rate: self.market.monthly_buyback_rate,
            ..EcosystemState::baseline()
        };
        state.validate()?;
        Ok(state)
    }

    fn source(&self) -> DataSource {
        DataSource::Baseline
    }
}

/// Contract addresses the RPC provider reads from
#[derive(Debug, Clone)]
struct Holders {
    token: String,
    reserve_token: String,
    treasury: String,
    ai_fund: String,
    team: String,
    partner: String,
}

/// Reads holder balances from the token contracts over JSON-RPC
pub struct RpcSnapshotProvider {
    rpc: RpcClient,
    holders: Holders,
    market: MarketAssumptions,
}

impl RpcSnapshotProvider {
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(FeedError::NotConfigured(
                "rpc_url and addresses.token are required".to_string(),
            ));
        }
        let url = config.rpc_url.clone().unwrap_or_default();
        let addresses = &config.addresses;
        let require = |name: &str, value: &Option<String>| {
            value
                .clone()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| FeedError::Config(format!("missing address: {}", name)))
        };

        let holders = Holders {
            token: require("token", &addresses.token)?,
            reserve_token: require("reserve_token", &addresses.reserve_token)?,
            treasury: require("treasury", &addresses.treasury)?,
            ai_fund: require("ai_fund", &addresses.ai_fund)?,
            team: require("team", &addresses.team)?,
            partner: require("partner", &addresses.partner)?,
        };

        Ok(Self {
            rpc: RpcClient::new(url, config.fetch_timeout())?,
            holders,
            market: config.market,
        })
    }

    async fn fetch_supply(&self) -> Result<SupplyBreakdown> {
        let h = &self.holders;
        let decimals = self.rpc.decimals(&h.token).await?;
        let reserve_decimals = self.rpc.decimals(&h.reserve_token).await?;

        let (total_supply, treasury, ai_fund_reserve, team, partner, reserve_treasury) =
            tokio::try_join!(
                self.rpc.total_supply(&h.token, decimals),
                self.rpc.balance_of(&h.token, &h.treasury, decimals),
                self.rpc.balance_of(&h.token, &h.ai_fund, decimals),
                self.rpc.balance_of(&h.token, &h.team, decimals),
                self.rpc.balance_of(&h.token, &h.partner, decimals),
                self.rpc
                    .balance_of(&h.reserve_token, &h.treasury, reserve_decimals),
            )?;

        Ok(SupplyBreakdown {
            total_supply,
            treasury,
            ai_fund_reserve,
            team,
            partner,
            reserve_treasury,
        })
    }
}

#[async_trait]
impl SnapshotProvider for RpcSnapshotProvider {
    async fn fetch_current_state(&self) -> Result<EcosystemState> {
        debug!(token = %self.holders.token, "Fetching on-chain balances");
        let supply = self.fetch_supply().await?;
        let state = supply.into_state(self.market)?;
        info!(
            circulating = state.circulating_supply,
            treasury = state.treasury_token_balance,
            reserve = state.reserve_token_balance,
            "On-chain snapshot fetched"
        );
        Ok(state)
    }

    fn source(&self) -> DataSource {
        DataSource::OnChain
    }
}
