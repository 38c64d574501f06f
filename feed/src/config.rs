//! Dashboard configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no
//! file at all) yields a baseline-only dashboard.

use sait_economics::constants::MAX_HORIZON;
use sait_economics::MarketAssumptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{FeedError, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "SAIT_DASHBOARD_CONFIG";
pub const RPC_URL_ENV: &str = "SAIT_RPC_URL";
pub const TOKEN_ADDRESS_ENV: &str = "SAIT_TOKEN_ADDRESS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub token: Option<String>,
    pub reserve_token: Option<String>,
    pub treasury: Option<String>,
    pub ai_fund: Option<String>,
    pub team: Option<String>,
    pub partner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub rpc_url: Option<String>,

    #[serde(default)]
    pub addresses: ContractAddresses,

    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default = "default_horizon_periods")]
    pub horizon_periods: u32,

    #[serde(default = "default_history_periods")]
    pub history_periods: u32,

    #[serde(default)]
    pub market: MarketAssumptions,

    #[serde(default)]
    pub grants_file: Option<PathBuf>,
}

fn default_refresh_interval_secs() -> u64 {
    60
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_horizon_periods() -> u32 {
    24
}

fn default_history_periods() -> u32 {
    12
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            rpc_url: None,
            addresses: ContractAddresses::default(),
            refresh_interval_secs: default_refresh_interval_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            horizon_periods: default_horizon_periods(),
            history_periods: default_history_periods(),
            market: MarketAssumptions::default(),
            grants_file: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: DashboardConfig =
            toml::from_str(contents).map_err(|e| FeedError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FeedError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Resolve the config: explicit path, then `SAIT_DASHBOARD_CONFIG`,
    /// then defaults. Environment overrides apply last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(env_path) {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(RPC_URL_ENV).filter(|v| !v.is_empty()) {
            self.rpc_url = Some(url);
        }
        if let Some(token) = lookup(TOKEN_ADDRESS_ENV).filter(|v| !v.is_empty()) {
            self.addresses.token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            return Err(FeedError::Config(
                "refresh_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(FeedError::Config(
                "fetch_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.horizon_periods > MAX_HORIZON {
            return Err(FeedError::Config(format!(
                "horizon_periods must be at most {}",
                MAX_HORIZON
            )));
        }
        if self.history_periods > MAX_HORIZON {
            return Err(FeedError::Config(format!(
                "history_periods must be at most {}",
                MAX_HORIZON
            )));
        }
        Ok(())
    }

    /// Live data needs at least an RPC endpoint and the token contract
    pub fn is_configured(&self) -> bool {
        self.rpc_url.as_deref().is_some_and(|u| !u.is_empty())
            && self.addresses.token.as_deref().is_some_and(|a| !a.is_empty())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
