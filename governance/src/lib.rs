//! SAIT Governance Module
//!
//! Grant governance audit: quarterly funding rounds, tiers and voter
//! participation. Quarterly roll-ups are always derived from the grant
//! records themselves.

pub mod audit;
pub mod error;
pub mod grant;
pub mod seed;

pub use audit::{aggregate, GrantAudit, QuarterlyRollup, SummaryStats, TierTotals};
pub use error::{GovernanceError, Result};
pub use grant::{load_grants, validate_records, GrantRecord, GrantStatus, GrantTier};
pub use seed::seed_grants;

/// Grant governance constants
pub mod config {
    /// Number of grant tiers
    pub const TIER_COUNT: usize = 3;

    /// Upper bound of voter participation (percent)
    pub const MAX_PARTICIPATION_PCT: f64 = 100.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governance_constants() {
        assert_eq!(config::TIER_COUNT, GrantTier::ALL.len());
        assert_eq!(config::MAX_PARTICIPATION_PCT, 100.0);
    }
}
