//! Grant records

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::config::MAX_PARTICIPATION_PCT;
use crate::error::{GovernanceError, Result};

/// Grant size bucket, serialized as its number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GrantTier {
    One,
    Two,
    Three,
}

impl GrantTier {
    pub const ALL: [GrantTier; 3] = [GrantTier::One, GrantTier::Two, GrantTier::Three];

    pub fn number(&self) -> u8 {
        match self {
            GrantTier::One => 1,
            GrantTier::Two => 2,
            GrantTier::Three => 3,
        }
    }

    /// Position in tier-indexed arrays
    pub fn index(&self) -> usize {
        self.number() as usize - 1
    }
}

impl TryFrom<u8> for GrantTier {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(GrantTier::One),
            2 => Ok(GrantTier::Two),
            3 => Ok(GrantTier::Three),
            other => Err(format!("grant tier must be 1, 2 or 3, got {}", other)),
        }
    }
}

impl From<GrantTier> for u8 {
    fn from(tier: GrantTier) -> Self {
        tier.number()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantStatus {
    /// Funded and delivered
    Completed,
    /// Currently receiving disbursements
    Receiving,
    /// Application under review
    Applying,
}

/// A single grant as recorded by the governance process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRecord {
    pub id: String,
    /// Quarter label, e.g. "Q3 2025"
    #[serde(alias = "quarter")]
    pub period: String,
    pub tier: GrantTier,
    pub title: String,
    pub value: f64,
    pub status: GrantStatus,
    #[serde(alias = "voterParticipation")]
    pub voter_participation_pct: f64,
    pub total_votes: u32,
}

impl GrantRecord {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(GovernanceError::InvalidRecord(
                "grant id must not be empty".to_string(),
            ));
        }
        if !self.value.is_finite() || self.value <= 0.0 {
            return Err(GovernanceError::InvalidRecord(format!(
                "{}: value must be positive, got {}",
                self.id, self.value
            )));
        }
        if !(0.0..=MAX_PARTICIPATION_PCT).contains(&self.voter_participation_pct) {
            return Err(GovernanceError::InvalidRecord(format!(
                "{}: participation must be within 0-100%, got {}",
                self.id, self.voter_participation_pct
            )));
        }
        Ok(())
    }
}

/// Check every record and reject duplicate ids
pub fn validate_records(records: &[GrantRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        record.validate()?;
        if !seen.insert(record.id.as_str()) {
            return Err(GovernanceError::InvalidRecord(format!(
                "duplicate grant id {}",
                record.id
            )));
        }
    }
    Ok(())
}

/// Load grant records from a JSON array file
pub fn load_grants(path: &Path) -> Result<Vec<GrantRecord>> {
    let contents = std::fs::read_to_string(path)?;
    let records: Vec<GrantRecord> = serde_json::from_str(&contents)?;
    validate_records(&records)?;
    log::debug!("Loaded {} grant records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> GrantRecord {
        GrantRecord {
            id: id.to_string(),
            period: "Q2 2025".to_string(),
            tier: GrantTier::Two,
            title: "Test".to_string(),
            value: 500_000.0,
            status: GrantStatus::Receiving,
            voter_participation_pct: 41.8,
            total_votes: 218,
        }
    }

    #[test]
    fn test_tier_round_trip_numbers() {
        for tier in GrantTier::ALL {
            assert_eq!(GrantTier::try_from(tier.number()), Ok(tier));
        }
        assert!(GrantTier::try_from(4).is_err());
        assert_eq!(GrantTier::Three.index(), 2);
    }

    #[test]
    fn test_parses_legacy_field_names() {
        let json = r#"{
            "id": "G-2025-002",
            "quarter": "Q2 2025",
            "tier": 2,
            "title": "Interpretable AI Decision Systems",
            "value": 500000,
            "status": "receiving",
            "voterParticipation": 41.8,
            "totalVotes": 218
        }"#;
        let parsed: GrantRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.period, "Q2 2025");
        assert_eq!(parsed.tier, GrantTier::Two);
        assert_eq!(parsed.status, GrantStatus::Receiving);
        assert_eq!(parsed.voter_participation_pct, 41.8);
    }

    #[test]
    fn test_rejects_bad_tier() {
        let json = r#"{"id":"x","period":"Q1","tier":5,"title":"t","value":1,
            "status":"completed","voterParticipationPct":1,"totalVotes":1}"#;
        assert!(serde_json::from_str::<GrantRecord>(json).is_err());
    }

    #[test]
    fn test_validation() {
        assert!(record("a").validate().is_ok());

        let mut bad = record("a");
        bad.value = 0.0;
        assert!(bad.validate().is_err());

        let mut bad = record("a");
        bad.voter_participation_pct = 100.5;
        assert!(bad.validate().is_err());

        let mut bad = record("a");
        bad.id = " ".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let records = vec![record("a"), record("b"), record("a")];
        let err = validate_records(&records).unwrap_err();
        assert!(err.to_string().contains("duplicate grant id a"));
    }
}
