//! Grant audit aggregation
//!
//! Roll-ups are grouped by quarter label in first-seen order of the input.
//! The summary participation figure is the mean of per-quarter means, so a
//! quarter with few grants weighs as much as a busy one. The vote-weighted
//! average is reported next to it for comparison.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::TIER_COUNT;
use crate::grant::{GrantRecord, GrantStatus, GrantTier};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TierTotals {
    pub count: u32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyRollup {
    pub period: String,
    pub completed: u32,
    pub receiving: u32,
    pub applying: u32,
    /// Indexed by `GrantTier::index`
    pub tiers: [TierTotals; TIER_COUNT],
    pub total_committed: f64,
    pub mean_participation: f64,
    pub total_votes: u64,
}

impl QuarterlyRollup {
    fn empty(period: &str) -> Self {
        Self {
            period: period.to_string(),
            completed: 0,
            receiving: 0,
            applying: 0,
            tiers: [TierTotals::default(); TIER_COUNT],
            total_committed: 0.0,
            mean_participation: 0.0,
            total_votes: 0,
        }
    }

    pub fn tier(&self, tier: GrantTier) -> &TierTotals {
        &self.tiers[tier.index()]
    }

    pub fn grant_count(&self) -> u32 {
        self.completed + self.receiving + self.applying
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_committed: f64,
    pub total_grants: u32,
    /// Mean of the per-quarter mean participation
    pub mean_participation: f64,
    /// Participation weighted by each grant's vote count
    pub vote_weighted_participation: f64,
    pub total_votes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrantAudit {
    pub rollups: Vec<QuarterlyRollup>,
    pub summary: SummaryStats,
}

impl GrantAudit {
    /// Latest quarter in output order
    pub fn current_quarter(&self) -> Option<&QuarterlyRollup> {
        self.rollups.last()
    }
}

pub fn aggregate(records: &[GrantRecord]) -> GrantAudit {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rollups: Vec<QuarterlyRollup> = Vec::new();
    let mut participation_sums: Vec<f64> = Vec::new();

    let mut weighted_sum = 0.0;
    let mut summary = SummaryStats::default();

    for record in records {
        let slot = *index.entry(record.period.as_str()).or_insert_with(|| {
            rollups.push(QuarterlyRollup::empty(&record.period));
            participation_sums.push(0.0);
            rollups.len() - 1
        });
        let rollup = &mut rollups[slot];

        match record.status {
            GrantStatus::Completed => rollup.completed += 1,
            GrantStatus::Receiving => rollup.receiving += 1,
            GrantStatus::Applying => rollup.applying += 1,
        }

        let tier = &mut rollup.tiers[record.tier.index()];
        tier.count += 1;
        tier.value += record.value;

        rollup.total_committed += record.value;
        rollup.total_votes += u64::from(record.total_votes);
        participation_sums[slot] += record.voter_participation_pct;

        weighted_sum += record.voter_participation_pct * f64::from(record.total_votes);
        summary.total_committed += record.value;
        summary.total_grants += 1;
        summary.total_votes += u64::from(record.total_votes);
    }

    for (rollup, sum) in rollups.iter_mut().zip(&participation_sums) {
        rollup.mean_participation = sum / f64::from(rollup.grant_count());
    }

    if !rollups.is_empty() {
        let sum: f64 = rollups.iter().map(|r| r.mean_participation).sum();
        summary.mean_participation = sum / rollups.len() as f64;
    }
    if summary.total_votes > 0 {
        summary.vote_weighted_participation = weighted_sum / summary.total_votes as f64;
    }

    GrantAudit { rollups, summary }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(
        id: &str,
        period: &str,
        tier: GrantTier,
        status: GrantStatus,
        pct: f64,
        votes: u32,
    ) -> GrantRecord {
        GrantRecord {
            id: id.to_string(),
            period: period.to_string(),
            tier,
            title: format!("Grant {}", id),
            value: 100_000.0,
            status,
            voter_participation_pct: pct,
            total_votes: votes,
        }
    }

    #[test]
    fn test_empty_input() {
        let audit = aggregate(&[]);
        assert!(audit.rollups.is_empty());
        assert_eq!(audit.summary, SummaryStats::default());
        assert!(audit.current_quarter().is_none());
    }

    #[test]
    fn test_first_seen_order() {
        let records = vec![
            grant("a", "Q4 2025", GrantTier::One, GrantStatus::Applying, 10.0, 1),
            grant("b", "Q2 2025", GrantTier::One, GrantStatus::Applying, 10.0, 1),
            grant("c", "Q4 2025", GrantTier::Two, GrantStatus::Completed, 20.0, 1),
        ];
        let audit = aggregate(&records);
        let periods: Vec<&str> = audit.rollups.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["Q4 2025", "Q2 2025"]);
        assert_eq!(audit.rollups[0].grant_count(), 2);
        assert_eq!(audit.current_quarter().unwrap().period, "Q2 2025");
    }

    #[test]
    fn test_counts_by_status_and_tier() {
        let records = vec![
            grant("a", "Q1", GrantTier::One, GrantStatus::Applying, 10.0, 5),
            grant("b", "Q1", GrantTier::Three, GrantStatus::Receiving, 30.0, 5),
            grant("c", "Q1", GrantTier::Three, GrantStatus::Completed, 50.0, 10),
        ];
        let rollup = &aggregate(&records).rollups[0];
        assert_eq!((rollup.completed, rollup.receiving, rollup.applying), (1, 1, 1));
        assert_eq!(rollup.tier(GrantTier::One).count, 1);
        assert_eq!(rollup.tier(GrantTier::Two).count, 0);
        assert_eq!(rollup.tier(GrantTier::Three).count, 2);
        assert_eq!(rollup.tier(GrantTier::Three).value, 200_000.0);
        assert_eq!(rollup.total_votes, 20);
        assert!((rollup.mean_participation - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_of_means_differs_from_weighted() {
        // One busy quarter and one sparse quarter
        let records = vec![
            grant("a", "Q1", GrantTier::One, GrantStatus::Completed, 80.0, 900),
            grant("b", "Q1", GrantTier::One, GrantStatus::Completed, 60.0, 100),
            grant("c", "Q2", GrantTier::One, GrantStatus::Completed, 20.0, 10),
        ];
        let summary = aggregate(&records).summary;

        // (70 + 20) / 2
        assert!((summary.mean_participation - 45.0).abs() < 1e-12);
        // (80*900 + 60*100 + 20*10) / 1010
        let weighted = (72_000.0 + 6_000.0 + 200.0) / 1010.0;
        assert!((summary.vote_weighted_participation - weighted).abs() < 1e-12);
        assert!(summary.vote_weighted_participation > summary.mean_participation);
    }

    #[test]
    fn test_zero_votes_leave_weighted_at_zero() {
        let records = vec![grant("a", "Q1", GrantTier::One, GrantStatus::Applying, 40.0, 0)];
        let summary = aggregate(&records).summary;
        assert_eq!(summary.vote_weighted_participation, 0.0);
        assert_eq!(summary.mean_participation, 40.0);
    }
}
