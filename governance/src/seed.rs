//! Built-in grant records, Q2 2025 through Q4 2025

use crate::grant::{GrantRecord, GrantStatus, GrantTier};

struct Seed {
    id: &'static str,
    period: &'static str,
    tier: GrantTier,
    title: &'static str,
    value: f64,
    status: GrantStatus,
    participation: f64,
    votes: u32,
}

const SEED: [Seed; 12] = [
    Seed {
        id: "G-2025-001",
        period: "Q2 2025",
        tier: GrantTier::Three,
        title: "AI Alignment Benchmarking Framework",
        value: 1_000_000.0,
        status: GrantStatus::Completed,
        participation: 45.2,
        votes: 234,
    },
    Seed {
        id: "G-2025-002",
        period: "Q2 2025",
        tier: GrantTier::Two,
        title: "Interpretable AI Decision Systems",
        value: 500_000.0,
        status: GrantStatus::Receiving,
        participation: 41.8,
        votes: 218,
    },
    Seed {
        id: "G-2025-003",
        period: "Q2 2025",
        tier: GrantTier::One,
        title: "Robustness Testing Toolkit",
        value: 150_000.0,
        status: GrantStatus::Completed,
        participation: 39.5,
        votes: 203,
    },
    Seed {
        id: "G-2025-004",
        period: "Q3 2025",
        tier: GrantTier::Three,
        title: "Constitutional AI Research Initiative",
        value: 1_200_000.0,
        status: GrantStatus::Receiving,
        participation: 52.3,
        votes: 298,
    },
    Seed {
        id: "G-2025-005",
        period: "Q3 2025",
        tier: GrantTier::Three,
        title: "AI Safety Standards Development",
        value: 800_000.0,
        status: GrantStatus::Completed,
        participation: 48.9,
        votes: 287,
    },
    Seed {
        id: "G-2025-006",
        period: "Q3 2025",
        tier: GrantTier::Two,
        title: "Adversarial Robustness Validation",
        value: 600_000.0,
        status: GrantStatus::Receiving,
        participation: 46.1,
        votes: 276,
    },
    Seed {
        id: "G-2025-007",
        period: "Q3 2025",
        tier: GrantTier::One,
        title: "AI Ethics Training Modules",
        value: 200_000.0,
        status: GrantStatus::Completed,
        participation: 44.8,
        votes: 245,
    },
    Seed {
        id: "G-2025-008",
        period: "Q4 2025",
        tier: GrantTier::Three,
        title: "Advanced AI Alignment Research",
        value: 1_500_000.0,
        status: GrantStatus::Receiving,
        participation: 56.7,
        votes: 412,
    },
    Seed {
        id: "G-2025-009",
        period: "Q4 2025",
        tier: GrantTier::Three,
        title: "Multi-Agent Safety Protocols",
        value: 1_000_000.0,
        status: GrantStatus::Receiving,
        participation: 54.2,
        votes: 398,
    },
    Seed {
        id: "G-2025-010",
        period: "Q4 2025",
        tier: GrantTier::Two,
        title: "Scalable Oversight Mechanisms",
        value: 650_000.0,
        status: GrantStatus::Receiving,
        participation: 52.9,
        votes: 385,
    },
    Seed {
        id: "G-2025-011",
        period: "Q4 2025",
        tier: GrantTier::Two,
        title: "AI Risk Assessment Framework",
        value: 550_000.0,
        status: GrantStatus::Completed,
        participation: 51.1,
        votes: 367,
    },
    Seed {
        id: "G-2025-012",
        period: "Q4 2025",
        tier: GrantTier::One,
        title: "Safety Evaluation Tools",
        value: 280_000.0,
        status: GrantStatus::Receiving,
        participation: 49.8,
        votes: 351,
    },
];

pub fn seed_grants() -> Vec<GrantRecord> {
    SEED.iter()
        .map(|s| GrantRecord {
            id: s.id.to_string(),
            period: s.period.to_string(),
            tier: s.tier,
            title: s.title.to_string(),
            value: s.value,
            status: s.status,
            voter_participation_pct: s.participation,
            total_votes: s.votes,
        })
        .collect()
}
