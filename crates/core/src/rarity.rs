//! Rarity classification.
//!
//! Maps an estimated seeder count to a tier. Pure policy, no I/O.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ThresholdConfig;

/// Rarity tier of a torrent's swarm, ordered CRITICAL > RARE > LOW > HEALTHY
/// for priority purposes. UNKNOWN only appears for persisted entries written
/// before a classification existed; `classify` never returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Critical,
    Rare,
    Low,
    Healthy,
    #[default]
    Unknown,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Critical => "CRITICAL",
            Tier::Rare => "RARE",
            Tier::Low => "LOW",
            Tier::Healthy => "HEALTHY",
            Tier::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a seeder count against the configured thresholds.
pub fn classify(seeders: u32, thresholds: &ThresholdConfig) -> Tier {
    if seeders <= thresholds.critical_seeders {
        Tier::Critical
    } else if seeders <= thresholds.rare_seeders {
        Tier::Rare
    } else if seeders <= thresholds.low_seeders {
        Tier::Low
    } else {
        Tier::Healthy
    }
}

/// Tier distribution across a set of tracked torrents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub critical: usize,
    pub rare: usize,
    pub low: usize,
    pub healthy: usize,
    pub unknown: usize,
}

impl TierCounts {
    /// Bump the counter for one tier.
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Critical => self.critical += 1,
            Tier::Rare => self.rare += 1,
            Tier::Low => self.low += 1,
            Tier::Healthy => self.healthy += 1,
            Tier::Unknown => self.unknown += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.rare + self.low + self.healthy + self.unknown
    }
}

impl fmt::Display for TierCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CRITICAL: {}, RARE: {}, LOW: {}, HEALTHY: {}, UNKNOWN: {}",
            self.critical, self.rare, self.low, self.healthy, self.unknown
        )
    }
}
