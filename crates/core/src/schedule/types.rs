//! Types for the persisted schedule document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::rarity::Tier;

/// Errors that can occur persisting the schedule document.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Last check outcome for one torrent, keyed by info hash in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Last known name, kept for diagnostics.
    pub name: String,
    /// When the torrent was last checked.
    pub last_checked: DateTime<Utc>,
    /// Seeder count observed at that check.
    pub last_seeder_count: u32,
    /// Tier assigned at that check.
    #[serde(default)]
    pub last_classification: Tier,
}

/// The full persisted document.
///
/// Unknown extra fields are ignored and every field has a default, so the
/// file stays forward-readable across versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(default)]
    pub torrents: HashMap<String, ScheduleEntry>,
    #[serde(default)]
    pub last_full_run: Option<DateTime<Utc>>,
}
