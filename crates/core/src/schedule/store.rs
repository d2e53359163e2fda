//! Schedule store persistence and staleness queries.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::rarity::{Tier, TierCounts};

use super::{ScheduleDocument, ScheduleEntry, ScheduleError};

/// Durable mapping from torrent hash to last-check outcome.
///
/// The in-memory document is authoritative; `save` failures are reported but
/// never invalidate it. Mutated only inside a check cycle.
pub struct ScheduleStore {
    path: PathBuf,
    doc: ScheduleDocument,
}

impl ScheduleStore {
    /// Load the store from disk.
    ///
    /// A missing or unreadable file yields an empty store with a warning;
    /// prior history is an optimization, never a startup requirement.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<ScheduleDocument>(&contents) {
                Ok(doc) => {
                    info!("Loaded schedule state for {} torrents", doc.torrents.len());
                    doc
                }
                Err(e) => {
                    warn!("Failed to parse schedule state file: {}", e);
                    ScheduleDocument::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No schedule state file at {:?}", path);
                ScheduleDocument::default()
            }
            Err(e) => {
                warn!("Failed to read schedule state file: {}", e);
                ScheduleDocument::default()
            }
        };

        Self { path, doc }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.doc.torrents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.torrents.is_empty()
    }

    pub fn entry(&self, hash: &str) -> Option<&ScheduleEntry> {
        self.doc.torrents.get(hash)
    }

    pub fn last_full_run(&self) -> Option<DateTime<Utc>> {
        self.doc.last_full_run
    }

    /// Whether the torrent is due for a check: never seen, or its recheck
    /// interval has elapsed (boundary inclusive).
    pub fn needs_check(&self, hash: &str, interval_days: f64) -> bool {
        self.needs_check_at(hash, interval_days, Utc::now())
    }

    /// `needs_check` against an explicit clock.
    pub fn needs_check_at(&self, hash: &str, interval_days: f64, now: DateTime<Utc>) -> bool {
        let Some(entry) = self.doc.torrents.get(hash) else {
            return true;
        };
        let interval = Duration::milliseconds((interval_days * 86_400_000.0) as i64);
        now >= entry.last_checked + interval
    }

    /// Upsert the entry for a torrent just checked.
    pub fn record_check(&mut self, hash: &str, name: &str, seeder_count: u32, tier: Tier) {
        self.doc.torrents.insert(
            hash.to_string(),
            ScheduleEntry {
                name: name.to_string(),
                last_checked: Utc::now(),
                last_seeder_count: seeder_count,
                last_classification: tier,
            },
        );
    }

    /// Drop entries for torrents the client no longer reports.
    /// Returns the number removed.
    pub fn purge_missing(&mut self, current: &HashSet<String>) -> usize {
        let before = self.doc.torrents.len();
        self.doc.torrents.retain(|hash, _| current.contains(hash));
        before - self.doc.torrents.len()
    }

    /// Stamp the end of a full cycle.
    pub fn mark_full_run(&mut self) {
        self.doc.last_full_run = Some(Utc::now());
    }

    /// Tier distribution across all tracked torrents, including ones
    /// skipped this cycle.
    pub fn stats(&self) -> TierCounts {
        let mut counts = TierCounts::default();
        for entry in self.doc.torrents.values() {
            counts.record(entry.last_classification);
        }
        counts
    }

    /// Serialize the document to its configured path, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<(), ScheduleError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.doc)?;
        fs::write(&self.path, json)?;
        debug!("Saved schedule state for {} torrents", self.doc.torrents.len());
        Ok(())
    }
}
