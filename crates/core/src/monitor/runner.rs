//! Check cycle implementation.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::estimator::estimate_seeders;
use crate::rarity::{classify, Tier};
use crate::schedule::ScheduleStore;
use crate::torrent_client::{Torrent, TorrentClient};

use super::config::MonitorConfig;
use super::types::{fmt_size, truncate_name, CycleSummary};

/// Torrent names longer than this are shortened in log lines.
const NAME_LOG_CHARS: usize = 60;

/// Save the schedule store every this many checked torrents, to bound data
/// loss if a long cycle is interrupted.
const CHECKPOINT_INTERVAL: usize = 50;

/// Drives check cycles against a torrent client.
///
/// The shutdown flag is injected and polled before each per-torrent check;
/// a raised flag stops further checking but keeps results recorded so far.
pub struct SwarmMonitor {
    config: MonitorConfig,
    client: Arc<dyn TorrentClient>,
    shutdown: Arc<AtomicBool>,
}

impl SwarmMonitor {
    pub fn new(
        config: MonitorConfig,
        client: Arc<dyn TorrentClient>,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            client,
            shutdown,
        }
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Run one full check cycle.
    ///
    /// Individual client-call failures are absorbed here: a failed list is
    /// an empty cycle, a failed action is an action not taken. Nothing in a
    /// cycle aborts the process.
    pub async fn run_cycle(&self, store: &mut ScheduleStore) -> CycleSummary {
        let mut summary = CycleSummary::default();

        info!(
            "Starting check cycle ({} days per torrent)",
            self.config.check_interval_days
        );

        let torrents = match self.client.list_torrents().await {
            Ok(torrents) => torrents,
            Err(e) => {
                warn!("Failed to get torrent list: {}", e);
                Vec::new()
            }
        };

        if torrents.is_empty() {
            // Could be a transient empty response; leave the schedule alone.
            warn!("No torrents found or failed to retrieve list");
            return summary;
        }
        summary.total = torrents.len();
        info!("Found {} total torrents", summary.total);

        let current: HashSet<String> = torrents.iter().map(|t| t.hash.clone()).collect();
        summary.purged = store.purge_missing(&current);
        if summary.purged > 0 {
            info!("Purged {} entries for removed torrents", summary.purged);
        }

        let (due, skipped): (Vec<&Torrent>, Vec<&Torrent>) = torrents
            .iter()
            .partition(|t| store.needs_check(&t.hash, self.config.check_interval_days));
        summary.skipped = skipped.len();

        info!("Torrents needing check: {}", due.len());
        info!("Torrents skipped (checked recently): {}", summary.skipped);

        if due.is_empty() {
            info!("No torrents need checking this cycle");
            info!("Current distribution from last checks: {}", store.stats());
            self.persist(store);
            return summary;
        }

        let mut critical: Vec<&Torrent> = Vec::new();
        let mut rare: Vec<&Torrent> = Vec::new();
        let mut low: Vec<&Torrent> = Vec::new();

        for &torrent in &due {
            if self.shutdown_requested() {
                info!("Shutdown requested, stopping checks");
                summary.interrupted = true;
                break;
            }

            let seeders = estimate_seeders(self.client.as_ref(), torrent).await;
            let tier = classify(seeders, &self.config.thresholds);
            store.record_check(&torrent.hash, &torrent.name, seeders, tier);
            summary.checked += 1;

            match tier {
                Tier::Critical => {
                    info!(
                        "  CRITICAL [{} seeds]: {} ({})",
                        seeders,
                        truncate_name(&torrent.name, NAME_LOG_CHARS),
                        fmt_size(torrent.size_bytes)
                    );
                    critical.push(torrent);
                }
                Tier::Rare => {
                    info!(
                        "  RARE [{} seeds]: {} ({})",
                        seeders,
                        truncate_name(&torrent.name, NAME_LOG_CHARS),
                        fmt_size(torrent.size_bytes)
                    );
                    rare.push(torrent);
                }
                Tier::Low => {
                    debug!(
                        "  LOW [{} seeds]: {}",
                        seeders,
                        truncate_name(&torrent.name, NAME_LOG_CHARS)
                    );
                    low.push(torrent);
                }
                // HEALTHY is recorded but never bucketed; no action taken.
                Tier::Healthy | Tier::Unknown => {}
            }

            if summary.checked % CHECKPOINT_INTERVAL == 0 {
                match store.save() {
                    Ok(()) => debug!("Checkpoint: checked {}/{}", summary.checked, due.len()),
                    Err(e) => warn!("Checkpoint save failed: {}", e),
                }
            }
        }

        summary.critical = critical.len();
        summary.rare = rare.len();
        summary.low = low.len();

        info!(
            "Overall distribution (all tracked torrents): {}",
            store.stats()
        );
        info!(
            "This cycle - critical: {}, rare: {}, low: {}",
            summary.critical, summary.rare, summary.low
        );

        if self.config.actions.set_priorities
            && (!critical.is_empty() || !rare.is_empty() || !low.is_empty())
        {
            summary.actions_taken += self.apply_priorities(&critical, &rare, &low).await;
        }

        if self.config.actions.resume_rare && !rare.is_empty() {
            summary.actions_taken += self.resume_paused(&rare, Tier::Rare).await;
        }
        if self.config.actions.resume_critical && !critical.is_empty() {
            summary.actions_taken += self.resume_paused(&critical, Tier::Critical).await;
        }

        self.persist(store);

        info!(
            "Checked {} torrents, skipped {}, actions taken: {}",
            summary.checked, summary.skipped, summary.actions_taken
        );

        summary
    }

    /// Apply queue-priority changes, lowest tier first.
    ///
    /// Each composite operation is relative to the current queue position:
    /// LOW goes to top and down twice, then RARE to top and down once, then
    /// CRITICAL to top. Only this order yields the final ranking
    /// CRITICAL > RARE > LOW regardless of where the torrents started.
    async fn apply_priorities(
        &self,
        critical: &[&Torrent],
        rare: &[&Torrent],
        low: &[&Torrent],
    ) -> usize {
        info!("Adjusting queue priorities");
        let mut applied = 0;

        for t in low {
            match self.client.set_low_priority(&t.hash).await {
                Ok(()) => {
                    debug!("  Set LOW priority: {}", t.name);
                    applied += 1;
                }
                Err(e) => warn!("Failed to set LOW priority for {}: {}", t.name, e),
            }
        }
        for t in rare {
            match self.client.set_rare_priority(&t.hash).await {
                Ok(()) => {
                    debug!("  Set RARE priority: {}", t.name);
                    applied += 1;
                }
                Err(e) => warn!("Failed to set RARE priority for {}: {}", t.name, e),
            }
        }
        for t in critical {
            match self.client.set_top_priority(&t.hash).await {
                Ok(()) => {
                    debug!("  Set CRITICAL priority: {}", t.name);
                    applied += 1;
                }
                Err(e) => warn!("Failed to set CRITICAL priority for {}: {}", t.name, e),
            }
        }

        applied
    }

    /// Resume bucketed torrents that were paused/stopped at listing time.
    async fn resume_paused(&self, torrents: &[&Torrent], tier: Tier) -> usize {
        info!("Checking {} torrents for resume...", tier);
        let mut resumed = 0;

        for t in torrents {
            if !t.state.is_paused() {
                continue;
            }
            info!("  Resuming: {}", t.name);
            match self.client.resume(&t.hash).await {
                Ok(()) => resumed += 1,
                Err(e) => warn!("Failed to resume {}: {}", t.name, e),
            }
        }

        resumed
    }

    /// Final save plus run stamp. In-memory state stays authoritative when
    /// the write fails.
    fn persist(&self, store: &mut ScheduleStore) {
        store.mark_full_run();
        if let Err(e) = store.save() {
            error!("Failed to save schedule state: {}", e);
        }
    }
}
