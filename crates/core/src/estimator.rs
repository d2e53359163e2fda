//! Seeder count estimation.
//!
//! The client-reported aggregate fields are cheap and usually accurate, so
//! they win when non-zero. The per-tracker query is an expensive fallback,
//! only taken when every aggregate signal is zero, to avoid misclassifying a
//! healthy swarm off stale aggregates.

use tracing::debug;

use crate::torrent_client::{Torrent, TorrentClient};

/// Estimate the best-available seeder count for a torrent.
///
/// Fallback order:
/// 1. tracker-reported total (`num_complete`), if non-zero
/// 2. connected seeders plus our own contribution, if non-zero
/// 3. max per-tracker seeder count, or our own contribution alone
pub async fn estimate_seeders(client: &dyn TorrentClient, torrent: &Torrent) -> u32 {
    // If we are seeding ourselves, the aggregate counts may not include us.
    let our_contribution = if torrent.state.is_seeding() { 1 } else { 0 };

    if torrent.tracker_seeders > 0 {
        return torrent.tracker_seeders;
    }

    if torrent.connected_seeders > 0 {
        return torrent.connected_seeders + our_contribution;
    }

    let trackers = match client.tracker_stats(&torrent.hash).await {
        Ok(trackers) => trackers,
        Err(e) => {
            debug!("Failed to get trackers for {}: {}", torrent.hash, e);
            Vec::new()
        }
    };

    let max_seeds = trackers.iter().map(|t| t.seeders).max().unwrap_or(0);
    if max_seeds > 0 {
        max_seeds
    } else {
        our_contribution
    }
}
