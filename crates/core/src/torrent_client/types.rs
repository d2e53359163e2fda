//! Types for torrent client operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during torrent client operations.
#[derive(Debug, Error)]
pub enum TorrentClientError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,
}

/// State of a torrent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TorrentState {
    /// Downloading from peers.
    Downloading,
    /// Seeding to peers (includes a stalled seed with no leechers).
    Seeding,
    /// Paused or stopped, either direction.
    Paused,
    /// Checking file integrity.
    Checking,
    /// Queued for download or upload.
    Queued,
    /// Stalled download (no peers).
    Stalled,
    /// Error state.
    Error,
    /// Unknown state.
    Unknown,
}

impl TorrentState {
    /// Whether this client is itself a complete copy actively offered to
    /// the swarm, and so counts as one seeder.
    pub fn is_seeding(&self) -> bool {
        matches!(self, TorrentState::Seeding)
    }

    /// Whether the torrent is eligible for a resume command.
    pub fn is_paused(&self) -> bool {
        matches!(self, TorrentState::Paused)
    }
}

/// A torrent as reported by the client, read-only within a cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Torrent {
    /// Info hash (lowercase hex).
    pub hash: String,
    /// Torrent name.
    pub name: String,
    /// Total size in bytes.
    pub size_bytes: u64,
    /// Current state.
    pub state: TorrentState,
    /// Total seeders reported by trackers (qB `num_complete`).
    pub tracker_seeders: u32,
    /// Seeders this client is currently connected to (qB `num_seeds`).
    pub connected_seeders: u32,
}

/// Per-tracker stats for a torrent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerStat {
    /// Tracker announce URL.
    pub url: String,
    /// Seeders this tracker reports.
    pub seeders: u32,
}

/// Trait for torrent client backends.
///
/// The composite priority operations are provided methods built on the
/// `set_top_priority` / `decrease_priority` primitives. They are
/// best-effort: if the first step lands and a later one fails, the remote
/// queue is left partially changed with no compensating action.
#[async_trait]
pub trait TorrentClient: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// List all torrents the client manages.
    async fn list_torrents(&self) -> Result<Vec<Torrent>, TorrentClientError>;

    /// Per-tracker stats for one torrent.
    async fn tracker_stats(&self, hash: &str) -> Result<Vec<TrackerStat>, TorrentClientError>;

    /// Resume a paused/stopped torrent.
    async fn resume(&self, hash: &str) -> Result<(), TorrentClientError>;

    /// Move a torrent to the front of the priority queue.
    async fn set_top_priority(&self, hash: &str) -> Result<(), TorrentClientError>;

    /// Move a torrent one step down the priority queue.
    async fn decrease_priority(&self, hash: &str) -> Result<(), TorrentClientError>;

    /// Rank a torrent just below the top slots: top, then one step down.
    async fn set_rare_priority(&self, hash: &str) -> Result<(), TorrentClientError> {
        self.set_top_priority(hash).await?;
        self.decrease_priority(hash).await
    }

    /// Rank a torrent two steps below the top slots: top, then down twice.
    async fn set_low_priority(&self, hash: &str) -> Result<(), TorrentClientError> {
        self.set_top_priority(hash).await?;
        self.decrease_priority(hash).await?;
        self.decrease_priority(hash).await
    }
}
