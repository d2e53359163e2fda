//! Mock torrent client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::torrent_client::{Torrent, TorrentClient, TorrentClientError, TrackerStat};

/// One gateway call as recorded by the mock, for order and count assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    ListTorrents,
    TrackerStats(String),
    Resume(String),
    TopPriority(String),
    DecreasePriority(String),
}

/// Callback invoked on every tracker query with the running call count.
type TrackerStatsHook = Box<dyn Fn(usize) + Send + Sync>;

/// Mock implementation of the `TorrentClient` trait.
///
/// Scripted torrent list and per-hash tracker stats, a full call log, and
/// per-method failure injection.
///
/// # Example
///
/// ```rust,ignore
/// let client = MockTorrentClient::new();
/// client.set_torrents(vec![torrent]).await;
///
/// client.set_top_priority("abc123").await?;
///
/// let calls = client.calls().await;
/// assert_eq!(calls.last(), Some(&RecordedCall::TopPriority("abc123".into())));
/// ```
#[derive(Default)]
pub struct MockTorrentClient {
    torrents: RwLock<Vec<Torrent>>,
    trackers: RwLock<HashMap<String, Vec<TrackerStat>>>,
    calls: RwLock<Vec<RecordedCall>>,
    fail_list: RwLock<bool>,
    fail_tracker_stats: RwLock<bool>,
    fail_actions: RwLock<bool>,
    tracker_stats_seen: RwLock<usize>,
    tracker_stats_hook: RwLock<Option<TrackerStatsHook>>,
}

impl MockTorrentClient {
    /// Create a new mock with no torrents and no trackers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the torrent list returned by `list_torrents`.
    pub async fn set_torrents(&self, torrents: Vec<Torrent>) {
        *self.torrents.write().await = torrents;
    }

    /// Script the tracker stats returned for one hash.
    pub async fn set_tracker_stats(&self, hash: &str, stats: Vec<TrackerStat>) {
        self.trackers.write().await.insert(hash.to_string(), stats);
    }

    /// Make `list_torrents` fail.
    pub async fn fail_list_torrents(&self, fail: bool) {
        *self.fail_list.write().await = fail;
    }

    /// Make `tracker_stats` fail.
    pub async fn fail_tracker_stats(&self, fail: bool) {
        *self.fail_tracker_stats.write().await = fail;
    }

    /// Make resume and priority mutations fail.
    pub async fn fail_actions(&self, fail: bool) {
        *self.fail_actions.write().await = fail;
    }

    /// Run `hook` on every `tracker_stats` call with the running call
    /// count (1-based). Lets tests observe or interrupt a cycle mid-flight.
    pub async fn on_tracker_stats(&self, hook: impl Fn(usize) + Send + Sync + 'static) {
        *self.tracker_stats_hook.write().await = Some(Box::new(hook));
    }

    /// All calls recorded so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Drop the recorded call log.
    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }

    async fn record(&self, call: RecordedCall) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl TorrentClient for MockTorrentClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_torrents(&self) -> Result<Vec<Torrent>, TorrentClientError> {
        self.record(RecordedCall::ListTorrents).await;
        if *self.fail_list.read().await {
            return Err(TorrentClientError::ApiError("mock list failure".to_string()));
        }
        Ok(self.torrents.read().await.clone())
    }

    async fn tracker_stats(&self, hash: &str) -> Result<Vec<TrackerStat>, TorrentClientError> {
        self.record(RecordedCall::TrackerStats(hash.to_string())).await;

        let seen = {
            let mut seen = self.tracker_stats_seen.write().await;
            *seen += 1;
            *seen
        };
        if let Some(hook) = self.tracker_stats_hook.read().await.as_ref() {
            hook(seen);
        }

        if *self.fail_tracker_stats.read().await {
            return Err(TorrentClientError::ApiError(
                "mock tracker failure".to_string(),
            ));
        }
        Ok(self
            .trackers
            .read()
            .await
            .get(hash)
            .cloned()
            .unwrap_or_default())
    }

    async fn resume(&self, hash: &str) -> Result<(), TorrentClientError> {
        self.record(RecordedCall::Resume(hash.to_string())).await;
        if *self.fail_actions.read().await {
            return Err(TorrentClientError::ApiError("mock action failure".to_string()));
        }
        Ok(())
    }

    async fn set_top_priority(&self, hash: &str) -> Result<(), TorrentClientError> {
        self.record(RecordedCall::TopPriority(hash.to_string())).await;
        if *self.fail_actions.read().await {
            return Err(TorrentClientError::ApiError("mock action failure".to_string()));
        }
        Ok(())
    }

    async fn decrease_priority(&self, hash: &str) -> Result<(), TorrentClientError> {
        self.record(RecordedCall::DecreasePriority(hash.to_string()))
            .await;
        if *self.fail_actions.read().await {
            return Err(TorrentClientError::ApiError("mock action failure".to_string()));
        }
        Ok(())
    }
}
