//! qBittorrent torrent client implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::QBittorrentConfig;

use super::{Torrent, TorrentClient, TorrentClientError, TorrentState, TrackerStat};

/// qBittorrent Web API client.
pub struct QBittorrentClient {
    client: Client,
    config: QBittorrentConfig,
    /// Session marker (the cookie itself lives in the reqwest cookie jar);
    /// cleared on auth-sensitive failures so the next call re-authenticates.
    session: Arc<RwLock<Option<String>>>,
}

impl QBittorrentClient {
    /// Create a new qBittorrent client.
    pub fn new(config: QBittorrentConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the base URL without trailing slash.
    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    /// Login and store session cookie.
    async fn login(&self) -> Result<(), TorrentClientError> {
        let url = format!("{}/api/v2/auth/login", self.base_url());

        let params = [
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TorrentClientError::Timeout
                } else if e.is_connect() {
                    TorrentClientError::ConnectionFailed(e.to_string())
                } else {
                    TorrentClientError::ApiError(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        // The API acknowledges success with the literal body "Ok."
        if body.contains("Ok.") {
            debug!("qBittorrent login successful");
            let mut session = self.session.write().await;
            *session = Some("authenticated".to_string());
            Ok(())
        } else if body.contains("Fails.") || status.as_u16() == 403 {
            Err(TorrentClientError::AuthenticationFailed(
                "Invalid credentials".to_string(),
            ))
        } else {
            Err(TorrentClientError::AuthenticationFailed(format!(
                "Unexpected response: {}",
                body.chars().take(100).collect::<String>()
            )))
        }
    }

    /// Ensure we have a valid session, logging in if needed.
    async fn ensure_authenticated(&self) -> Result<(), TorrentClientError> {
        let session = self.session.read().await;
        if session.is_some() {
            return Ok(());
        }
        drop(session);
        self.login().await
    }

    /// Drop the session marker so the next call re-authenticates.
    async fn invalidate_session(&self) {
        let mut session = self.session.write().await;
        *session = None;
    }

    /// Make an authenticated GET request, re-authenticating once on 403.
    async fn get(
        &self,
        endpoint: &str,
        timeout: Option<Duration>,
    ) -> Result<String, TorrentClientError> {
        self.ensure_authenticated().await?;

        let url = format!("{}{}", self.base_url(), endpoint);
        let mut request = self.client.get(&url);
        if let Some(t) = timeout {
            request = request.timeout(t);
        }
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TorrentClientError::Timeout
            } else {
                TorrentClientError::ApiError(e.to_string())
            }
        })?;

        let status = response.status();
        if status.as_u16() == 403 {
            // Session expired, retry once after login
            warn!("qBittorrent session expired, re-authenticating");
            self.invalidate_session().await;
            self.login().await?;

            let mut request = self.client.get(&url);
            if let Some(t) = timeout {
                request = request.timeout(t);
            }
            let response = request
                .send()
                .await
                .map_err(|e| TorrentClientError::ApiError(e.to_string()))?;

            if !response.status().is_success() {
                return Err(TorrentClientError::ApiError(format!(
                    "HTTP {}",
                    response.status()
                )));
            }

            return response
                .text()
                .await
                .map_err(|e| TorrentClientError::ApiError(e.to_string()));
        }

        if !status.is_success() {
            return Err(TorrentClientError::ApiError(format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| TorrentClientError::ApiError(e.to_string()))
    }

    /// Make an authenticated POST request with form data, re-authenticating
    /// once on 403.
    async fn post_form(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<String, TorrentClientError> {
        self.ensure_authenticated().await?;

        let url = format!("{}{}", self.base_url(), endpoint);
        let response = self
            .client
            .post(&url)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TorrentClientError::Timeout
                } else {
                    TorrentClientError::ApiError(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 403 {
            warn!("qBittorrent session expired, re-authenticating");
            self.invalidate_session().await;
            self.login().await?;

            let response = self
                .client
                .post(&url)
                .form(params)
                .send()
                .await
                .map_err(|e| TorrentClientError::ApiError(e.to_string()))?;

            if !response.status().is_success() {
                return Err(TorrentClientError::ApiError(format!(
                    "HTTP {}",
                    response.status()
                )));
            }

            return response
                .text()
                .await
                .map_err(|e| TorrentClientError::ApiError(e.to_string()));
        }

        if !status.is_success() {
            return Err(TorrentClientError::ApiError(format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| TorrentClientError::ApiError(e.to_string()))
    }
}

/// qBittorrent torrent info response.
#[derive(Debug, Deserialize)]
struct QBTorrentInfo {
    hash: String,
    name: String,
    state: String,
    size: i64,
    #[serde(default)]
    num_complete: i64,
    #[serde(default)]
    num_seeds: i64,
}

impl QBTorrentInfo {
    fn into_torrent(self) -> Torrent {
        Torrent {
            hash: self.hash.to_lowercase(),
            name: self.name,
            size_bytes: self.size.max(0) as u64,
            state: parse_qb_state(&self.state),
            tracker_seeders: self.num_complete.max(0) as u32,
            connected_seeders: self.num_seeds.max(0) as u32,
        }
    }
}

/// qBittorrent tracker entry response.
#[derive(Debug, Deserialize)]
struct QBTrackerInfo {
    url: String,
    /// -1 when the tracker has not been contacted yet.
    #[serde(default)]
    num_seeds: i64,
}

impl QBTrackerInfo {
    fn into_tracker_stat(self) -> TrackerStat {
        TrackerStat {
            url: self.url,
            seeders: self.num_seeds.max(0) as u32,
        }
    }
}

/// Parse qBittorrent state string to TorrentState.
fn parse_qb_state(state: &str) -> TorrentState {
    match state {
        "downloading" | "forcedDL" | "metaDL" | "allocating" => TorrentState::Downloading,
        "uploading" | "forcedUP" | "stalledUP" => TorrentState::Seeding,
        "pausedDL" | "pausedUP" | "stoppedDL" | "stoppedUP" => TorrentState::Paused,
        "checkingDL" | "checkingUP" | "checkingResumeData" | "moving" => TorrentState::Checking,
        "queuedDL" | "queuedUP" => TorrentState::Queued,
        "stalledDL" => TorrentState::Stalled,
        "error" | "missingFiles" => TorrentState::Error,
        _ => TorrentState::Unknown,
    }
}

#[async_trait]
impl TorrentClient for QBittorrentClient {
    fn name(&self) -> &str {
        "qbittorrent"
    }

    async fn list_torrents(&self) -> Result<Vec<Torrent>, TorrentClientError> {
        // The full list can be large; it gets the longer timeout.
        let list_timeout = Duration::from_secs(self.config.list_timeout_secs as u64);
        let response = self.get("/api/v2/torrents/info", Some(list_timeout)).await?;

        let torrents: Vec<QBTorrentInfo> = serde_json::from_str(&response)
            .map_err(|e| TorrentClientError::ApiError(format!("Failed to parse response: {}", e)))?;

        Ok(torrents.into_iter().map(|t| t.into_torrent()).collect())
    }

    async fn tracker_stats(&self, hash: &str) -> Result<Vec<TrackerStat>, TorrentClientError> {
        let endpoint = format!("/api/v2/torrents/trackers?hash={}", hash.to_lowercase());
        let response = self.get(&endpoint, None).await?;

        let trackers: Vec<QBTrackerInfo> = serde_json::from_str(&response)
            .map_err(|e| TorrentClientError::ApiError(format!("Failed to parse response: {}", e)))?;

        Ok(trackers
            .into_iter()
            .map(|t| t.into_tracker_stat())
            .collect())
    }

    async fn resume(&self, hash: &str) -> Result<(), TorrentClientError> {
        let hash_lower = hash.to_lowercase();
        self.post_form("/api/v2/torrents/resume", &[("hashes", &hash_lower)])
            .await?;
        Ok(())
    }

    async fn set_top_priority(&self, hash: &str) -> Result<(), TorrentClientError> {
        let hash_lower = hash.to_lowercase();
        self.post_form("/api/v2/torrents/topPrio", &[("hashes", &hash_lower)])
            .await?;
        Ok(())
    }

    async fn decrease_priority(&self, hash: &str) -> Result<(), TorrentClientError> {
        let hash_lower = hash.to_lowercase();
        self.post_form("/api/v2/torrents/decreasePrio", &[("hashes", &hash_lower)])
            .await?;
        Ok(())
    }
}
