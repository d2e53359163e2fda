use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
///
/// Every section has defaults so the monitor runs with no config file at all.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub qbittorrent: QBittorrentConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub actions: ActionConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// qBittorrent Web API connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QBittorrentConfig {
    /// Base URL of the qBittorrent Web UI (e.g. "http://localhost:6767").
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    /// Timeout for control calls (login, resume, priority) in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Timeout for the full torrent-list retrieval in seconds.
    #[serde(default = "default_list_timeout")]
    pub list_timeout_secs: u32,
}

impl Default for QBittorrentConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: default_username(),
            password: default_password(),
            timeout_secs: default_timeout(),
            list_timeout_secs: default_list_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:6767".to_string()
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "adminadmin".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_list_timeout() -> u32 {
    60
}

/// Timing and persistence settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    /// Days between rechecks of the same torrent.
    #[serde(default = "default_check_interval_days")]
    pub check_interval_days: f64,
    /// Hours between full check cycles.
    #[serde(default = "default_run_interval_hours")]
    pub run_interval_hours: f64,
    /// Grace delay at startup, to let qBittorrent come up first.
    #[serde(default = "default_startup_delay")]
    pub startup_delay_secs: u64,
    /// Where the schedule document is persisted.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            check_interval_days: default_check_interval_days(),
            run_interval_hours: default_run_interval_hours(),
            startup_delay_secs: default_startup_delay(),
            state_file: default_state_file(),
        }
    }
}

fn default_check_interval_days() -> f64 {
    30.0
}

fn default_run_interval_hours() -> f64 {
    24.0
}

fn default_startup_delay() -> u64 {
    60
}

fn default_state_file() -> PathBuf {
    PathBuf::from("/config/state.json")
}

/// Seeder-count thresholds for rarity classification.
///
/// Must satisfy critical <= rare <= low; enforced by `validate_config`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_critical_seeders")]
    pub critical_seeders: u32,
    #[serde(default = "default_rare_seeders")]
    pub rare_seeders: u32,
    #[serde(default = "default_low_seeders")]
    pub low_seeders: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            critical_seeders: default_critical_seeders(),
            rare_seeders: default_rare_seeders(),
            low_seeders: default_low_seeders(),
        }
    }
}

fn default_critical_seeders() -> u32 {
    1
}

fn default_rare_seeders() -> u32 {
    2
}

fn default_low_seeders() -> u32 {
    5
}

/// Which corrective actions the monitor is allowed to take.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionConfig {
    /// Resume paused/stopped torrents classified CRITICAL.
    #[serde(default = "default_true")]
    pub resume_critical: bool,
    /// Resume paused/stopped torrents classified RARE.
    #[serde(default)]
    pub resume_rare: bool,
    /// Reorder the client's priority queue by tier.
    #[serde(default = "default_true")]
    pub set_priorities: bool,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            resume_critical: true,
            resume_rare: false,
            set_priorities: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LogConfig {
    /// Raise the default log level from info to debug.
    #[serde(default)]
    pub debug: bool,
}
