pub mod config;
pub mod estimator;
pub mod monitor;
pub mod rarity;
pub mod schedule;
pub mod testing;
pub mod torrent_client;

pub use config::{
    load_config, load_config_from_str, validate_config, ActionConfig, Config, ConfigError,
    QBittorrentConfig, ScheduleConfig, ThresholdConfig,
};
pub use estimator::estimate_seeders;
pub use monitor::{CycleSummary, MonitorConfig, SwarmMonitor};
pub use rarity::{classify, Tier, TierCounts};
pub use schedule::{ScheduleDocument, ScheduleEntry, ScheduleError, ScheduleStore};
pub use torrent_client::{
    QBittorrentClient, Torrent, TorrentClient, TorrentClientError, TorrentState, TrackerStat,
};
