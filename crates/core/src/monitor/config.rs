//! Monitor configuration slice.

use crate::config::{ActionConfig, Config, ThresholdConfig};

/// The part of the configuration the check cycle consumes.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Days between rechecks of the same torrent.
    pub check_interval_days: f64,
    pub thresholds: ThresholdConfig,
    pub actions: ActionConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval_days: 30.0,
            thresholds: ThresholdConfig::default(),
            actions: ActionConfig::default(),
        }
    }
}

impl From<&Config> for MonitorConfig {
    fn from(config: &Config) -> Self {
        Self {
            check_interval_days: config.schedule.check_interval_days,
            thresholds: config.thresholds.clone(),
            actions: config.actions.clone(),
        }
    }
}
