use super::{types::Config, ConfigError};

/// Validate configuration.
///
/// The classifier assumes critical <= rare <= low; a violation would
/// silently produce overlapping or empty tiers, so it fails startup here.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let t = &config.thresholds;
    if t.critical_seeders > t.rare_seeders {
        return Err(ConfigError::ValidationError(format!(
            "thresholds.critical_seeders ({}) must be <= thresholds.rare_seeders ({})",
            t.critical_seeders, t.rare_seeders
        )));
    }
    if t.rare_seeders > t.low_seeders {
        return Err(ConfigError::ValidationError(format!(
            "thresholds.rare_seeders ({}) must be <= thresholds.low_seeders ({})",
            t.rare_seeders, t.low_seeders
        )));
    }

    if config.qbittorrent.timeout_secs == 0 || config.qbittorrent.list_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "qbittorrent timeouts cannot be 0".to_string(),
        ));
    }

    if config.schedule.run_interval_hours <= 0.0 {
        return Err(ConfigError::ValidationError(
            "schedule.run_interval_hours must be positive".to_string(),
        ));
    }
    if config.schedule.check_interval_days < 0.0 {
        return Err(ConfigError::ValidationError(
            "schedule.check_interval_days cannot be negative".to_string(),
        ));
    }

    Ok(())
}
