//! Types for the check cycle.

use serde::{Deserialize, Serialize};

/// Outcome of one check cycle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CycleSummary {
    /// Torrents the client reported.
    pub total: usize,
    /// Torrents actually checked this cycle.
    pub checked: usize,
    /// Torrents skipped because they were checked recently.
    pub skipped: usize,
    /// Schedule entries purged for vanished torrents.
    pub purged: usize,
    /// Torrents classified CRITICAL this cycle.
    pub critical: usize,
    /// Torrents classified RARE this cycle.
    pub rare: usize,
    /// Torrents classified LOW this cycle.
    pub low: usize,
    /// Priority changes and resumes that succeeded.
    pub actions_taken: usize,
    /// Whether a shutdown request cut the cycle short.
    pub interrupted: bool,
}

/// Shorten a torrent name for log lines.
pub(crate) fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        name.to_string()
    } else {
        let head: String = name.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

/// Format a byte count for log lines.
pub fn fmt_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} PB", size)
}
