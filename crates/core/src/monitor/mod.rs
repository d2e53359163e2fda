//! Check-cycle orchestration.
//!
//! One cycle lists torrents, purges schedule entries for vanished ones,
//! checks the torrents whose recheck interval has elapsed, then applies
//! priority and resume actions by tier and persists the schedule.

mod config;
mod runner;
mod types;

pub use config::MonitorConfig;
pub use runner::SwarmMonitor;
pub use types::{fmt_size, CycleSummary};
