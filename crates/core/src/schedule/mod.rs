//! Persistent per-torrent check schedule.
//!
//! Tracks when each torrent was last checked and what came of it, so a cycle
//! only rechecks torrents whose interval has elapsed.

mod store;
mod types;

pub use store::ScheduleStore;
pub use types::*;
