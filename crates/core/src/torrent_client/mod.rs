//! Torrent client abstraction.
//!
//! Provides a `TorrentClient` trait covering the handful of read and
//! mutation operations the monitor needs, plus the qBittorrent Web API
//! implementation.

mod qbittorrent;
mod types;

pub use qbittorrent::QBittorrentClient;
pub use types::*;
