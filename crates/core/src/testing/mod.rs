//! Test doubles for swarmguard components.

mod mock_torrent_client;

pub use mock_torrent_client::{MockTorrentClient, RecordedCall};
