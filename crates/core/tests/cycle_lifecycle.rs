//! Check cycle integration tests.
//!
//! These drive full cycles through `SwarmMonitor` against the mock client:
//! classification, priority ordering, resumes, persistence, cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tempfile::TempDir;

use swarmguard_core::{
    testing::{MockTorrentClient, RecordedCall},
    ActionConfig, MonitorConfig, ScheduleStore, SwarmMonitor, Tier, Torrent, TorrentState,
};

fn torrent(hash: &str, name: &str, tracker_seeders: u32, state: TorrentState) -> Torrent {
    Torrent {
        hash: hash.to_string(),
        name: name.to_string(),
        size_bytes: 700 * 1024 * 1024,
        state,
        tracker_seeders,
        connected_seeders: 0,
    }
}

struct TestHarness {
    client: Arc<MockTorrentClient>,
    shutdown: Arc<AtomicBool>,
    store: ScheduleStore,
    _temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = ScheduleStore::load(temp_dir.path().join("state.json"));
        Self {
            client: Arc::new(MockTorrentClient::new()),
            shutdown: Arc::new(AtomicBool::new(false)),
            store,
            _temp_dir: temp_dir,
        }
    }

    fn monitor(&self, actions: ActionConfig) -> SwarmMonitor {
        let config = MonitorConfig {
            actions,
            ..Default::default()
        };
        SwarmMonitor::new(
            config,
            Arc::clone(&self.client) as Arc<dyn swarmguard_core::TorrentClient>,
            Arc::clone(&self.shutdown),
        )
    }

    fn all_actions() -> ActionConfig {
        ActionConfig {
            resume_critical: true,
            resume_rare: true,
            set_priorities: true,
        }
    }
}

fn priority_ops(calls: &[RecordedCall]) -> Vec<RecordedCall> {
    calls
        .iter()
        .filter(|c| {
            matches!(
                c,
                RecordedCall::TopPriority(_) | RecordedCall::DecreasePriority(_)
            )
        })
        .cloned()
        .collect()
}

#[tokio::test]
async fn test_end_to_end_three_tiers() {
    let mut harness = TestHarness::new();
    harness
        .client
        .set_torrents(vec![
            // One paused critical torrent, one seeding rare, one healthy
            torrent("aaa", "critical one", 1, TorrentState::Paused),
            torrent("bbb", "rare one", 2, TorrentState::Seeding),
            torrent("ccc", "healthy one", 10, TorrentState::Downloading),
        ])
        .await;

    let monitor = harness.monitor(TestHarness::all_actions());
    let summary = monitor.run_cycle(&mut harness.store).await;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.checked, 3);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.critical, 1);
    assert_eq!(summary.rare, 1);
    assert_eq!(summary.low, 0);
    assert!(!summary.interrupted);
    // bbb: top + decrease, aaa: top, aaa: resume
    assert_eq!(summary.actions_taken, 3);

    // Exact gateway call sequence: list, then priorities (RARE before
    // CRITICAL since no LOW bucket), then the one resume.
    let calls = harness.client.calls().await;
    assert_eq!(
        calls,
        vec![
            RecordedCall::ListTorrents,
            RecordedCall::TopPriority("bbb".to_string()),
            RecordedCall::DecreasePriority("bbb".to_string()),
            RecordedCall::TopPriority("aaa".to_string()),
            RecordedCall::Resume("aaa".to_string()),
        ]
    );

    // Schedule store reflects the classifications
    assert_eq!(harness.store.len(), 3);
    assert_eq!(
        harness.store.entry("aaa").unwrap().last_classification,
        Tier::Critical
    );
    assert_eq!(
        harness.store.entry("bbb").unwrap().last_classification,
        Tier::Rare
    );
    assert_eq!(
        harness.store.entry("ccc").unwrap().last_classification,
        Tier::Healthy
    );

    let stats = harness.store.stats();
    assert_eq!(stats.critical, 1);
    assert_eq!(stats.rare, 1);
    assert_eq!(stats.low, 0);
    assert_eq!(stats.healthy, 1);
    assert_eq!(stats.unknown, 0);

    // And it was persisted
    let reloaded = ScheduleStore::load(harness.store.path());
    assert_eq!(reloaded.len(), 3);
    assert!(reloaded.last_full_run().is_some());
}

#[tokio::test]
async fn test_priority_order_is_low_rare_critical_regardless_of_listing() {
    let expected = |l: &str, r: &str, c: &str| {
        vec![
            RecordedCall::TopPriority(l.to_string()),
            RecordedCall::DecreasePriority(l.to_string()),
            RecordedCall::DecreasePriority(l.to_string()),
            RecordedCall::TopPriority(r.to_string()),
            RecordedCall::DecreasePriority(r.to_string()),
            RecordedCall::TopPriority(c.to_string()),
        ]
    };

    // Critical listed first
    let mut harness = TestHarness::new();
    harness
        .client
        .set_torrents(vec![
            torrent("crit", "c", 1, TorrentState::Seeding),
            torrent("rare", "r", 2, TorrentState::Seeding),
            torrent("low", "l", 4, TorrentState::Seeding),
        ])
        .await;
    let monitor = harness.monitor(TestHarness::all_actions());
    monitor.run_cycle(&mut harness.store).await;
    assert_eq!(
        priority_ops(&harness.client.calls().await),
        expected("low", "rare", "crit")
    );

    // Low listed first: same priority-op sequence
    let mut harness = TestHarness::new();
    harness
        .client
        .set_torrents(vec![
            torrent("low", "l", 4, TorrentState::Seeding),
            torrent("crit", "c", 1, TorrentState::Seeding),
            torrent("rare", "r", 2, TorrentState::Seeding),
        ])
        .await;
    let monitor = harness.monitor(TestHarness::all_actions());
    monitor.run_cycle(&mut harness.store).await;
    assert_eq!(
        priority_ops(&harness.client.calls().await),
        expected("low", "rare", "crit")
    );
}

#[tokio::test]
async fn test_cancellation_mid_cycle_keeps_recorded_results() {
    let mut harness = TestHarness::new();

    // All aggregates zero so each check hits the tracker fallback, which is
    // where the trip hook lives. Downloading state: no self-contribution.
    let torrents: Vec<Torrent> = (1..=5)
        .map(|i| {
            torrent(
                &format!("hash{}", i),
                &format!("torrent {}", i),
                0,
                TorrentState::Downloading,
            )
        })
        .collect();
    harness.client.set_torrents(torrents).await;
    harness
        .client
        .on_tracker_stats({
            let flag = Arc::clone(&harness.shutdown);
            move |count| {
                if count >= 2 {
                    flag.store(true, Ordering::SeqCst);
                }
            }
        })
        .await;

    let monitor = harness.monitor(ActionConfig {
        set_priorities: false,
        resume_critical: false,
        resume_rare: false,
    });
    let summary = monitor.run_cycle(&mut harness.store).await;

    assert!(summary.interrupted);
    assert_eq!(summary.checked, 2);
    assert_eq!(harness.store.len(), 2);
    assert!(harness.store.entry("hash1").is_some());
    assert!(harness.store.entry("hash2").is_some());
    assert!(harness.store.entry("hash3").is_none());

    // The two recorded entries made it to disk
    let reloaded = ScheduleStore::load(harness.store.path());
    assert_eq!(reloaded.len(), 2);
}

#[tokio::test]
async fn test_checkpoint_save_bounds_loss_on_long_cycles() {
    use std::sync::Mutex;

    let mut harness = TestHarness::new();

    // 60 due torrents, all with zero aggregates so every check goes down
    // the tracker fallback and the mock sees one tracker query per check.
    let torrents: Vec<Torrent> = (1..=60)
        .map(|i| {
            torrent(
                &format!("hash{:03}", i),
                &format!("torrent {}", i),
                0,
                TorrentState::Downloading,
            )
        })
        .collect();
    harness.client.set_torrents(torrents).await;

    // The store is checkpointed every 50 checks. Snapshot what is durable
    // while the 51st check is still in flight, before the final persist.
    let state_path = harness.store.path().to_path_buf();
    let snapshot = Arc::new(Mutex::new(None));
    harness
        .client
        .on_tracker_stats({
            let snapshot = Arc::clone(&snapshot);
            move |count| {
                if count == 51 {
                    *snapshot.lock().unwrap() = Some(ScheduleStore::load(&state_path).len());
                }
            }
        })
        .await;

    let monitor = harness.monitor(ActionConfig {
        set_priorities: false,
        resume_critical: false,
        resume_rare: false,
    });
    let summary = monitor.run_cycle(&mut harness.store).await;

    assert_eq!(summary.checked, 60);
    assert!(!summary.interrupted);
    // The first 50 entries had already hit the disk mid-cycle
    assert_eq!(snapshot.lock().unwrap().take(), Some(50));
    // The final persist has everything
    assert_eq!(ScheduleStore::load(harness.store.path()).len(), 60);
}

#[tokio::test]
async fn test_empty_list_terminates_early_without_purge_or_persist() {
    let mut harness = TestHarness::new();
    harness.store.record_check("stale", "old", 1, Tier::Critical);

    let monitor = harness.monitor(TestHarness::all_actions());
    let summary = monitor.run_cycle(&mut harness.store).await;

    assert_eq!(summary.total, 0);
    assert_eq!(summary.checked, 0);
    // A transient empty response must not wipe prior state
    assert_eq!(harness.store.len(), 1);
    assert!(!harness.store.path().exists());
}

#[tokio::test]
async fn test_list_failure_is_an_empty_cycle() {
    let mut harness = TestHarness::new();
    harness.client.fail_list_torrents(true).await;

    let monitor = harness.monitor(TestHarness::all_actions());
    let summary = monitor.run_cycle(&mut harness.store).await;

    assert_eq!(summary.total, 0);
    assert_eq!(summary.checked, 0);
    assert_eq!(summary.actions_taken, 0);
}

#[tokio::test]
async fn test_purge_removes_vanished_torrents() {
    let mut harness = TestHarness::new();
    harness.store.record_check("gone", "removed", 1, Tier::Critical);
    harness.store.record_check("aaa", "kept", 9, Tier::Healthy);

    harness
        .client
        .set_torrents(vec![torrent("aaa", "kept", 10, TorrentState::Seeding)])
        .await;

    let monitor = harness.monitor(TestHarness::all_actions());
    let summary = monitor.run_cycle(&mut harness.store).await;

    assert_eq!(summary.purged, 1);
    assert!(harness.store.entry("gone").is_none());
    assert!(harness.store.entry("aaa").is_some());
}

#[tokio::test]
async fn test_recently_checked_torrents_are_skipped() {
    let mut harness = TestHarness::new();
    harness
        .client
        .set_torrents(vec![
            torrent("aaa", "fresh", 1, TorrentState::Paused),
            torrent("bbb", "due", 1, TorrentState::Paused),
        ])
        .await;
    // aaa was just checked; with a 30-day interval it is not due
    harness.store.record_check("aaa", "fresh", 1, Tier::Critical);

    let monitor = harness.monitor(TestHarness::all_actions());
    let summary = monitor.run_cycle(&mut harness.store).await;

    assert_eq!(summary.checked, 1);
    assert_eq!(summary.skipped, 1);
    // Only the due torrent got actions
    let calls = harness.client.calls().await;
    assert!(calls.contains(&RecordedCall::Resume("bbb".to_string())));
    assert!(!calls.contains(&RecordedCall::Resume("aaa".to_string())));
}

#[tokio::test]
async fn test_action_failures_do_not_abort_the_cycle() {
    let mut harness = TestHarness::new();
    harness
        .client
        .set_torrents(vec![torrent("aaa", "critical", 0, TorrentState::Paused)])
        .await;
    harness.client.fail_actions(true).await;

    let monitor = harness.monitor(TestHarness::all_actions());
    let summary = monitor.run_cycle(&mut harness.store).await;

    assert_eq!(summary.checked, 1);
    assert_eq!(summary.critical, 1);
    assert_eq!(summary.actions_taken, 0);
    // The check itself still landed in the store
    assert_eq!(
        harness.store.entry("aaa").unwrap().last_classification,
        Tier::Critical
    );
}

#[tokio::test]
async fn test_disabled_toggles_take_no_actions() {
    let mut harness = TestHarness::new();
    harness
        .client
        .set_torrents(vec![torrent("aaa", "critical", 1, TorrentState::Paused)])
        .await;

    let monitor = harness.monitor(ActionConfig {
        set_priorities: false,
        resume_critical: false,
        resume_rare: false,
    });
    let summary = monitor.run_cycle(&mut harness.store).await;

    assert_eq!(summary.checked, 1);
    assert_eq!(summary.actions_taken, 0);
    assert_eq!(harness.client.calls().await, vec![RecordedCall::ListTorrents]);
}
