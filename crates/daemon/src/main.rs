use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swarmguard_core::{
    load_config, validate_config, Config, MonitorConfig, QBittorrentClient, ScheduleStore,
    SwarmMonitor, TorrentClient,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Longest uninterrupted sleep while idling between cycles, so shutdown
/// signals are noticed promptly.
const SHUTDOWN_POLL_TICK: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Startup can fail before the tracing subscriber is installed
        // (config parse/validation), so this goes straight to stderr.
        eprintln!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Configuration first; the log level default depends on it
    let config_path = std::env::var("SWARMGUARD_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    init_logging(&config);

    info!("Swarm health monitor v{} starting up", VERSION);
    info!("Configuration loaded from {:?}", config_path);
    info!("qBittorrent URL: {}", config.qbittorrent.url);
    info!(
        "Check interval: {} days per torrent",
        config.schedule.check_interval_days
    );
    info!("Run interval: {} hours", config.schedule.run_interval_hours);
    info!(
        "Seeder thresholds - critical: <={}, rare: <={}, low: <={}",
        config.thresholds.critical_seeders,
        config.thresholds.rare_seeders,
        config.thresholds.low_seeders
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    install_signal_handlers(Arc::clone(&shutdown))?;

    // Grace delay so qBittorrent has a chance to come up first
    if config.schedule.startup_delay_secs > 0 {
        info!(
            "Waiting {}s for qBittorrent to be ready",
            config.schedule.startup_delay_secs
        );
        sleep_interruptible(
            Duration::from_secs(config.schedule.startup_delay_secs),
            &shutdown,
        )
        .await;
    }

    let mut store = ScheduleStore::load(&config.schedule.state_file);
    let client: Arc<dyn TorrentClient> =
        Arc::new(QBittorrentClient::new(config.qbittorrent.clone()));
    let monitor = SwarmMonitor::new(
        MonitorConfig::from(&config),
        client,
        Arc::clone(&shutdown),
    );

    let run_interval = Duration::from_secs_f64(config.schedule.run_interval_hours * 3600.0);

    while !shutdown.load(Ordering::SeqCst) {
        let summary = monitor.run_cycle(&mut store).await;
        if summary.interrupted || shutdown.load(Ordering::SeqCst) {
            break;
        }

        info!(
            "Next cycle in {} hours, sleeping",
            config.schedule.run_interval_hours
        );
        sleep_interruptible(run_interval, &shutdown).await;
    }

    info!("Swarm health monitor shut down cleanly");
    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.log.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Route SIGTERM and SIGINT into the shared shutdown flag.
///
/// Failing to install a handler is the one genuinely fatal startup error
/// besides bad configuration: without it the process could never stop
/// between network calls cleanly.
fn install_signal_handlers(shutdown: Arc<AtomicBool>) -> Result<()> {
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to install SIGINT handler")?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully"),
            _ = sigint.recv() => info!("Received SIGINT, shutting down gracefully"),
        }
        shutdown.store(true, Ordering::SeqCst);
    });

    Ok(())
}

/// Sleep for `total`, waking at least every `SHUTDOWN_POLL_TICK` to check
/// the shutdown flag.
async fn sleep_interruptible(total: Duration, shutdown: &AtomicBool) {
    let deadline = tokio::time::Instant::now() + total;
    loop {
        if shutdown.load(Ordering::SeqCst) {
            return;
        }
        let now = tokio::time::Instant::now();
        if now >= deadline {
            return;
        }
        let remaining = deadline - now;
        tokio::time::sleep(remaining.min(SHUTDOWN_POLL_TICK)).await;
    }
}
