//! Vitalboard
//!
//! Runs the dashboard against the configured echo endpoint: seeds a
//! synthetic roster, opens the telemetry channel for the first page and
//! logs vitals updates, highlight expiries and summary roll-ups.

use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vitalboard::config;
use vitalboard::dashboard::DashboardTable;
use vitalboard::roster::{build_roster, SequentialIds};
use vitalboard::telemetry::TelemetryChannel;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::load_config().context("failed to load configuration")?;

    let mut rng = rand::thread_rng();
    let rows = build_roster(&SequentialIds(config.roster.size), &mut rng);
    let mut table = DashboardTable::with_page_size(rows, config.table.page_size);

    let summary = table.summary();
    info!(
        total = summary.total,
        males = summary.males,
        females = summary.females,
        avg_heart_rate = ?summary.avg_heart_rate,
        high_bp = summary.high_bp,
        low_o2 = summary.low_o2,
        "roster seeded"
    );

    let subscribed = table.page_names();
    let (tx, mut readings) = mpsc::channel(32);
    let subscription = TelemetryChannel::open(
        &config.telemetry.url,
        subscribed.clone(),
        Duration::from_millis(config.telemetry.interval_ms),
        tx,
    )
    .await
    .context("failed to open telemetry channel")?;

    info!(session = %subscription.session(), "dashboard running; ctrl-c to stop");

    loop {
        let wakeup = table.next_highlight_deadline();
        tokio::select! {
            reading = readings.recv() => {
                let Some(reading) = reading else {
                    info!("telemetry feed ended; vitals are now stale");
                    break;
                };
                let now = tokio::time::Instant::now().into_std();
                let changed = table.apply_reading(&reading, &subscribed, now);
                if !changed.is_empty() {
                    let fields: Vec<_> = changed.iter().map(|f| f.as_str()).collect();
                    info!(patient = %reading.name, ?fields, "vitals updated");
                }
            }
            _ = highlight_wakeup(wakeup) => {
                table.purge_expired_highlights(tokio::time::Instant::now().into_std());
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }

    subscription.close();
    Ok(())
}

/// Sleep until the next highlight deadline, or forever when none is pending.
async fn highlight_wakeup(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending::<()>().await,
    }
}
