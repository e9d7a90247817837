//! civic-worker - Classification Job Worker
//!
//! Pulls queued classification jobs, calls the civic-ml boundary, persists
//! the fused result into the report record, and best-effort notifies the
//! downstream webhook. Strictly one job at a time; a shutdown signal stops
//! new dequeues.

use anyhow::Result;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use civic_worker::boundary::HttpClassifyClient;
use civic_worker::config::WorkerConfig;
use civic_worker::notify::WebhookNotifier;
use civic_worker::queue::JobQueue;
use civic_worker::runner::Worker;
use civic_worker::store::ReportStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting civic-worker (Classification Job Worker)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = WorkerConfig::load();
    info!("Database: {}", config.database_path.display());
    info!("Classification service: {}", config.classify_url);
    info!("Webhook: {}", config.webhook_url);

    let pool = civic_worker::db::init_database_pool(&config.database_path).await?;
    let queue = JobQueue::new(pool.clone()).await?;
    let store = ReportStore::new(pool).await?;

    let boundary = HttpClassifyClient::new(
        &config.classify_url,
        Duration::from_secs(config.classify_timeout_secs),
    )?;
    let notifier = WebhookNotifier::new(
        &config.webhook_url,
        Duration::from_secs(config.webhook_timeout_secs),
    )?;

    let worker = Worker::new(
        queue,
        store,
        boundary,
        notifier,
        Duration::from_secs(config.poll_timeout_secs),
    );

    tokio::select! {
        _ = worker.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, stopping dequeues");
        }
    }

    Ok(())
}
