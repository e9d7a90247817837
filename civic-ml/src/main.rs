//! civic-ml - Issue Classification Microservice
//!
//! Receives civic-issue classification requests (text, image reference,
//! audio reference, or uploaded audio), runs the modality classifiers and
//! fusion engine, and answers with one fused result. Model backends are
//! reached over HTTP; when they are unreachable at startup the service runs
//! in heuristic fallback mode.

use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use civic_ml::backend::ModelBackends;
use civic_ml::classify::ClassificationService;
use civic_ml::config::MlServiceConfig;
use civic_ml::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting civic-ml (Issue Classification) microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = MlServiceConfig::load();
    info!("Inference service: {}", config.inference_url);

    let backends = ModelBackends::connect(
        &config.inference_url,
        Duration::from_secs(config.inference_timeout_secs),
    )
    .await;

    if backends.is_degraded() {
        warn!("Model backends unavailable, classification runs in heuristic fallback mode");
    }

    let classifier = ClassificationService::new(backends)?;
    let state = AppState::new(classifier);
    let app = civic_ml::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
