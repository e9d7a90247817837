//! civic-ml library interface
//!
//! Exposes public APIs for integration testing

pub mod api;
pub mod backend;
pub mod classify;
pub mod config;
pub mod corrections;
pub mod error;
pub mod fusion;
pub mod lexicon;
pub mod title;
pub mod types;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use classify::ClassificationService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Classification orchestrator, stateless and concurrently callable
    pub classifier: Arc<ClassificationService>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(classifier: ClassificationService) -> Self {
        Self {
            classifier: Arc::new(classifier),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::classify_routes())
        .merge(api::health_routes())
        .with_state(state)
}
