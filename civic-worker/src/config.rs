//! Configuration resolution for civic-worker
//!
//! Settings resolve ENV -> TOML -> compiled default via civic-common.

use civic_common::config;
use std::path::PathBuf;

/// Worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// SQLite database holding the job queue and report store
    pub database_path: PathBuf,
    /// Base URL of the civic-ml classification service
    pub classify_url: String,
    /// Classification call timeout in seconds
    pub classify_timeout_secs: u64,
    /// Downstream webhook endpoint
    pub webhook_url: String,
    /// Webhook call timeout in seconds
    pub webhook_timeout_secs: u64,
    /// Bounded wait of one blocking queue pop, in seconds
    pub poll_timeout_secs: u64,
}

impl WorkerConfig {
    pub fn load() -> Self {
        let default_db = config::default_data_dir().join("civic.db");

        Self {
            database_path: PathBuf::from(config::resolve_setting(
                "CIVIC_DB_PATH",
                "db_path",
                &default_db.to_string_lossy(),
            )),
            classify_url: config::resolve_setting(
                "CIVIC_CLASSIFY_URL",
                "classify_url",
                "http://127.0.0.1:8000",
            ),
            classify_timeout_secs: config::resolve_setting_u64(
                "CIVIC_CLASSIFY_TIMEOUT_SECS",
                "classify_timeout_secs",
                30,
            ),
            webhook_url: config::resolve_setting(
                "CIVIC_WEBHOOK_URL",
                "webhook_url",
                "http://127.0.0.1:3000/api/v1/reports/ml-webhook",
            ),
            webhook_timeout_secs: config::resolve_setting_u64(
                "CIVIC_WEBHOOK_TIMEOUT_SECS",
                "webhook_timeout_secs",
                5,
            ),
            poll_timeout_secs: config::resolve_setting_u64(
                "CIVIC_POLL_TIMEOUT_SECS",
                "poll_timeout_secs",
                5,
            ),
        }
    }
}
