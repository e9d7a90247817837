//! Configuration resolution for civic-ml
//!
//! Settings resolve ENV -> TOML -> compiled default via civic-common.

use civic_common::config;

/// Classification service configuration
#[derive(Debug, Clone)]
pub struct MlServiceConfig {
    /// Listen address for the HTTP boundary
    pub bind_addr: String,
    /// Base URL of the external inference service
    pub inference_url: String,
    /// Per-call inference timeout in seconds
    pub inference_timeout_secs: u64,
}

impl MlServiceConfig {
    pub fn load() -> Self {
        Self {
            bind_addr: config::resolve_setting("CIVIC_ML_BIND", "ml_bind", "127.0.0.1:8000"),
            inference_url: config::resolve_setting(
                "CIVIC_INFERENCE_URL",
                "inference_url",
                "http://127.0.0.1:8600",
            ),
            inference_timeout_secs: config::resolve_setting_u64(
                "CIVIC_INFERENCE_TIMEOUT_SECS",
                "inference_timeout_secs",
                30,
            ),
        }
    }
}
