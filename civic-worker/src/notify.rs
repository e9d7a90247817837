//! Downstream webhook notifier
//!
//! Best-effort push of the classification outcome to the platform webhook.
//! Failures are the caller's to log; nothing here retries or escalates,
//! and the short timeout keeps a stalled webhook from delaying the next
//! dequeue for long.

use crate::store::ReportRecord;
use civic_common::api::ClassifyResponse;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Notification errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Webhook answered status {0}")]
    Status(u16),
}

/// Payload pushed to the downstream webhook
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookPayload<'a> {
    report_id: &'a str,
    classification: &'a ClassifyResponse,
    updated_report: Option<&'a ReportRecord>,
}

/// Webhook notifier with a short per-call timeout
pub struct WebhookNotifier {
    http_client: reqwest::Client,
    webhook_url: String,
}

impl WebhookNotifier {
    pub fn new(webhook_url: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            webhook_url: webhook_url.to_string(),
        })
    }

    /// Push one classification outcome downstream
    pub async fn notify(
        &self,
        report_id: &str,
        classification: &ClassifyResponse,
        updated_report: Option<&ReportRecord>,
    ) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            report_id,
            classification,
            updated_report,
        };

        let response = self
            .http_client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        debug!(report_id = %report_id, status = status.as_u16(), "Webhook delivered");
        Ok(())
    }
}
