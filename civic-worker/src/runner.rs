//! Worker loop and per-job pipeline
//!
//! One job fully completes (or is abandoned) before the next dequeue; no
//! intra-job parallelism. Per job: build a payload from the fields that
//! carry real content, call the classification boundary, persist the
//! result, then best-effort notify downstream. Failures before persistence
//! drop the job — at-least-once delivery means resubmission is the
//! producer's call, and re-enqueueing here would tight-loop on a
//! permanently malformed job.

use crate::boundary::{ClassifyBoundary, ClassifyError};
use crate::job::ClassificationJob;
use crate::notify::WebhookNotifier;
use crate::queue::JobQueue;
use crate::store::ReportStore;
use civic_common::api::ClassifyRequest;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Fixed delay after an unexpected loop error
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Per-job pipeline errors
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Store(#[from] civic_common::Error),
}

/// The classification job worker
pub struct Worker<B: ClassifyBoundary> {
    queue: JobQueue,
    store: ReportStore,
    boundary: B,
    notifier: WebhookNotifier,
    poll_timeout: Duration,
}

impl<B: ClassifyBoundary> Worker<B> {
    pub fn new(
        queue: JobQueue,
        store: ReportStore,
        boundary: B,
        notifier: WebhookNotifier,
        poll_timeout: Duration,
    ) -> Self {
        Self {
            queue,
            store,
            boundary,
            notifier,
            poll_timeout,
        }
    }

    /// Run the poll loop until the surrounding task is cancelled.
    ///
    /// An empty poll retries immediately; an unexpected error backs off for
    /// a fixed delay. Per-job errors are logged and never escape the loop.
    pub async fn run(&self) {
        info!("Starting classification worker loop");

        loop {
            match self.queue.pop_blocking(self.poll_timeout).await {
                Ok(Some(job)) => {
                    let report_id = job.report_id.clone();
                    if let Err(e) = self.process_classification_job(job).await {
                        error!(
                            report_id = %report_id,
                            error = %e,
                            "Classification job failed, dropping job"
                        );
                    }
                }
                Ok(None) => {
                    debug!("No jobs in queue");
                }
                Err(e) => {
                    error!(error = %e, "Worker loop error");
                    tokio::time::sleep(ERROR_BACKOFF).await;
                }
            }
        }
    }

    /// Process one dequeued job to completion.
    ///
    /// A job with no classifiable content is abandoned without touching the
    /// boundary or the store. Webhook failure never turns a processed job
    /// into a failed one.
    pub async fn process_classification_job(
        &self,
        job: ClassificationJob,
    ) -> Result<(), WorkerError> {
        info!(report_id = %job.report_id, "Processing classification job");

        let Some(request) = build_request(&job) else {
            info!(report_id = %job.report_id, "No classifiable content, abandoning job");
            return Ok(());
        };

        let response = self.boundary.classify(&request).await?;

        self.store.apply_classification(&job, &response).await?;

        // The job is done once persisted; notification is best-effort.
        let updated = match self.store.fetch_report(&job.report_id).await {
            Ok(record) => record,
            Err(e) => {
                warn!(report_id = %job.report_id, error = %e, "Read-back for notification failed");
                None
            }
        };

        if let Err(e) = self
            .notifier
            .notify(&job.report_id, &response, updated.as_ref())
            .await
        {
            warn!(report_id = %job.report_id, error = %e, "Webhook notification failed");
        }

        info!(
            report_id = %job.report_id,
            severity = response.severity.as_str(),
            department = response.department.as_str(),
            conflict = response.conflicts.is_some(),
            "Report classified"
        );

        Ok(())
    }
}

/// Build the boundary payload from the fields that carry real content.
///
/// Returns `None` when nothing is classifiable; the caller abandons the
/// job without side effects.
fn build_request(job: &ClassificationJob) -> Option<ClassifyRequest> {
    let text = job
        .description
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from);

    let image_url = job
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(String::from);

    if text.is_none() && image_url.is_none() {
        return None;
    }

    Some(ClassifyRequest {
        text,
        image_url,
        audio_url: None,
    })
}
