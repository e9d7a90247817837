//! Durable FIFO job queue
//!
//! SQLite-backed queue consumed with transactional pops: the oldest row is
//! selected and deleted in one transaction, giving at-least-once delivery
//! to a single consumer. `pop_blocking` waits up to a bounded timeout for
//! work and returns `None` on expiry — "no work", not an error.

use crate::job::ClassificationJob;
use civic_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use std::time::Duration;
use tracing::{debug, warn};

/// Sleep between empty polls inside a blocking pop
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Durable classification job queue
pub struct JobQueue {
    pool: SqlitePool,
}

impl JobQueue {
    /// Open the queue on a database pool, creating its table if missing
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS ml_jobs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                payload TEXT NOT NULL,
                enqueued_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Producer side: append a serialized job
    pub async fn push(&self, job: &ClassificationJob) -> Result<()> {
        let payload = serde_json::to_string(job)
            .map_err(|e| Error::Internal(format!("failed to serialize job: {e}")))?;

        sqlx::query("INSERT INTO ml_jobs (payload) VALUES (?)")
            .bind(payload)
            .execute(&self.pool)
            .await?;

        debug!(report_id = %job.report_id, "Classification job queued");
        Ok(())
    }

    /// Remove and return the oldest job, or `None` when the queue is empty.
    ///
    /// A malformed payload is dropped with a warning; at-least-once
    /// delivery means the producer resubmits if it still cares.
    pub async fn pop(&self) -> Result<Option<ClassificationJob>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT id, payload FROM ml_jobs ORDER BY id LIMIT 1")
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };

        let id: i64 = row.get("id");
        let payload: String = row.get("payload");

        sqlx::query("DELETE FROM ml_jobs WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        match serde_json::from_str::<ClassificationJob>(&payload) {
            Ok(job) => Ok(Some(job)),
            Err(e) => {
                warn!(queue_id = id, error = %e, "Dropping malformed job payload");
                Ok(None)
            }
        }
    }

    /// Blocking pop with a bounded wait; expiry is "no work", not an error
    pub async fn pop_blocking(&self, timeout: Duration) -> Result<Option<ClassificationJob>> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if let Some(job) = self.pop().await? {
                return Ok(Some(job));
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                return Ok(None);
            }

            tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    /// Number of queued jobs
    pub async fn len(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM ml_jobs")
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.get("n");
        Ok(n.max(0) as u64)
    }

    /// True when no jobs are queued
    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
