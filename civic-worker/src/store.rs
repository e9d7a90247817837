//! Report store boundary
//!
//! The report record is owned by the wider platform; this worker mutates a
//! fixed field set atomically, keyed by report id, and reads the record
//! back only to build the notification payload. The update is a full-field
//! overwrite, so re-running a job with the same classification result
//! converges to the same final state.

use crate::job::ClassificationJob;
use chrono::Utc;
use civic_common::api::{ClassifyResponse, Confidence, NO_TITLE, PLACEHOLDER_TITLE};
use civic_common::Result;
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

/// Prefix marking a title that is still an in-progress placeholder
const PLACEHOLDER_PREFIX: &str = "Processing";

/// Words taken from the description for the synthesized fallback title
const FALLBACK_TITLE_WORDS: usize = 4;

/// Sanitized report projection sent downstream with the webhook
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub report_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub department: Option<String>,
    pub severity: Option<String>,
    pub ml_classified: bool,
    pub ml_severity: Option<String>,
    pub ml_department: Option<String>,
    pub ml_confidence: Option<Confidence>,
    pub ml_title: Option<String>,
    pub ml_conflicts: Option<String>,
}

/// Report store keyed by report id
pub struct ReportStore {
    pool: SqlitePool,
}

impl ReportStore {
    /// Open the store on a database pool, creating its table if missing
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reports (
                report_id TEXT PRIMARY KEY,
                title TEXT,
                description TEXT,
                image_url TEXT,
                department TEXT,
                severity TEXT,
                ml_classified INTEGER NOT NULL DEFAULT 0,
                ml_severity TEXT,
                ml_department TEXT,
                ml_severity_confidence REAL,
                ml_department_confidence REAL,
                ml_title TEXT,
                ml_conflicts TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Producer side: create the report row before its job is enqueued
    pub async fn create_report(
        &self,
        report_id: &str,
        title: Option<&str>,
        description: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO reports (report_id, title, description, image_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(report_id)
        .bind(title)
        .bind(description)
        .bind(image_url)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Write the classification outcome into the report, atomically.
    ///
    /// Department and severity always take the new prediction; the title
    /// follows the placeholder-replacement policy and is left untouched
    /// when no acceptable new title exists.
    pub async fn apply_classification(
        &self,
        job: &ClassificationJob,
        response: &ClassifyResponse,
    ) -> Result<()> {
        let final_title = resolve_final_title(
            &response.title,
            job.title.as_deref(),
            job.description.as_deref(),
        );

        debug!(
            report_id = %job.report_id,
            ml_title = %response.title,
            title_updated = final_title.is_some(),
            "Persisting classification"
        );

        let result = sqlx::query(
            r#"
            UPDATE reports SET
                ml_classified = 1,
                ml_severity = ?,
                ml_department = ?,
                ml_severity_confidence = ?,
                ml_department_confidence = ?,
                ml_title = ?,
                ml_conflicts = ?,
                department = ?,
                severity = ?,
                title = COALESCE(?, title),
                updated_at = ?
            WHERE report_id = ?
            "#,
        )
        .bind(response.severity.as_str())
        .bind(response.department.as_str())
        .bind(response.confidence.severity)
        .bind(response.confidence.department)
        .bind(&response.title)
        .bind(response.conflicts.as_deref())
        .bind(response.department.as_str())
        .bind(response.severity.as_str())
        .bind(final_title.as_deref())
        .bind(Utc::now().to_rfc3339())
        .bind(&job.report_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            warn!(report_id = %job.report_id, "No report row matched the classification update");
        }

        Ok(())
    }

    /// Read back the sanitized projection for the notification payload
    pub async fn fetch_report(&self, report_id: &str) -> Result<Option<ReportRecord>> {
        let row = sqlx::query(
            r#"
            SELECT report_id, title, description, department, severity,
                   ml_classified, ml_severity, ml_department,
                   ml_severity_confidence, ml_department_confidence,
                   ml_title, ml_conflicts
            FROM reports WHERE report_id = ?
            "#,
        )
        .bind(report_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let severity_confidence: Option<f64> = row.get("ml_severity_confidence");
        let department_confidence: Option<f64> = row.get("ml_department_confidence");
        let ml_confidence = match (severity_confidence, department_confidence) {
            (Some(severity), Some(department)) => Some(Confidence {
                severity,
                department,
            }),
            _ => None,
        };

        Ok(Some(ReportRecord {
            report_id: row.get("report_id"),
            title: row.get("title"),
            description: row.get("description"),
            department: row.get("department"),
            severity: row.get("severity"),
            ml_classified: row.get::<i64, _>("ml_classified") != 0,
            ml_severity: row.get("ml_severity"),
            ml_department: row.get("ml_department"),
            ml_confidence,
            ml_title: row.get("ml_title"),
            ml_conflicts: row.get("ml_conflicts"),
        }))
    }
}

/// Decide the report's final title, or `None` to leave it as-is.
///
/// A generated title wins whenever it is real (non-empty, not the "No
/// title" sentinel, not a placeholder). Failing that, a report still stuck
/// on an empty or placeholder title gets a simple title synthesized from
/// the first words of its description.
fn resolve_final_title(
    ml_title: &str,
    job_title: Option<&str>,
    description: Option<&str>,
) -> Option<String> {
    let ml_title = ml_title.trim();
    if !ml_title.is_empty() && ml_title != NO_TITLE && !ml_title.starts_with(PLACEHOLDER_PREFIX) {
        return Some(ml_title.to_string());
    }

    let current = job_title.unwrap_or("").trim();
    if current.is_empty() || current == PLACEHOLDER_TITLE {
        if let Some(description) = description {
            let words: Vec<&str> = description.split_whitespace().take(FALLBACK_TITLE_WORDS).collect();
            if !words.is_empty() {
                return Some(format!("{}...", words.join(" ")));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_common::labels::{DepartmentCode, SeverityCode};

    fn response(title: &str) -> ClassifyResponse {
        ClassifyResponse {
            severity: SeverityCode::High,
            department: DepartmentCode::Roads,
            title: title.to_string(),
            confidence: Confidence {
                severity: 0.91,
                department: 0.84,
            },
            conflicts: None,
        }
    }

    #[test]
    fn test_ml_title_wins_when_real() {
        let title = resolve_final_title("Pothole Issue", Some("Processing..."), Some("pothole"));
        assert_eq!(title.as_deref(), Some("Pothole Issue"));
    }

    #[test]
    fn test_no_title_sentinel_rejected() {
        let title = resolve_final_title("No title", Some("Processing..."), Some("deep pothole near gate"));
        assert_eq!(title.as_deref(), Some("deep pothole near gate..."));
    }

    #[test]
    fn test_placeholder_ml_title_rejected() {
        let title = resolve_final_title("Processing report", Some(""), Some("water leak on 5th"));
        assert_eq!(title.as_deref(), Some("water leak on 5th..."));
    }

    #[test]
    fn test_real_existing_title_is_kept() {
        // bad ML title plus a real caller title: leave the report alone
        let title = resolve_final_title("No title", Some("Broken swing"), Some("broken swing"));
        assert_eq!(title, None);
    }

    #[test]
    fn test_fallback_takes_first_four_words() {
        let title = resolve_final_title(
            "",
            None,
            Some("water logging near the old market entrance"),
        );
        assert_eq!(title.as_deref(), Some("water logging near the..."));
    }

    #[test]
    fn test_no_description_leaves_title_alone() {
        assert_eq!(resolve_final_title("", Some("Processing..."), None), None);
        assert_eq!(resolve_final_title("", Some("Processing..."), Some("   ")), None);
    }

    async fn test_store() -> ReportStore {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        ReportStore::new(pool).await.unwrap()
    }

    fn job(report_id: &str, title: &str, description: &str) -> ClassificationJob {
        ClassificationJob::new(
            report_id,
            Some(description.to_string()),
            None,
            Some(title.to_string()),
        )
    }

    #[tokio::test]
    async fn test_apply_classification_overwrites_fields() {
        let store = test_store().await;
        store
            .create_report("r1", Some("Processing..."), Some("big pothole"), None)
            .await
            .unwrap();

        store
            .apply_classification(&job("r1", "Processing...", "big pothole"), &response("Pothole Issue"))
            .await
            .unwrap();

        let record = store.fetch_report("r1").await.unwrap().unwrap();
        assert!(record.ml_classified);
        assert_eq!(record.severity.as_deref(), Some("HIGH"));
        assert_eq!(record.department.as_deref(), Some("Roads"));
        assert_eq!(record.title.as_deref(), Some("Pothole Issue"));
        assert_eq!(record.ml_title.as_deref(), Some("Pothole Issue"));
        let confidence = record.ml_confidence.unwrap();
        assert_eq!(confidence.severity, 0.91);
        assert_eq!(confidence.department, 0.84);
    }

    #[tokio::test]
    async fn test_apply_classification_is_idempotent() {
        let store = test_store().await;
        store
            .create_report("r2", Some("Processing..."), Some("streetlight out"), None)
            .await
            .unwrap();

        let job = job("r2", "Processing...", "streetlight out");
        let response = response("Streetlight Issue");

        store.apply_classification(&job, &response).await.unwrap();
        let first = store.fetch_report("r2").await.unwrap().unwrap();

        store.apply_classification(&job, &response).await.unwrap();
        let second = store.fetch_report("r2").await.unwrap().unwrap();

        assert_eq!(serde_json::to_value(&first).unwrap(), serde_json::to_value(&second).unwrap());
    }

    #[tokio::test]
    async fn test_rejected_ml_title_keeps_existing_real_title() {
        let store = test_store().await;
        store
            .create_report("r3", Some("Fallen tree"), Some("tree on the road"), None)
            .await
            .unwrap();

        store
            .apply_classification(&job("r3", "Fallen tree", "tree on the road"), &response("No title"))
            .await
            .unwrap();

        let record = store.fetch_report("r3").await.unwrap().unwrap();
        assert_eq!(record.title.as_deref(), Some("Fallen tree"));
        assert_eq!(record.ml_title.as_deref(), Some("No title"));
    }

    #[tokio::test]
    async fn test_fetch_unknown_report_is_none() {
        let store = test_store().await;
        assert!(store.fetch_report("missing").await.unwrap().is_none());
    }
}
