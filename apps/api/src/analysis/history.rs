//! Append-only persistence of analysis results.
//!
//! CRITICAL: rows are only ever INSERTed. Nothing here updates or deletes.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;

use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::models::result::ResultRow;

/// A result as handed to the store. One per completed analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub timestamp: DateTime<Utc>,
    pub resume_text: String,
    pub job_type: String,
    /// `None` when the score was unavailable.
    pub ats_score: Option<i64>,
    pub suggestions: Vec<String>,
}

impl ResultRecord {
    pub fn from_analysis(request: &AnalysisRequest, result: &AnalysisResult) -> Self {
        Self {
            timestamp: Utc::now(),
            resume_text: request.resume_text().to_string(),
            job_type: request.job_type().to_string(),
            ats_score: result.ats_score().value().map(i64::from),
            suggestions: result.suggestions().to_vec(),
        }
    }
}

/// Appends `record` and returns the generated row id.
pub async fn record_result(pool: &SqlitePool, record: &ResultRecord) -> Result<i64> {
    let suggestions =
        serde_json::to_string(&record.suggestions).context("Failed to encode suggestions")?;

    let row_id = sqlx::query(
        r#"
        INSERT INTO results (timestamp, resume_text, job_type, ats_score, suggestions)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true))
    .bind(&record.resume_text)
    .bind(&record.job_type)
    .bind(record.ats_score)
    .bind(suggestions)
    .execute(pool)
    .await
    .context("Failed to insert analysis result")?
    .last_insert_rowid();

    Ok(row_id)
}

pub async fn fetch_result(pool: &SqlitePool, id: i64) -> Result<Option<ResultRow>, sqlx::Error> {
    sqlx::query_as::<_, ResultRow>("SELECT * FROM results WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}
