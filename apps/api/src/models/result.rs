use serde::Serialize;
use sqlx::FromRow;

/// One row of the append-only `results` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResultRow {
    pub id: i64,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub resume_text: String,
    pub job_type: String,
    pub ats_score: Option<i64>,
    /// JSON-encoded list of suggestion strings.
    pub suggestions: Option<String>,
}

impl ResultRow {
    /// Decodes the stored suggestion list. Missing or corrupt data yields an empty list.
    pub fn suggestion_list(&self) -> Vec<String> {
        self.suggestions
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }
}
