//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::analysis::history::{fetch_result, record_result, ResultRecord};
use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::errors::AppError;
use crate::extraction::extract_document_text;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_TYPE_FIELD: &str = "job_type";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub extracted_text: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    pub job_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResultDetailResponse {
    pub id: i64,
    pub timestamp: String,
    pub resume_text: String,
    pub job_type: String,
    pub ats_score: Option<i64>,
    pub suggestions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /upload_resume
///
/// Multipart form: `resume` (PDF file) and optional `job_type`.
/// Extracts the text, runs the analysis and records the result.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut job_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            // A `resume` field without a filename is a plain form value, not a file part.
            Some(RESUME_FIELD) => {
                if let Some(filename) = field.file_name().map(str::to_owned) {
                    let data = field.bytes().await?;
                    resume = Some((filename, data));
                }
            }
            Some(JOB_TYPE_FIELD) => job_type = Some(field.text().await?),
            _ => {}
        }
    }

    let (filename, document) =
        resume.ok_or_else(|| AppError::Validation("No resume file part".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    if !filename.to_ascii_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "Invalid file type. Only PDF is supported.".to_string(),
        ));
    }

    let resume_text = extract_document_text(state.extractor.clone(), document)
        .await
        .map_err(|e| {
            warn!("Error extracting text from {filename}: {e}");
            AppError::Extraction(
                "Failed to extract text from PDF. Please ensure it's a searchable PDF."
                    .to_string(),
            )
        })?;

    let request = AnalysisRequest::new(resume_text, job_type.as_deref())?;
    let result = analyze_and_record(&state, &request).await;

    Ok(Json(UploadResponse {
        result,
        extracted_text: request.resume_text().to_string(),
    }))
}

/// POST /api/v1/analyze
///
/// Same pipeline as the upload form, for callers that already hold the text.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let request = AnalysisRequest::new(body.resume_text, body.job_type.as_deref())?;
    Ok(Json(analyze_and_record(&state, &request).await))
}

/// GET /api/v1/results/:id
pub async fn handle_get_result(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ResultDetailResponse>, AppError> {
    let row = fetch_result(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Result {id} not found")))?;

    let suggestions = row.suggestion_list();
    Ok(Json(ResultDetailResponse {
        id: row.id,
        timestamp: row.timestamp,
        resume_text: row.resume_text,
        job_type: row.job_type,
        ats_score: row.ats_score,
        suggestions,
    }))
}

/// Runs the analysis and appends the result. A failed write is logged, not
/// returned: the caller still gets the analysis.
async fn analyze_and_record(state: &AppState, request: &AnalysisRequest) -> AnalysisResult {
    let result = state.analyzer.analyze(request).await;

    let record = ResultRecord::from_analysis(request, &result);
    match record_result(&state.db, &record).await {
        Ok(id) => info!("Resume analysis result {id} saved to database"),
        Err(e) => error!("Error saving analysis result to database: {e:?}"),
    }

    result
}
