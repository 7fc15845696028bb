use serde::{Serialize, Serializer};

use crate::errors::AppError;

/// Job type used when the caller leaves it blank.
pub const DEFAULT_JOB_TYPE: &str = "General Job";

/// One validated analysis call. Construct via `AnalysisRequest::new`, which is
/// where caller-input errors are rejected, before the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    resume_text: String,
    job_type: String,
}

impl AnalysisRequest {
    pub fn new(resume_text: impl Into<String>, job_type: Option<&str>) -> Result<Self, AppError> {
        let resume_text = resume_text.into();
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation(
                "resume_text cannot be empty".to_string(),
            ));
        }

        let job_type = job_type
            .map(str::trim)
            .filter(|j| !j.is_empty())
            .unwrap_or(DEFAULT_JOB_TYPE)
            .to_string();

        Ok(Self {
            resume_text,
            job_type,
        })
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn job_type(&self) -> &str {
        &self.job_type
    }
}

/// ATS compatibility score. Usually 0–100 but not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtsScore {
    Scored(u32),
    /// No score line could be read from the reply (or there was no reply).
    Unavailable,
}

impl AtsScore {
    pub fn value(self) -> Option<u32> {
        match self {
            AtsScore::Scored(n) => Some(n),
            AtsScore::Unavailable => None,
        }
    }
}

/// Serialized as a bare number, or `"N/A"` when unavailable.
impl Serialize for AtsScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AtsScore::Scored(n) => serializer.serialize_u32(*n),
            AtsScore::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// Score plus ordered suggestions. `suggestions` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    ats_score: AtsScore,
    suggestions: Vec<String>,
}

impl AnalysisResult {
    pub(crate) fn new(ats_score: AtsScore, suggestions: Vec<String>) -> Self {
        debug_assert!(!suggestions.is_empty(), "suggestions must never be empty");
        Self {
            ats_score,
            suggestions,
        }
    }

    pub fn ats_score(&self) -> AtsScore {
        self.ats_score
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}
