//! Analysis orchestrator, the single entry point for running an ATS analysis.
//!
//! Flow: build_ats_prompt → GenerationClient::generate → parse_ats_response.
//!
//! Upload and JSON handlers call `Analyzer::analyze` and nothing below it, so
//! the prompt, client and parser can change independently.

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::analysis::parser::parse_ats_response;
use crate::analysis::prompts::build_ats_prompt;
use crate::llm_client::GenerationClient;

#[derive(Clone)]
pub struct Analyzer {
    client: GenerationClient,
}

impl Analyzer {
    pub fn new(client: GenerationClient) -> Self {
        Self { client }
    }

    /// Runs one analysis to completion, retry sleeps included.
    ///
    /// Never fails: if the generation service is down or replies with nonsense,
    /// the result carries an unavailable score and a filler suggestion.
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let span = info_span!(
            "analysis",
            analysis_id = %Uuid::new_v4(),
            job_type = %request.job_type()
        );

        async {
            let prompt = build_ats_prompt(request.resume_text(), request.job_type());
            let reply = self.client.generate(&prompt).await;
            let result = parse_ats_response(reply.as_deref());

            info!(
                ats_score = ?result.ats_score().value(),
                suggestions = result.suggestions().len(),
                "ATS analysis complete"
            );
            result
        }
        .instrument(span)
        .await
    }
}
