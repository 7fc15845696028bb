// LLM prompt for the ATS analysis.
// The parser in `analysis::parser` is written against the output format
// requested here; change both together.

/// Builds the ATS analysis prompt. Both inputs are embedded verbatim, in a
/// single pass, so neither can be re-substituted by the other's content.
pub fn build_ats_prompt(resume_text: &str, job_type: &str) -> String {
    format!(
        r#"Analyze the following resume text against the job type "{job_type}" to determine an ATS (Applicant Tracking System) compatibility score out of 100.
Provide actionable suggestions to improve the resume's ATS score for this specific job type.
Focus on keywords, formatting that might hinder ATS parsing, and overall relevance to the role.
Put the ATS Score on its own line, followed by a "Suggestions:" heading, followed by one suggestion per line, each starting with "- ".
Always write "/100" after the score.

Resume Text:
{resume_text}

Expected Output Format:
ATS Score: [SCORE]/100
Suggestions:
- Suggestion 1
- Suggestion 2"#
    )
}
