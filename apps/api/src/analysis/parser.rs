//! Response parser. Turns the model's free-form ATS reply into an `AnalysisResult`.
//!
//! Written against the output format requested by `prompts::build_ats_prompt`:
//!
//! ```text
//! ATS Score: 75/100
//! Suggestions:
//! - Suggestion 1
//! - Suggestion 2
//! ```
//!
//! Parsing is total. Malformed, truncated or adversarial replies degrade to an
//! unavailable score and a filler suggestion; nothing here returns an error or panics.
//!
//! Line rules, applied in order to each line:
//! 1. Score line (`ATS Score: <ASCII digits>`) → first parsed score wins, later ones are ignored.
//! 2. Trimmed line starting with `-` → bullet, leading hyphens/spaces stripped.
//! 3. Line containing `Suggestions:` → heading, skipped.
//! 4. Other non-blank line → kept only while nothing has been collected yet,
//!    and only if it does not mention the score label.
//! 5. Blank line → ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::models::{AnalysisResult, AtsScore};

pub const NO_RESPONSE_MESSAGE: &str = "Could not get a response from AI.";

/// Filler when the model scored the resume but gave no suggestions.
pub const KEYWORD_ALIGNMENT_FILLER: &str = "No specific suggestions were provided, \
    but ensure your resume closely matches the job description keywords.";

/// Filler when neither a score nor a suggestion could be read.
pub const UNPARSEABLE_FILLER: &str = "Could not parse response or no specific suggestions \
    provided. Ensure the job type is clear.";

const SCORE_LABEL: &str = "ATS Score:";
const SUGGESTIONS_HEADING: &str = "Suggestions:";

static SCORE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ATS Score:\s*([0-9]+)").expect("score pattern is valid"));

/// Parses a generation reply. `None` (or an empty reply) yields the fixed
/// "no response" sentinel.
pub fn parse_ats_response(reply: Option<&str>) -> AnalysisResult {
    let Some(reply) = reply.filter(|r| !r.is_empty()) else {
        return AnalysisResult::new(AtsScore::Unavailable, vec![NO_RESPONSE_MESSAGE.to_string()]);
    };

    let mut score = AtsScore::Unavailable;
    let mut suggestions: Vec<String> = Vec::new();

    for line in reply.lines() {
        let trimmed = line.trim();

        if let Some(caps) = SCORE_LINE.captures(line) {
            // Out-of-range digits leave the score unset, so a later line may still set it.
            if score == AtsScore::Unavailable {
                if let Ok(value) = caps[1].parse::<u32>() {
                    score = AtsScore::Scored(value);
                }
            }
        } else if trimmed.starts_with('-') {
            let bullet = trimmed.trim_start_matches(['-', ' ']).trim();
            if !bullet.is_empty() {
                suggestions.push(bullet.to_string());
            }
        } else if line.contains(SUGGESTIONS_HEADING) {
            continue;
        } else if !trimmed.is_empty() && suggestions.is_empty() && !line.contains(SCORE_LABEL) {
            suggestions.push(trimmed.to_string());
        }
    }

    if suggestions.is_empty() {
        let filler = match score {
            AtsScore::Scored(_) => KEYWORD_ALIGNMENT_FILLER,
            AtsScore::Unavailable => UNPARSEABLE_FILLER,
        };
        suggestions.push(filler.to_string());
    }

    AnalysisResult::new(score, suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(reply: &str) -> AnalysisResult {
        parse_ats_response(Some(reply))
    }

    #[test]
    fn test_no_reply_yields_sentinel() {
        let result = parse_ats_response(None);
        assert_eq!(result.ats_score(), AtsScore::Unavailable);
        assert_eq!(result.suggestions(), [NO_RESPONSE_MESSAGE]);
    }

    #[test]
    fn test_empty_reply_yields_sentinel() {
        let result = parse("");
        assert_eq!(result.ats_score(), AtsScore::Unavailable);
        assert_eq!(result.suggestions(), [NO_RESPONSE_MESSAGE]);
    }

    #[test]
    fn test_well_formed_reply() {
        let result = parse("ATS Score: 82/100\nSuggestions:\n- Add keywords\n- Fix formatting");
        assert_eq!(result.ats_score(), AtsScore::Scored(82));
        assert_eq!(result.suggestions(), ["Add keywords", "Fix formatting"]);
    }

    #[test]
    fn test_score_without_suggestions_gets_keyword_filler() {
        let result = parse("ATS Score: 64/100\n");
        assert_eq!(result.ats_score(), AtsScore::Scored(64));
        assert_eq!(result.suggestions(), [KEYWORD_ALIGNMENT_FILLER]);
    }

    #[test]
    fn test_score_and_heading_only_gets_keyword_filler() {
        let result = parse("ATS Score: 64/100\nSuggestions:\n\n");
        assert_eq!(result.suggestions(), [KEYWORD_ALIGNMENT_FILLER]);
    }

    #[test]
    fn test_nothing_recognizable_gets_unparseable_filler() {
        let result = parse("Suggestions:\n\n   \n");
        assert_eq!(result.ats_score(), AtsScore::Unavailable);
        assert_eq!(result.suggestions(), [UNPARSEABLE_FILLER]);
    }

    #[test]
    fn test_whitespace_only_reply_is_unparseable_not_missing() {
        let result = parse("  \n\t\n");
        assert_eq!(result.suggestions(), [UNPARSEABLE_FILLER]);
    }

    #[test]
    fn test_fillers_are_distinguishable() {
        assert_ne!(KEYWORD_ALIGNMENT_FILLER, UNPARSEABLE_FILLER);
        assert_ne!(KEYWORD_ALIGNMENT_FILLER, NO_RESPONSE_MESSAGE);
        assert_ne!(UNPARSEABLE_FILLER, NO_RESPONSE_MESSAGE);

        let scored = parse("ATS Score: 50/100");
        let unscored = parse("Suggestions:");
        assert_ne!(scored.suggestions(), unscored.suggestions());
    }

    #[test]
    fn test_first_score_wins() {
        let result = parse("ATS Score: 71/100\nSuggestions:\n- Tighten summary\nATS Score: 93/100");
        assert_eq!(result.ats_score(), AtsScore::Scored(71));
        assert_eq!(result.suggestions(), ["Tighten summary"]);
    }

    #[test]
    fn test_score_found_mid_line_and_without_space() {
        assert_eq!(parse("Overall ATS Score:88/100").ats_score(), AtsScore::Scored(88));
        assert_eq!(parse("ATS Score:   7 / 100").ats_score(), AtsScore::Scored(7));
    }

    #[test]
    fn test_score_is_not_clamped() {
        assert_eq!(parse("ATS Score: 140/100").ats_score(), AtsScore::Scored(140));
    }

    #[test]
    fn test_only_ascii_digits_are_a_score() {
        let result = parse("ATS Score: \u{0668}\u{0662}/100\nATS Score: 64/100");
        assert_eq!(result.ats_score(), AtsScore::Scored(64));

        let result = parse("ATS Score: \u{0668}\u{0662}/100");
        assert_eq!(result.ats_score(), AtsScore::Unavailable);
        assert_eq!(result.suggestions(), [UNPARSEABLE_FILLER]);
    }

    #[test]
    fn test_overflowing_score_is_skipped_and_later_score_used() {
        let result = parse("ATS Score: 99999999999999/100\nATS Score: 55/100");
        assert_eq!(result.ats_score(), AtsScore::Scored(55));
        assert_eq!(result.suggestions(), [KEYWORD_ALIGNMENT_FILLER]);
    }

    #[test]
    fn test_label_without_digits_is_neither_score_nor_suggestion() {
        let result = parse("ATS Score: N/A\nSuggestions:\n- Add a skills section");
        assert_eq!(result.ats_score(), AtsScore::Unavailable);
        assert_eq!(result.suggestions(), ["Add a skills section"]);
    }

    #[test]
    fn test_markdown_bold_label_is_not_a_score() {
        let result = parse("**ATS Score:** 80/100\n- Use standard headings");
        assert_eq!(result.ats_score(), AtsScore::Unavailable);
        assert_eq!(result.suggestions(), ["Use standard headings"]);
    }

    #[test]
    fn test_never_coerces_missing_score_to_zero() {
        let result = parse("- Only bullets here");
        assert_eq!(result.ats_score(), AtsScore::Unavailable);
        assert_eq!(result.ats_score().value(), None);
    }

    #[test]
    fn test_bullet_stripping() {
        let result = parse("ATS Score: 60/100\n   -- Use action verbs  \n-\tQuantify impact\n- - Nested dash");
        assert_eq!(
            result.suggestions(),
            ["Use action verbs", "Quantify impact", "Nested dash"]
        );
    }

    #[test]
    fn test_bare_hyphen_lines_are_dropped() {
        let result = parse("ATS Score: 60/100\n-\n - \n---");
        assert_eq!(result.suggestions(), [KEYWORD_ALIGNMENT_FILLER]);
    }

    #[test]
    fn test_bullet_keeps_inner_hyphens() {
        let result = parse("- Add state-of-the-art tooling - e.g. CI/CD");
        assert_eq!(result.suggestions(), ["Add state-of-the-art tooling - e.g. CI/CD"]);
    }

    #[test]
    fn test_fallback_captures_first_plain_line_only() {
        let result = parse(
            "ATS Score: 70/100\nImprove your summary section.\nAlso consider a portfolio link.",
        );
        assert_eq!(result.ats_score(), AtsScore::Scored(70));
        assert_eq!(result.suggestions(), ["Improve your summary section."]);
    }

    #[test]
    fn test_preamble_is_captured_before_bullets() {
        let result = parse("Here is my review.\nATS Score: 65/100\nSuggestions:\n- Add metrics");
        assert_eq!(result.suggestions(), ["Here is my review.", "Add metrics"]);
    }

    #[test]
    fn test_trailing_prose_after_bullets_is_dropped() {
        let result = parse(
            "ATS Score: 77/100\nSuggestions:\n- Add keywords\n\nThese changes should help a lot.",
        );
        assert_eq!(result.suggestions(), ["Add keywords"]);
    }

    #[test]
    fn test_heading_variants_are_skipped() {
        let result = parse("ATS Score: 80/100\nKey Suggestions: \n- One");
        assert_eq!(result.suggestions(), ["One"]);
    }

    #[test]
    fn test_bullet_mentioning_heading_is_still_a_bullet() {
        let result = parse("- Suggestions: rename sections");
        assert_eq!(result.suggestions(), ["Suggestions: rename sections"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let result = parse("ATS Score: 91/100\r\nSuggestions:\r\n- Shorten bullets\r\n- Remove tables\r\n");
        assert_eq!(result.ats_score(), AtsScore::Scored(91));
        assert_eq!(result.suggestions(), ["Shorten bullets", "Remove tables"]);
    }

    #[test]
    fn test_suggestions_never_empty_for_arbitrary_inputs() {
        let inputs = [
            "", " ", "\n", "ATS Score:", "ATS Score: 1", "-", "--", "Suggestions:",
            "garbage \u{0}\u{fffd}", "ATS Score: 12/100\n- \n-", "\r\n\r\n",
        ];
        for input in inputs {
            let result = parse(input);
            assert!(!result.suggestions().is_empty(), "empty suggestions for {input:?}");
            assert!(
                result.suggestions().iter().all(|s| !s.is_empty()),
                "blank suggestion for {input:?}"
            );
        }
    }

    #[test]
    fn test_truncated_reply() {
        let result = parse("ATS Score: 8");
        assert_eq!(result.ats_score(), AtsScore::Scored(8));
        assert_eq!(result.suggestions(), [KEYWORD_ALIGNMENT_FILLER]);
    }
}
