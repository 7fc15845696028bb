//! Generation client: the single point of entry for all Gemini calls.
//!
//! No other module may call the generation service directly. Every prompt goes
//! through `GenerationClient::generate`, which owns the retry policy, the
//! per-attempt timeout and the classification of failed attempts.
//!
//! The client never inspects prompt content; it is reusable for any prompt.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, warn};

pub mod gemini;

pub use gemini::GeminiTransport;

const DEFAULT_MAX_RETRIES: u32 = 5;
const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);
const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Attempt timed out after {0:?}")]
    Timeout(Duration),
}

/// Raw reply text from the generation service, or `None` when no usable reply
/// could be obtained (retries exhausted or a soft failure).
pub type GenerationReply = Option<String>;

/// Classification of a single attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The service answered with reply text.
    Success(String),
    /// Transport-level failure: network error, non-success status, a body that
    /// is not JSON, or a timeout. Worth another attempt.
    Retryable(LlmError),
    /// Well-formed response without the expected text field. Repeating the
    /// call will not help, so it is never retried. Carries the offending body.
    Soft(String),
}

/// One request/response exchange with a generation backend.
///
/// Implementations classify their own failures; the client only adds the
/// per-attempt timeout on top.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn send(&self, prompt: &str) -> AttemptOutcome;
}

/// Retry/backoff settings for `GenerationClient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_retries: u32,
    /// Delay after the first failed attempt. Doubles after each further failure.
    pub initial_delay: Duration,
    /// Upper bound on a single attempt. A timed-out attempt is retryable.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt `failed_attempt` (1-based):
    /// `initial_delay * 2^(failed_attempt - 1)`.
    pub fn backoff_delay(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1).min(31);
        self.initial_delay.saturating_mul(1u32 << exponent)
    }
}

/// Resilient client used by the analysis pipeline.
/// Cheap to clone; holds no state between calls.
#[derive(Clone)]
pub struct GenerationClient {
    transport: Arc<dyn GenerationTransport>,
    policy: RetryPolicy,
}

impl GenerationClient {
    pub fn new(transport: Arc<dyn GenerationTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Sends `prompt`, retrying retryable failures with exponential backoff.
    ///
    /// Returns `None` once attempts are exhausted or on the first soft failure.
    /// There is no sleep after the final attempt.
    pub async fn generate(&self, prompt: &str) -> GenerationReply {
        let max_retries = self.policy.max_retries;

        for attempt in 1..=max_retries {
            match self.attempt(prompt).await {
                AttemptOutcome::Success(text) => {
                    debug!("Generation call succeeded on attempt {attempt}/{max_retries}");
                    return Some(text);
                }
                AttemptOutcome::Soft(body) => {
                    warn!("Generation response format unexpected: {body}");
                    return None;
                }
                AttemptOutcome::Retryable(e) => {
                    error!("Generation call failed (attempt {attempt}/{max_retries}): {e}");
                    if attempt < max_retries {
                        let delay = self.policy.backoff_delay(attempt);
                        warn!("Retrying generation call after {}ms...", delay.as_millis());
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        error!("Max retries reached for generation call");
        None
    }

    async fn attempt(&self, prompt: &str) -> AttemptOutcome {
        let timeout = self.policy.attempt_timeout;
        match tokio::time::timeout(timeout, self.transport.send(prompt)).await {
            Ok(outcome) => outcome,
            Err(_) => AttemptOutcome::Retryable(LlmError::Timeout(timeout)),
        }
    }
}
