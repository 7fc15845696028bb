//! Gemini `generateContent` transport.
//!
//! Request: `{"contents": [{"parts": [{"text": <prompt>}]}]}`.
//! Reply text lives at `candidates[0].content.parts[0].text`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{AttemptOutcome, GenerationTransport, LlmError};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

const REPLY_TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Extracts the reply text from a decoded response body.
/// `None` when any step of the nested path is missing, mistyped or empty.
/// Sibling candidates and parts are never looked at.
pub fn reply_text(body: &Value) -> Option<String> {
    body.pointer(REPLY_TEXT_POINTER)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// reqwest-backed transport for the Gemini REST API.
#[derive(Clone)]
pub struct GeminiTransport {
    client: Client,
    api_url: String,
    api_key: String,
}

impl GeminiTransport {
    pub fn new(api_url: String, api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_url,
            api_key,
        })
    }
}

#[async_trait]
impl GenerationTransport for GeminiTransport {
    async fn send(&self, prompt: &str) -> AttemptOutcome {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = match self
            .client
            .post(&self.api_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return AttemptOutcome::Retryable(LlmError::Http(e)),
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return AttemptOutcome::Retryable(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = match response.bytes().await {
            Ok(b) => b,
            Err(e) => return AttemptOutcome::Retryable(LlmError::Http(e)),
        };

        let body: Value = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => return AttemptOutcome::Retryable(LlmError::Decode(e)),
        };

        match reply_text(&body) {
            Some(text) => AttemptOutcome::Success(text),
            None => AttemptOutcome::Soft(body.to_string()),
        }
    }
}
