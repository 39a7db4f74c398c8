//! Gemini HTTP client and the service seam the pipeline calls through.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::config;

use super::AiError;

/// Single-operation seam over the generative text service.
pub trait AiService {
    fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

/// Gemini REST client with bounded timeouts. The HTTP round trip is the
/// pipeline's only suspension point; no store lock is held across it.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(timeout_secs))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client configured from the environment: GEMINI_API_KEY (required),
    /// GEMINI_MODEL and GEMINI_BASE_URL (optional overrides).
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| AiError::Api("GEMINI_API_KEY is not set".into()))?;
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| config::DEFAULT_GEMINI_MODEL.into());
        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| config::DEFAULT_GEMINI_BASE_URL.into());
        Ok(Self::new(
            &base_url,
            &model,
            &api_key,
            config::AI_TIMEOUT_SECS,
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Request body for the generateContent endpoint.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl AiService for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                AiError::ServiceUnavailable(format!("cannot reach {}", self.base_url))
            } else if e.is_timeout() {
                AiError::ServiceUnavailable(format!(
                    "request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                AiError::ServiceUnavailable(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;

        if !status.is_success() {
            // Error statuses still carry the documented error envelope;
            // let the shared parser surface its message.
            return match extract_completion_text(&text) {
                Err(err) => Err(err),
                Ok(_) => Err(AiError::Api(format!("unexpected status {status}"))),
            };
        }

        extract_completion_text(&text)
    }
}

/// Pull the completion text out of a raw response body.
///
/// The one place that distinguishes the three documented response shapes:
/// a success envelope with candidates, an error object, and a
/// safety-filter block. Every AI operation goes through here.
pub fn extract_completion_text(body: &str) -> Result<String, AiError> {
    if body.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| AiError::MalformedResponse(e.to_string()))?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown API error");
        return Err(AiError::Api(message.to_string()));
    }

    if let Some(reason) = value
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)
    {
        return Err(AiError::Blocked(reason.to_string()));
    }

    let text = value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| AiError::MalformedResponse("no candidate content".into()))?;

    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text.to_string())
}

/// Mock AI service for testing — returns a configured response.
pub struct MockAiClient {
    response: String,
}

impl MockAiClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl AiService for MockAiClient {
    fn complete(&self, _prompt: &str) -> Result<String, AiError> {
        Ok(self.response.clone())
    }
}
