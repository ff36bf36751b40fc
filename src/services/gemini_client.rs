use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use super::generation::{GenerationClient, GenerationRequest};
use crate::error::{GenerationError, Result, TripError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemma-3-27b-it";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const AVAILABLE_MODELS: [&str; 4] = [
    "gemma-3-1b-it",
    "gemma-3-4b-it",
    "gemma-3-12b-it",
    "gemma-3-27b-it",
];

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Google AI Studio `generateContent` client.
///
/// Holds one pooled HTTP client; every call builds its own request body, so
/// concurrent calls with different sampling parameters do not interfere.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TripError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Switch to another supported model.
    pub fn with_model(mut self, model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        if !AVAILABLE_MODELS.contains(&model.as_str()) {
            return Err(TripError::Config(format!(
                "unsupported model `{model}`, expected one of: {}",
                AVAILABLE_MODELS.join(", ")
            )));
        }
        self.model = model;
        Ok(self)
    }

    pub fn available_models() -> &'static [&'static str] {
        &AVAILABLE_MODELS
    }

    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<String, GenerationError> {
        let url = build_generate_url(&self.base_url, &self.model);
        let body = build_request_body(request);

        debug!(
            target: "tripwand::generation",
            model = %self.model,
            temperature = request.temperature,
            max_output_tokens = request.max_output_tokens,
            "sending generateContent request"
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                GenerationError::Unavailable(format!("HTTP request failed: {err}"))
            })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let response_text = response.text().await.map_err(|err| {
            GenerationError::Unavailable(format!("failed to read response: {err}"))
        })?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited { retry_after });
        }

        if status.is_server_error() {
            return Err(GenerationError::Unavailable(format!(
                "HTTP {}: {}",
                status,
                api_error_message(&response_text)
            )));
        }

        if !status.is_success() {
            return Err(GenerationError::Other(format!(
                "HTTP {}: {}",
                status,
                api_error_message(&response_text)
            )));
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|err| {
            GenerationError::Other(format!("failed to parse response JSON: {err}"))
        })?;

        if let Some(error) = response_json.get("error") {
            let message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(GenerationError::Other(format!("API error: {message}")));
        }

        candidate_text(&response_json)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<String, GenerationError> {
        self.generate_content(request).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with(":generateContent") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/models/{model}:generateContent")
    }
}

fn build_request_body(request: &GenerationRequest) -> Value {
    let safety_settings: Vec<Value> = SAFETY_CATEGORIES
        .iter()
        .map(|category| {
            json!({
                "category": category,
                "threshold": "BLOCK_MEDIUM_AND_ABOVE"
            })
        })
        .collect();

    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": request.prompt }]
        }],
        "generationConfig": {
            "temperature": request.temperature,
            "maxOutputTokens": request.max_output_tokens,
            "topP": 0.9,
            "topK": 40
        },
        "safetySettings": safety_settings
    })
}

/// Concatenate the text parts of the first candidate.
fn candidate_text(response: &Value) -> std::result::Result<String, GenerationError> {
    let parts = response
        .get("candidates")
        .and_then(|value| value.as_array())
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|value| value.as_array())
        .filter(|parts| !parts.is_empty())
        .ok_or_else(|| GenerationError::Other("no content generated".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|value| value.as_str()))
        .collect();

    if text.is_empty() {
        return Err(GenerationError::Other("no content generated".to_string()));
    }

    Ok(text)
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|message| message.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.to_string())
}
