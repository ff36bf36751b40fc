use async_trait::async_trait;

use crate::error::GenerationError;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Room for a 30-day plan with four detailed blocks per day.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
pub const TEMPERATURE_MAX: f32 = 2.0;

/// Sampling parameters and prompt for a single generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// Text generation capability shared by concurrent requests.
///
/// Implementations must not keep per-call state: everything a call needs travels in
/// the `GenerationRequest`. Retries, if any, are the implementation's business.
#[async_trait]
pub trait GenerationClient: Send + Sync + std::fmt::Debug {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Model identifier reported in response metadata.
    fn model(&self) -> &str;
}
