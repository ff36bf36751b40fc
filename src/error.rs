use std::time::Duration;

use thiserror::Error;

use crate::core::stage::PipelineStage;

/// Main error type for the itinerary pipeline
#[derive(Error, Debug)]
pub enum TripError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Malformed model response: {reason}")]
    MalformedResponse { reason: String, raw_text: String },

    #[error("Schema error: {0}")]
    Schema(String),
}

/// Failures reported by the generation capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("generation service unavailable: {0}")]
    Unavailable(String),

    #[error("generation rate limited{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    #[error("{0}")]
    Other(String),
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(after) => format!(", retry after {}s", after.as_secs()),
        None => String::new(),
    }
}

/// Failures inside the persistence collaborator. Logged, never surfaced to callers.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TripError>;

impl TripError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        TripError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>, raw_text: impl Into<String>) -> Self {
        TripError::MalformedResponse {
            reason: reason.into(),
            raw_text: raw_text.into(),
        }
    }

    /// Whether the caller may reasonably try the same request again later.
    /// The pipeline itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            TripError::Generation(err) => err.is_transient(),
            TripError::MalformedResponse { .. } => true,
            _ => false,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TripError::Config(_) => "CONFIG_ERROR",
            TripError::Validation { .. } => "VALIDATION_ERROR",
            TripError::Generation(GenerationError::Unavailable(_)) => "GENERATION_UNAVAILABLE",
            TripError::Generation(GenerationError::RateLimited { .. }) => {
                "GENERATION_RATE_LIMITED"
            }
            TripError::Generation(GenerationError::Other(_)) => "GENERATION_ERROR",
            TripError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            TripError::Schema(_) => "SCHEMA_ERROR",
        }
    }

    /// Last stage a failed run completed before it stopped.
    pub fn failed_stage(&self) -> PipelineStage {
        match self {
            // Sampling overrides are checked after the request itself passed.
            TripError::Validation {
                field: "temperature" | "max_output_tokens",
                ..
            } => PipelineStage::Validated,
            TripError::Config(_) | TripError::Validation { .. } => PipelineStage::Received,
            TripError::Generation(_) => PipelineStage::Prompted,
            TripError::MalformedResponse { .. } | TripError::Schema(_) => {
                PipelineStage::Extracted
            }
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        });

        match self {
            TripError::Validation { field, .. } => {
                payload["error"]["field"] = serde_json::json!(field);
            }
            TripError::MalformedResponse { raw_text, .. } => {
                payload["error"]["raw_response"] = serde_json::json!(raw_text);
            }
            _ => {}
        }

        payload
    }
}

impl GenerationError {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GenerationError::Unavailable(_) | GenerationError::RateLimited { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_payload_names_field() {
        let err = TripError::validation("duration", "must be between 1 and 30");
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(!err.is_retryable());

        let payload = err.to_error_payload();
        assert_eq!(payload["error"]["field"], "duration");
        assert_eq!(payload["error"]["retryable"], false);
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap()
            .contains("between 1 and 30"));
    }

    #[test]
    fn test_failed_stage_of_validation_errors() {
        let request = TripError::validation("group_size", "must be between 1 and 50");
        assert_eq!(request.failed_stage(), PipelineStage::Received);

        let sampling = TripError::validation("max_output_tokens", "must be greater than zero");
        assert_eq!(sampling.failed_stage(), PipelineStage::Validated);
        assert_eq!(sampling.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_malformed_payload_carries_raw_text() {
        let err = TripError::malformed("expected value at line 1", "Sorry, I cannot help.");
        let payload = err.to_error_payload();

        assert_eq!(payload["error"]["code"], "MALFORMED_RESPONSE");
        assert_eq!(payload["error"]["raw_response"], "Sorry, I cannot help.");
        assert_eq!(err.failed_stage(), PipelineStage::Extracted);
    }

    #[test]
    fn test_generation_error_codes() {
        let limited = TripError::from(GenerationError::RateLimited {
            retry_after: Some(Duration::from_secs(30)),
        });
        assert_eq!(limited.error_code(), "GENERATION_RATE_LIMITED");
        assert!(limited.is_retryable());
        assert!(limited.to_string().contains("retry after 30s"));

        let other = TripError::from(GenerationError::Other("blocked by safety filter".into()));
        assert_eq!(other.error_code(), "GENERATION_ERROR");
        assert!(!other.is_retryable());
        assert_eq!(other.failed_stage(), PipelineStage::Prompted);
    }
}
