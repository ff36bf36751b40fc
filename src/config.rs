use std::str::FromStr;
use std::time::Duration;

use crate::{
    error::{Result, TripError},
    services::{
        gemini_client::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT},
        generation::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, TEMPERATURE_MAX},
        persistence::DEFAULT_QUEUE_CAPACITY,
    },
};

pub const API_KEY_VAR: &str = "GOOGLE_AI_API_KEY";
pub const MODEL_VAR: &str = "TRIPWAND_MODEL";
pub const BASE_URL_VAR: &str = "TRIPWAND_BASE_URL";
pub const TEMPERATURE_VAR: &str = "TRIPWAND_TEMPERATURE";
pub const MAX_OUTPUT_TOKENS_VAR: &str = "TRIPWAND_MAX_OUTPUT_TOKENS";
pub const TIMEOUT_VAR: &str = "TRIPWAND_TIMEOUT_SECS";
pub const PERSIST_QUEUE_VAR: &str = "TRIPWAND_PERSIST_QUEUE";

/// Settings for the generation client and pipeline defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout: Duration,
    pub persist_queue_capacity: usize,
}

impl PlannerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout: DEFAULT_TIMEOUT,
            persist_queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Load from the process environment. Callers wanting `.env` support run
    /// `dotenvy::dotenv()` first.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or_else(|| {
            TripError::Config(format!(
                "{API_KEY_VAR} environment variable must be set before creating a planner"
            ))
        })?;

        let mut config = Self::new(api_key);
        if let Some(model) = get(MODEL_VAR) {
            config.model = model;
        }
        if let Some(base_url) = get(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Some(temperature) = parse_var::<f32>(TEMPERATURE_VAR, get(TEMPERATURE_VAR))? {
            config.temperature = temperature;
        }
        if let Some(tokens) = parse_var::<u32>(MAX_OUTPUT_TOKENS_VAR, get(MAX_OUTPUT_TOKENS_VAR))? {
            config.max_output_tokens = tokens;
        }
        if let Some(secs) = parse_var::<u64>(TIMEOUT_VAR, get(TIMEOUT_VAR))? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(capacity) = parse_var::<usize>(PERSIST_QUEUE_VAR, get(PERSIST_QUEUE_VAR))? {
            config.persist_queue_capacity = capacity;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=TEMPERATURE_MAX).contains(&self.temperature) {
            return Err(TripError::Config(format!(
                "{TEMPERATURE_VAR} must be between 0 and {TEMPERATURE_MAX}, got {}",
                self.temperature
            )));
        }
        if self.max_output_tokens == 0 {
            return Err(TripError::Config(format!(
                "{MAX_OUTPUT_TOKENS_VAR} must be greater than zero"
            )));
        }
        if self.persist_queue_capacity == 0 {
            return Err(TripError::Config(format!(
                "{PERSIST_QUEUE_VAR} must be greater than zero"
            )));
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, value: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|err| TripError::Config(format!("invalid {key} `{raw}`: {err}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = PlannerConfig::from_lookup(lookup(&[(API_KEY_VAR, "secret")])).unwrap();

        assert_eq!(config, PlannerConfig::new("secret"));
        assert_eq!(config.model, "gemma-3-27b-it");
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_api_key() {
        let err = PlannerConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn test_overrides() {
        let config = PlannerConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (MODEL_VAR, "gemma-3-4b-it"),
            (TEMPERATURE_VAR, "1.1"),
            (MAX_OUTPUT_TOKENS_VAR, "4096"),
            (TIMEOUT_VAR, "30"),
            (PERSIST_QUEUE_VAR, "8"),
        ]))
        .unwrap();

        assert_eq!(config.model, "gemma-3-4b-it");
        assert!((config.temperature - 1.1).abs() < f32::EPSILON);
        assert_eq!(config.max_output_tokens, 4096);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.persist_queue_capacity, 8);
    }

    #[test]
    fn test_invalid_values() {
        let bad_number =
            PlannerConfig::from_lookup(lookup(&[(API_KEY_VAR, "k"), (MAX_OUTPUT_TOKENS_VAR, "lots")]))
                .unwrap_err();
        assert!(bad_number.to_string().contains(MAX_OUTPUT_TOKENS_VAR));

        let too_hot =
            PlannerConfig::from_lookup(lookup(&[(API_KEY_VAR, "k"), (TEMPERATURE_VAR, "2.5")]))
                .unwrap_err();
        assert!(too_hot.to_string().contains("between 0 and 2"));
    }
}
