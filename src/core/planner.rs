use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{prompt::build_prompt, stage::PipelineStage, validator::validate_request};
use crate::{
    config::PlannerConfig,
    error::{Result, TripError},
    services::{
        decoder::decode_itinerary,
        extractor::extract_json,
        generation::{
            GenerationClient, GenerationRequest, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE,
            TEMPERATURE_MAX,
        },
        persistence::PersistenceNotifier,
        reconciler::{reconcile_itinerary, DayCountAdjustment},
    },
    types::{ItineraryRequest, ItineraryResult},
};

/// Per-call sampling overrides. `None` keeps the planner's default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationOverrides {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

/// Transport envelope returned to routing layers.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryResponse {
    pub success: bool,
    pub data: ItineraryResult,
    pub meta: ResponseMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseMeta {
    pub destination: String,
    pub duration: u32,
    pub model: String,
}

/// Itinerary generation pipeline.
///
/// validate → prompt → generate → extract → decode → reconcile, then hands the
/// result to the persistence notifier without waiting on it.
#[derive(Debug, Clone)]
pub struct ItineraryPlanner {
    client: Arc<dyn GenerationClient>,
    temperature: f32,
    max_output_tokens: u32,
    model_label: Option<String>,
    notifier: Option<PersistenceNotifier>,
}

impl ItineraryPlanner {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            model_label: None,
            notifier: None,
        }
    }

    pub fn from_config(client: Arc<dyn GenerationClient>, config: &PlannerConfig) -> Self {
        Self::new(client)
            .with_temperature(config.temperature)
            .with_max_output_tokens(config.max_output_tokens)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_notifier(mut self, notifier: PersistenceNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Name reported in response metadata instead of the client's model id.
    pub fn with_model_label(mut self, label: impl Into<String>) -> Self {
        self.model_label = Some(label.into());
        self
    }

    pub fn model(&self) -> &str {
        self.model_label
            .as_deref()
            .unwrap_or_else(|| self.client.model())
    }

    pub async fn generate_itinerary(&self, request: &ItineraryRequest) -> Result<ItineraryResult> {
        self.generate_itinerary_with(request, GenerationOverrides::default())
            .await
    }

    pub async fn generate_itinerary_with(
        &self,
        request: &ItineraryRequest,
        overrides: GenerationOverrides,
    ) -> Result<ItineraryResult> {
        debug!(
            target: "tripwand::pipeline",
            destination = %request.destination,
            duration = request.duration,
            stage = %PipelineStage::Received,
            "itinerary requested"
        );

        let result = self.run_pipeline(request, overrides).await.inspect_err(|err| {
            warn!(
                target: "tripwand::pipeline",
                destination = %request.destination,
                duration = request.duration,
                stage = %err.failed_stage(),
                code = err.error_code(),
                error = %err,
                "itinerary generation failed"
            );
        })?;

        if let Some(notifier) = &self.notifier {
            notifier.notify(request, &result);
        }

        info!(
            target: "tripwand::pipeline",
            destination = %request.destination,
            duration = request.duration,
            stage = %PipelineStage::Returned,
            "itinerary generated"
        );
        Ok(result)
    }

    /// Run the pipeline and wrap the result with request metadata.
    pub async fn generate_response(&self, request: &ItineraryRequest) -> Result<ItineraryResponse> {
        let data = self.generate_itinerary(request).await?;
        Ok(ItineraryResponse {
            success: true,
            data,
            meta: ResponseMeta {
                destination: request.destination.trim().to_string(),
                duration: request.duration,
                model: self.model().to_string(),
            },
        })
    }

    async fn run_pipeline(
        &self,
        request: &ItineraryRequest,
        overrides: GenerationOverrides,
    ) -> Result<ItineraryResult> {
        validate_request(request)?;
        debug!(target: "tripwand::pipeline", stage = %PipelineStage::Validated);

        let generation = self.generation_request(build_prompt(request), overrides)?;
        debug!(
            target: "tripwand::pipeline",
            stage = %PipelineStage::Prompted,
            prompt_len = generation.prompt.len()
        );

        let raw_text = self.client.generate(&generation).await?;
        debug!(
            target: "tripwand::pipeline",
            stage = %PipelineStage::Generated,
            response_len = raw_text.len()
        );

        let json_text = extract_json(&raw_text);
        debug!(
            target: "tripwand::pipeline",
            stage = %PipelineStage::Extracted,
            json_len = json_text.len()
        );

        let decoded = decode_itinerary(json_text, &raw_text)?;
        let generated_days = decoded.day_count();
        debug!(
            target: "tripwand::pipeline",
            stage = %PipelineStage::Decoded,
            generated_days
        );

        let adjustment = DayCountAdjustment::between(generated_days, request.duration as usize);
        if adjustment != DayCountAdjustment::Unchanged {
            warn!(
                target: "tripwand::pipeline",
                requested = request.duration,
                generated_days,
                ?adjustment,
                "day count mismatch, reconciling"
            );
        }

        let reconciled = reconcile_itinerary(decoded, request.duration);
        debug!(target: "tripwand::pipeline", stage = %PipelineStage::Reconciled);
        Ok(reconciled)
    }

    fn generation_request(
        &self,
        prompt: String,
        overrides: GenerationOverrides,
    ) -> Result<GenerationRequest> {
        let temperature = overrides.temperature.unwrap_or(self.temperature);
        if !(0.0..=TEMPERATURE_MAX).contains(&temperature) {
            return Err(TripError::validation(
                "temperature",
                format!("must be between 0 and {TEMPERATURE_MAX}, got {temperature}"),
            ));
        }

        let max_output_tokens = overrides.max_output_tokens.unwrap_or(self.max_output_tokens);
        if max_output_tokens == 0 {
            return Err(TripError::validation(
                "max_output_tokens",
                "must be greater than zero",
            ));
        }

        Ok(GenerationRequest::new(prompt)
            .with_temperature(temperature)
            .with_max_output_tokens(max_output_tokens))
    }
}
