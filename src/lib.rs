//! tripwand: day-by-day travel itineraries from a generative text model
//!
//! A request is validated, rendered into a prompt, sent to the model, and the
//! model's free-form answer is cut down to its JSON, decoded into a strict schema and
//! stretched or trimmed to the requested number of days. Finished itineraries can be
//! handed to a background persistence worker for public browsing.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tripwand::{GeminiClient, ItineraryPlanner, ItineraryRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("GOOGLE_AI_API_KEY")?;
//!     let planner = ItineraryPlanner::new(Arc::new(GeminiClient::new(api_key)?));
//!
//!     let request = ItineraryRequest::new("Busan", 3).with_group_size(2);
//!     let itinerary = planner.generate_itinerary(&request).await?;
//!     println!("{}", serde_json::to_string_pretty(&itinerary)?);
//!     Ok(())
//! }
//! ```

extern crate self as tripwand;

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub(crate) mod services;
pub mod types;

pub use config::PlannerConfig;
pub use core::{
    build_prompt, validate_request, GenerationOverrides, ItineraryPlanner, ItineraryResponse,
    PipelineStage, PromptContext, ResponseMeta,
};
pub use error::{GenerationError, PersistenceError, Result, TripError};
pub use schemas::{CompletionSchema, SchemaHandle};
pub use services::decoder::decode_itinerary;
pub use services::extractor::extract_json;
pub use services::gemini_client::GeminiClient;
pub use services::generation::{GenerationClient, GenerationRequest};
pub use services::persistence::{DrainReport, PersistenceNotifier, PersistenceWorker};
pub use services::plan_store::{
    ItineraryStore, MemoryItineraryStore, PlanPage, PlanQuery, PlanStats,
};
pub use services::reconciler::{reconcile_itinerary, DayCountAdjustment};
pub use tripwand_macros::completion_schema;
pub use types::{
    ActivityBlock, DayPlan, ItineraryRequest, ItineraryResult, NewItineraryRecord,
    RequestSummary, StoredItineraryRecord, Visibility,
};

#[cfg(feature = "cli")]
pub mod cli;
