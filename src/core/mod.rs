pub mod planner;
pub mod prompt;
pub mod stage;
pub mod validator;

pub use planner::{GenerationOverrides, ItineraryPlanner, ItineraryResponse, ResponseMeta};
pub use prompt::{build_prompt, PromptContext};
pub use stage::PipelineStage;
pub use validator::validate_request;
