pub mod decoder;
pub mod extractor;
pub mod gemini_client;
pub mod generation;
pub mod persistence;
pub mod plan_store;
pub mod reconciler;
