// Content Generation Pipeline
// Implements: request validation, tone bands, prompt assembly, section parsing,
// template fallback and the campaign orchestrator.
// All model calls go through llm_client::TextGenerator.

pub mod campaign;
pub mod content;
pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod regional;
pub mod tone;
