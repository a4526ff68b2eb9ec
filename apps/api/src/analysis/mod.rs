// Founder analysis: intake models, idea synthesis, HTML rendering and the
// pipeline that ties them to delivery.
// All LLM calls go through llm_client; all webhook calls go through delivery.

pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod render;
pub mod synthesizer;
