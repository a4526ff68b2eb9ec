//! Idea Synthesizer — turns a founder profile into a list of scored business ideas.
//!
//! `AppState` holds an `Arc<dyn IdeaSynthesizer>`; the default backend is
//! `LlmIdeaSynthesizer`, which makes exactly one chat-completion call.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::models::{AnalysisResult, BusinessIdea, FounderProfile};
use crate::analysis::prompts::ANALYSIS_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_OBJECT_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

/// The synthesizer trait. Implement this to swap backends without touching
/// the pipeline or the handler.
#[async_trait]
pub trait IdeaSynthesizer: Send + Sync {
    /// Returns ideas in the documented shape, or `AppError::Synthesis` / `AppError::Timeout`.
    async fn synthesize(&self, profile: &FounderProfile) -> Result<AnalysisResult, AppError>;
}

/// Exact shape the model is told to return. A missing `ideas` key is a parse error.
#[derive(Debug, Deserialize)]
struct IdeasEnvelope {
    ideas: Vec<BusinessIdea>,
}

pub struct LlmIdeaSynthesizer {
    llm: LlmClient,
}

impl LlmIdeaSynthesizer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl IdeaSynthesizer for LlmIdeaSynthesizer {
    async fn synthesize(&self, profile: &FounderProfile) -> Result<AnalysisResult, AppError> {
        info!(
            "Requesting idea analysis for user {} (model: {})",
            profile.wp_user_id,
            self.llm.model()
        );
        let prompt = build_analysis_prompt(profile);

        let envelope: IdeasEnvelope = self
            .llm
            .call_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(synthesis_error)?;

        log_incomplete_ideas(&envelope.ideas);
        info!("Model returned {} ideas", envelope.ideas.len());

        Ok(AnalysisResult {
            ideas: envelope.ideas,
            error: None,
        })
    }
}

fn synthesis_error(err: LlmError) -> AppError {
    match err {
        LlmError::Timeout { timeout_ms } => AppError::Timeout {
            operation: "idea synthesis".to_string(),
            timeout_ms,
        },
        other => AppError::Synthesis(other.to_string()),
    }
}

fn log_incomplete_ideas(ideas: &[BusinessIdea]) {
    for (i, idea) in ideas.iter().enumerate() {
        let missing = idea.missing_fields();
        if !missing.is_empty() {
            warn!("Idea {} is missing fields {:?}; placeholders will be rendered", i + 1, missing);
        }
    }
}

/// Fills the analysis template with the profile. Answers are embedded verbatim.
pub fn build_analysis_prompt(profile: &FounderProfile) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{json_instruction}", JSON_OBJECT_INSTRUCTION)
        .replace("{punto_de_partida}", &profile.punto_de_partida)
        .replace("{personalidad_fundador}", &profile.personalidad_fundador)
        .replace("{pasiones_fundador}", &profile.pasiones_fundador)
        .replace("{recursos_fundador}", &profile.recursos_fundador)
        .replace("{estilo_vida_deseado}", &profile.estilo_vida_deseado)
}
