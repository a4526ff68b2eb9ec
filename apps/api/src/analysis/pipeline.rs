//! Analysis pipeline — orchestrates one request end to end.
//!
//! Flow: Received → Validated → Synthesized → Rendered → Delivered → Responded.
//! Validation failures exit early; synthesis and delivery failures go to the
//! terminal Failed state. There is no retry edge at this level.

use std::fmt;

use tracing::{info, warn};

use crate::analysis::models::{AnalysisResult, FounderProfile};
use crate::analysis::render::render_report;
use crate::errors::AppError;
use crate::state::AppState;

/// Where a request is in the pipeline. Used for structured log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    Synthesized,
    Rendered,
    Delivered,
    Responded,
    ValidationFailed,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::Synthesized => "synthesized",
            Stage::Rendered => "rendered",
            Stage::Delivered => "delivered",
            Stage::Responded => "responded",
            Stage::ValidationFailed => "validation_failed",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Everything the handler needs to build the success envelope.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub caller_id: String,
    pub analysis: AnalysisResult,
    pub html: String,
}

/// Runs synthesize → render → deliver for a validated profile.
pub async fn run_pipeline(
    state: &AppState,
    profile: FounderProfile,
) -> Result<PipelineOutcome, AppError> {
    let caller_id = profile.wp_user_id.clone();
    info!(stage = %Stage::Validated, user = %caller_id, "Founder profile accepted");

    let analysis = state
        .synthesizer
        .synthesize(&profile)
        .await
        .map_err(|e| fail(&caller_id, Stage::Synthesized, e))?;
    info!(stage = %Stage::Synthesized, user = %caller_id, ideas = analysis.ideas.len());

    let html = render_report(&analysis, Some(&profile));
    info!(stage = %Stage::Rendered, user = %caller_id, bytes = html.len());

    state
        .publisher
        .publish(&caller_id, &html)
        .await
        .map_err(|e| fail(&caller_id, Stage::Delivered, e.into()))?;
    info!(stage = %Stage::Delivered, user = %caller_id, "Report saved to WordPress");

    Ok(PipelineOutcome {
        caller_id,
        analysis,
        html,
    })
}

fn fail(caller_id: &str, during: Stage, err: AppError) -> AppError {
    warn!(stage = %Stage::Failed, during = %during, user = %caller_id, "Pipeline aborted: {err}");
    err
}
