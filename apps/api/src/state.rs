use std::sync::Arc;

use crate::analysis::synthesizer::IdeaSynthesizer;
use crate::config::Config;
use crate::delivery::ReportPublisher;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; nothing here is shared mutably between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Pluggable idea synthesizer. Default: LlmIdeaSynthesizer.
    pub synthesizer: Arc<dyn IdeaSynthesizer>,
    /// Pluggable report destination. Default: WebhookPublisher.
    pub publisher: Arc<dyn ReportPublisher>,
}
