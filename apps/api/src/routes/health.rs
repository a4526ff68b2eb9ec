use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub const LIVENESS_TEXT: &str = "El Cerebro IA está online.";

/// GET /
/// Plain-text liveness check.
pub async fn root_handler() -> &'static str {
    LIVENESS_TEXT
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "idea-relay",
        "webhook_configured": state.config.webhook_url.is_some() && state.config.webhook_api_key.is_some()
    }))
}
