//! Axum route handlers for the analysis endpoint.

use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::{HeaderMap, Method},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::models::{AnalysisResult, FounderProfile};
use crate::analysis::pipeline::{run_pipeline, Stage};
use crate::errors::AppError;
use crate::state::AppState;

pub const SUCCESS_STATUS: &str = "exito";
pub const SUCCESS_MESSAGE: &str = "Análisis completado y guardado en WordPress.";

const REDACTED_HEADERS: &[&str] = &["authorization", "x-api-key", "cookie"];

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub mensaje: &'static str,
    pub usuario_id_confirmado: String,
    pub analisis: AnalysisResult,
    pub html_result: String,
    pub timestamp: DateTime<Utc>,
}

/// POST /analizar-idea
///
/// Validates the founder profile, then runs synthesize → render → deliver.
/// The caller id is checked before any outbound call is made.
pub async fn handle_analyze(
    State(state): State<AppState>,
    remote: Option<ConnectInfo<SocketAddr>>,
    method: Method,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let remote = remote
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    info!(
        stage = %Stage::Received,
        %request_id,
        %method,
        %remote,
        headers = ?loggable_headers(&headers),
        "New analysis request"
    );

    let profile = payload
        .map_err(|rejection| {
            AppError::Validation(format!("No se recibieron datos válidos: {}", rejection.body_text()))
        })
        .and_then(|Json(value)| FounderProfile::from_payload(&value))
        .map_err(|e| {
            warn!(stage = %Stage::ValidationFailed, %request_id, "{e}");
            e
        })?;

    let outcome = run_pipeline(&state, profile).await?;
    info!(stage = %Stage::Responded, %request_id, user = %outcome.caller_id);

    Ok(Json(AnalyzeResponse {
        status: SUCCESS_STATUS,
        mensaje: SUCCESS_MESSAGE,
        usuario_id_confirmado: outcome.caller_id,
        analisis: outcome.analysis,
        html_result: outcome.html,
        timestamp: Utc::now(),
    }))
}

fn loggable_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if REDACTED_HEADERS.contains(&name.as_str()) {
                "[redacted]".to_string()
            } else {
                value.to_str().unwrap_or("[non-ascii]").to_string()
            };
            (name.as_str().to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_credentials_are_redacted_in_logs() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("secret"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let logged = loggable_headers(&headers);
        assert!(logged.contains(&("x-api-key".to_string(), "[redacted]".to_string())));
        assert!(logged.contains(&("content-type".to_string(), "application/json".to_string())));
    }
}
