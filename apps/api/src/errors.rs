use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::models::AnalysisResult;
use crate::delivery::DeliveryError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant is terminal for the request; nothing here is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Timeout: {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },
}

impl From<DeliveryError> for AppError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::NotConfigured(var) => AppError::Configuration(format!(
                "Falta la variable de entorno {var}; no se puede enviar el resultado a WordPress"
            )),
            DeliveryError::Timeout { timeout_ms } => AppError::Timeout {
                operation: "webhook delivery".to_string(),
                timeout_ms,
            },
            other => AppError::Delivery(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Synthesis(msg) => {
                tracing::error!("Synthesis error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SYNTHESIS_ERROR",
                    format!("Error en análisis de IA: {msg}"),
                )
            }
            AppError::Configuration(msg) => {
                // Operator mistake, not a transient fault.
                tracing::error!(kind = "configuration", "Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "El servidor no está configurado correctamente".to_string(),
                )
            }
            AppError::Delivery(msg) => {
                tracing::error!("Delivery error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DELIVERY_ERROR",
                    "Fallo al guardar el resultado en WordPress".to_string(),
                )
            }
            AppError::Timeout {
                operation,
                timeout_ms,
            } => {
                tracing::error!("{operation} timed out after {timeout_ms}ms");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "TIMEOUT",
                    format!("{operation} timed out after {timeout_ms}ms"),
                )
            }
        };

        let mut body = json!({
            "status": "error",
            "error": {
                "code": code,
                "message": message
            }
        });
        if let AppError::Synthesis(msg) = &self {
            body["ideas"] = json!([]);
            body["analisis"] = json!(AnalysisResult::failed(msg.clone()));
        }

        (status, Json(body)).into_response()
    }
}
