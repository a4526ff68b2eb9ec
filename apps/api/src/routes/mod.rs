pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::analysis::handlers;
use crate::config::Config;
use crate::state::AppState;

pub const ANALYZE_PATH: &str = "/analizar-idea";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(ANALYZE_PATH, post(handlers::handle_analyze))
        .with_state(state)
}

/// CORS policy for the front end. `*` in ALLOWED_ORIGINS opens it to any origin.
pub fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let origins = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        let values = config
            .allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).with_context(|| format!("Invalid origin in ALLOWED_ORIGINS: '{o}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}
