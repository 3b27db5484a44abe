//! Application router

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use crate::config::CorsConfig;
use crate::features::{self, FeatureState};
use crate::middleware;

/// Build the full router: health check, feature routes under `/api/v1`, middleware stack
pub fn create_router(state: FeatureState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", features::router(state))
        // Apply layers from innermost to outermost
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(cors))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
