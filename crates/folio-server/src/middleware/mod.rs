//! Middleware for the Folio server
//!
//! - CORS, answering preflight requests for the import endpoints
//! - Request logging with tracing

use axum::http::{header, HeaderName, Method};
use std::time::Duration;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::config::CorsConfig;

/// Create CORS layer from configuration
///
/// Allowed request headers match what the web client sends to the store:
/// `authorization`, `x-client-info`, `apikey` and `content-type`.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
        .max_age(Duration::from_secs(3600));

    if config.allows_any_origin() {
        // tower-http refuses credentials together with a wildcard origin
        return cors.allow_origin(Any);
    }

    let origins: Vec<_> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    cors.allow_origin(origins)
        .allow_credentials(config.allow_credentials)
}

/// Create tracing/logging layer
pub fn tracing_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::post, Router};
    use tower::ServiceExt;

    async fn preflight(config: &CorsConfig) -> axum::http::HeaderMap {
        let app = Router::new()
            .route("/import/gallery", post(|| async { "ok" }))
            .layer(cors_layer(config));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/import/gallery")
                    .header(header::ORIGIN, "https://folio.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "apikey, x-client-info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response.headers().clone()
    }

    #[tokio::test]
    async fn test_cors_layer_with_wildcard() {
        let headers = preflight(&CorsConfig::default()).await;

        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
        assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "3600");
    }

    #[tokio::test]
    async fn test_cors_layer_with_specific_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["https://folio.example".to_string()],
            allow_credentials: true,
        };

        let headers = preflight(&config).await;

        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://folio.example"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
    }

    #[tokio::test]
    async fn test_cors_layer_with_empty_origins_drops_credentials() {
        let config = CorsConfig {
            allowed_origins: vec![],
            allow_credentials: true,
        };

        let headers = preflight(&config).await;

        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }
}
