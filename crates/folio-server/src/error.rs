//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors that end a request without an import summary
///
/// Per-record failures never reach this type; they are part of the 200
/// summary. Only a run that cannot start is reported here.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Import failed: {0}")]
    Import(#[from] folio_common::FolioError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (error, details) = match self {
            AppError::Import(ref e) => {
                tracing::error!(kind = e.kind(), "Import failed: {}", e);
                ("Import failed", e.to_string())
            },
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": error, "details": details })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::FolioError;

    #[tokio::test]
    async fn test_import_error_renders_error_and_details() {
        let response =
            AppError::from(FolioError::Dataset("cannot read gallery.csv".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Import failed");
        assert_eq!(json["details"], "Dataset error: cannot read gallery.csv");
    }

    #[tokio::test]
    async fn test_config_error_is_also_a_server_error() {
        let response = AppError::from(FolioError::Config("FOLIO_STORE_URL must be set".to_string()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
