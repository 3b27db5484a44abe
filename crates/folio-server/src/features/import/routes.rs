//! Import routes
//!
//! Both endpoints run one import to completion and answer with a single
//! summary. Per-record failures are part of a 200 response; only a run that
//! cannot start (dataset unavailable) answers 500.

use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use super::commands::{self, gallery::ImportGalleryCommand, videos::ImportVideosCommand, ImportResponse};
use crate::error::AppError;
use crate::features::FeatureState;

/// Create import routes
pub fn import_routes() -> Router<FeatureState> {
    Router::new()
        .route("/gallery", post(import_gallery))
        .route("/videos", post(import_videos))
}

/// Import gallery artworks
///
/// POST /import/gallery  {"testMode": false}
async fn import_gallery(
    State(state): State<FeatureState>,
    body: Bytes,
) -> Result<Json<ImportResponse>, AppError> {
    let command = ImportGalleryCommand::from_body(&body);
    let response = commands::gallery::handle(&state, command).await?;
    Ok(Json(response))
}

/// Import lesson videos
///
/// POST /import/videos
async fn import_videos(State(state): State<FeatureState>) -> Result<Json<ImportResponse>, AppError> {
    let response = commands::videos::handle(&state, ImportVideosCommand).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_routes_exist() {
        let _router = import_routes();
    }
}
