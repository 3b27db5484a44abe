//! Feature modules implementing the Folio API
//!
//! Each feature is a vertical slice with its own commands and routes.
//!
//! # Features
//!
//! - **import**: one-shot gallery and video imports into the content store

pub mod import;

use axum::Router;
use folio_import::{source::RecordSource, Importer};
use std::sync::Arc;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Import driver bound to the content store
    pub importer: Arc<Importer>,
    /// Records for `POST /import/gallery`
    pub gallery_source: Arc<dyn RecordSource>,
    /// Records for `POST /import/videos`
    pub video_source: Arc<dyn RecordSource>,
}

/// Creates the API router with all feature routes mounted
///
/// - `/import` - gallery and video imports
pub fn router(state: FeatureState) -> Router<()> {
    Router::new().nest("/import", import::import_routes().with_state(state))
}
