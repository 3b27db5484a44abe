//! Folio Server Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! HTTP front for the Folio content importer.
//!
//! # Endpoints
//!
//! - `POST /api/v1/import/gallery`: gallery import, test mode unless `{"testMode": false}`
//! - `POST /api/v1/import/videos`: full video import
//! - `GET /health`: liveness of the server itself
//!
//! Every route answers CORS preflight requests.
//!
//! # Example
//!
//! ```no_run
//! use folio_server::{api, config::Config, features::FeatureState};
//! use folio_import::Importer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let state = FeatureState {
//!         importer: Arc::new(Importer::from_config(&config.import)?),
//!         gallery_source: Arc::from(config.import.gallery_source()),
//!         video_source: Arc::from(config.import.video_source()),
//!     };
//!     let app = api::create_router(state, &config.cors);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;

// Re-export commonly used types
pub use error::AppError;
