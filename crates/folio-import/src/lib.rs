//! Folio Import Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Bulk import of gallery artworks and lesson videos into the hosted content
//! store.
//!
//! # Pipeline
//!
//! - **Parsing**: delimited records with quote-aware splitting ([`parser`])
//! - **Liveness**: `HEAD` probes of every media URL ([`liveness`])
//! - **Persistence**: typed inserts through a [`store::ContentStore`]
//! - **Driver**: sequential per-record processing into an
//!   [`models::ImportResult`] ([`importer`])
//!
//! # Example
//!
//! ```no_run
//! use folio_import::{config::ImportConfig, importer::Importer, models::RunMode};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ImportConfig::from_env();
//!     config.validate()?;
//!
//!     let importer = Importer::from_config(&config)?;
//!     let result = importer
//!         .run_gallery(config.gallery_source().as_ref(), RunMode::Test)
//!         .await?;
//!     println!("{} of {} imported", result.successful, result.total);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod importer;
pub mod liveness;
pub mod models;
pub mod parser;
pub mod source;
pub mod store;

pub use importer::{Importer, RecordError};
pub use models::{ImportResult, RunMode};
