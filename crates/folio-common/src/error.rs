//! Error types for Folio

use thiserror::Error;

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Errors that abort a whole operation rather than a single record
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl FolioError {
    /// Short machine-friendly label, used in error response bodies
    pub fn kind(&self) -> &'static str {
        match self {
            FolioError::Io(_) => "io",
            FolioError::Serialization(_) => "serialization",
            FolioError::Config(_) => "config",
            FolioError::Dataset(_) => "dataset",
            FolioError::HttpClient(_) => "http_client",
        }
    }
}
