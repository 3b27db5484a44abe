pub mod gallery;
pub mod videos;

use folio_import::ImportResult;
use serde::{Deserialize, Serialize};

/// Body of a completed import, including runs where records failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub message: String,
    pub results: ImportResult,
}
