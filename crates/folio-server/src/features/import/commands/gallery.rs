use folio_import::RunMode;
use serde::Deserialize;

use super::ImportResponse;
use crate::error::AppError;
use crate::features::FeatureState;

/// Optional JSON body of `POST /import/gallery`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImportRequest {
    #[serde(default)]
    pub test_mode: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportGalleryCommand {
    pub mode: RunMode,
}

impl ImportGalleryCommand {
    /// Build from a raw request body; absent or unreadable bodies mean test mode
    pub fn from_body(body: &[u8]) -> Self {
        let test_mode = serde_json::from_slice::<GalleryImportRequest>(body)
            .ok()
            .and_then(|request| request.test_mode)
            .unwrap_or(true);

        Self {
            mode: RunMode::from_test_flag(test_mode),
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn handle(
    state: &FeatureState,
    command: ImportGalleryCommand,
) -> Result<ImportResponse, AppError> {
    let results = state
        .importer
        .run_gallery(state.gallery_source.as_ref(), command.mode)
        .await?;

    let message = match command.mode {
        RunMode::Test => format!(
            "Gallery import completed in test mode ({} records processed)",
            results.total
        ),
        RunMode::Full => "Gallery import completed".to_string(),
    };

    Ok(ImportResponse { message, results })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_body_means_test_mode() {
        assert_eq!(ImportGalleryCommand::from_body(b"").mode, RunMode::Test);
    }

    #[test]
    fn test_unparseable_body_means_test_mode() {
        assert_eq!(ImportGalleryCommand::from_body(b"{testMode:").mode, RunMode::Test);
        assert_eq!(ImportGalleryCommand::from_body(b"[1,2]").mode, RunMode::Test);
    }

    #[test]
    fn test_explicit_flag_is_respected() {
        let full = ImportGalleryCommand::from_body(br#"{"testMode": false}"#);
        assert_eq!(full.mode, RunMode::Full);

        let test = ImportGalleryCommand::from_body(br#"{"testMode": true}"#);
        assert_eq!(test.mode, RunMode::Test);

        let unset = ImportGalleryCommand::from_body(br#"{}"#);
        assert_eq!(unset.mode, RunMode::Test);
    }
}
