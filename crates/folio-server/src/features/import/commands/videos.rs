use super::ImportResponse;
use crate::error::AppError;
use crate::features::FeatureState;

/// Video imports take no options and always process the whole dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportVideosCommand;

#[tracing::instrument(skip(state))]
pub async fn handle(
    state: &FeatureState,
    _command: ImportVideosCommand,
) -> Result<ImportResponse, AppError> {
    let results = state.importer.run_videos(state.video_source.as_ref()).await?;

    Ok(ImportResponse {
        message: "Video import completed".to_string(),
        results,
    })
}
