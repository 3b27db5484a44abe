//! Import driver
//!
//! Records are handled one at a time, in dataset order, so the error list
//! lines up with the input. A bad record is counted and reported; it never
//! stops the run. Only loading the dataset can fail a run as a whole.

use folio_common::Result;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::ImportConfig;
use crate::liveness::UrlChecker;
use crate::models::{EntityDefaults, ImportResult, NewArtwork, NewVideo, RunMode};
use crate::parser::{GalleryEntry, ParseError, RawRecord, VideoEntry};
use crate::source::RecordSource;
use crate::store::{ContentStore, RestStore, StoreError};

/// Why a single record was not imported
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Row {row}: {source}")]
    Parse { row: usize, source: ParseError },

    #[error("{title}: Both thumbnail and full image URLs are unreachable")]
    ImagesUnreachable { title: String },

    #[error("{title}: Video URL is invalid")]
    VideoUnreachable { title: String },

    #[error("{title}: Failed to insert: {source}")]
    Persistence { title: String, source: StoreError },
}

/// Pick the URL to store: the full image when it answers, else the thumbnail
pub fn choose_image_url(entry: &GalleryEntry, thumbnail_ok: bool, full_ok: bool) -> Option<&str> {
    if full_ok {
        Some(&entry.image_url)
    } else if thumbnail_ok {
        Some(&entry.thumbnail_url)
    } else {
        None
    }
}

/// Runs gallery and video imports against a content store
pub struct Importer {
    checker: UrlChecker,
    store: Arc<dyn ContentStore>,
    defaults: EntityDefaults,
    test_mode_limit: usize,
}

impl std::fmt::Debug for Importer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Importer")
            .field("checker", &self.checker)
            .field("defaults", &self.defaults)
            .field("test_mode_limit", &self.test_mode_limit)
            .finish_non_exhaustive()
    }
}

impl Importer {
    pub fn new(
        checker: UrlChecker,
        store: Arc<dyn ContentStore>,
        defaults: EntityDefaults,
        test_mode_limit: usize,
    ) -> Self {
        Self {
            checker,
            store,
            defaults,
            test_mode_limit,
        }
    }

    /// Importer writing to the configured REST store
    pub fn from_config(config: &ImportConfig) -> Result<Self> {
        let store = RestStore::new(&config.store.url, &config.store.service_key)?;
        Self::with_store(config, Arc::new(store))
    }

    /// Importer using the configured probe and defaults with any store
    pub fn with_store(config: &ImportConfig, store: Arc<dyn ContentStore>) -> Result<Self> {
        let checker = UrlChecker::new(config.probe_timeout())?;
        Ok(Self::new(
            checker,
            store,
            config.defaults.clone(),
            config.test_mode_limit,
        ))
    }

    /// Load `source` and import it as gallery records
    pub async fn run_gallery(&self, source: &dyn RecordSource, mode: RunMode) -> Result<ImportResult> {
        let records = source.load().await?;
        info!(source = %source.name(), records = records.len(), ?mode, "Starting gallery import");
        Ok(self.import_gallery(&records, mode).await)
    }

    /// Load `source` and import it as video records
    pub async fn run_videos(&self, source: &dyn RecordSource) -> Result<ImportResult> {
        let records = source.load().await?;
        info!(source = %source.name(), records = records.len(), "Starting video import");
        Ok(self.import_videos(&records).await)
    }

    #[instrument(skip(self, records), fields(available = records.len()))]
    pub async fn import_gallery(&self, records: &[RawRecord], mode: RunMode) -> ImportResult {
        let limit = mode.record_limit(records.len(), self.test_mode_limit);
        let mut result = ImportResult::default();

        for record in records.iter().take(limit) {
            match self.import_artwork(record).await {
                Ok(()) => result.record_success(),
                Err(err) => {
                    warn!(row = record.index(), error = %err, "Gallery record not imported");
                    result.record_failure(&err);
                },
            }
        }

        info!(
            total = result.total,
            successful = result.successful,
            failed = result.failed,
            "Gallery import finished"
        );
        result
    }

    #[instrument(skip(self, records), fields(available = records.len()))]
    pub async fn import_videos(&self, records: &[RawRecord]) -> ImportResult {
        let mut result = ImportResult::default();

        for record in records {
            match self.import_video(record).await {
                Ok(()) => result.record_success(),
                Err(err) => {
                    warn!(row = record.index(), error = %err, "Video record not imported");
                    result.record_failure(&err);
                },
            }
        }

        info!(
            total = result.total,
            successful = result.successful,
            failed = result.failed,
            "Video import finished"
        );
        result
    }

    async fn import_artwork(&self, record: &RawRecord) -> std::result::Result<(), RecordError> {
        let entry = GalleryEntry::parse(record).map_err(|source| RecordError::Parse {
            row: record.index(),
            source,
        })?;

        let (thumbnail_ok, full_ok) = self
            .checker
            .check_pair(&entry.thumbnail_url, &entry.image_url)
            .await;

        let image_url = choose_image_url(&entry, thumbnail_ok, full_ok).ok_or_else(|| {
            RecordError::ImagesUnreachable {
                title: entry.title.clone(),
            }
        })?;

        let artwork = NewArtwork::from_entry(&entry, image_url, &self.defaults);
        self.store
            .insert_artwork(&artwork)
            .await
            .map_err(|source| RecordError::Persistence {
                title: entry.title.clone(),
                source,
            })
    }

    async fn import_video(&self, record: &RawRecord) -> std::result::Result<(), RecordError> {
        let entry = VideoEntry::parse(record).map_err(|source| RecordError::Parse {
            row: record.index(),
            source,
        })?;

        if !self.checker.is_reachable(&entry.video_url).await {
            return Err(RecordError::VideoUnreachable { title: entry.title });
        }

        let video = NewVideo::from_entry(&entry, &self.defaults);
        self.store
            .insert_video(&video)
            .await
            .map_err(|source| RecordError::Persistence {
                title: entry.title,
                source,
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn entry() -> GalleryEntry {
        GalleryEntry {
            thumbnail_url: "thumb.jpg".to_string(),
            title: "Souq Morning".to_string(),
            year_label: "2017".to_string(),
            image_url: "full.jpg".to_string(),
        }
    }

    #[test]
    fn test_choose_image_url_prefers_full_image() {
        let entry = entry();
        assert_eq!(choose_image_url(&entry, true, true), Some("full.jpg"));
        assert_eq!(choose_image_url(&entry, false, true), Some("full.jpg"));
        assert_eq!(choose_image_url(&entry, true, false), Some("thumb.jpg"));
        assert_eq!(choose_image_url(&entry, false, false), None);
    }

    #[test]
    fn test_record_error_messages() {
        let err = RecordError::VideoUnreachable {
            title: "B".to_string(),
        };
        assert_eq!(err.to_string(), "B: Video URL is invalid");

        let err = RecordError::Parse {
            row: 4,
            source: ParseError::TooFewFields { expected: 4, found: 2 },
        };
        assert_eq!(err.to_string(), "Row 4: expected at least 4 fields, found 2");

        let err = RecordError::Persistence {
            title: "Souq Morning".to_string(),
            source: StoreError::Rejected {
                status: 409,
                message: "duplicate key value".to_string(),
            },
        };
        assert!(err.to_string().contains("duplicate key value"));
    }
}
