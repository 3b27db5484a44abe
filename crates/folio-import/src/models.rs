//! Import run types and the rows written to the content store

use serde::{Deserialize, Serialize};

use crate::importer::RecordError;
use crate::parser::{GalleryEntry, VideoEntry};

/// Default artist attached to every imported row
pub const DEFAULT_ARTIST_NAME: &str = "Studio Folio";

/// Records processed by a test-mode run unless configured otherwise
pub const DEFAULT_TEST_MODE_LIMIT: usize = 2;

/// How much of a dataset a run processes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Only a short prefix, to smoke-test the pipeline
    #[default]
    Test,
    /// Every record
    Full,
}

impl RunMode {
    pub fn from_test_flag(test_mode: bool) -> Self {
        if test_mode {
            RunMode::Test
        } else {
            RunMode::Full
        }
    }

    /// Number of leading records to process out of `available`
    pub fn record_limit(self, available: usize, test_mode_limit: usize) -> usize {
        match self {
            RunMode::Test => available.min(test_mode_limit),
            RunMode::Full => available,
        }
    }
}

/// Constant fields stamped onto every imported row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDefaults {
    pub artist: String,
    pub is_published: bool,
    pub is_featured: bool,
}

impl Default for EntityDefaults {
    fn default() -> Self {
        Self {
            artist: DEFAULT_ARTIST_NAME.to_string(),
            is_published: true,
            is_featured: false,
        }
    }
}

/// Row inserted into the `artworks` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArtwork {
    pub title: String,
    pub year: Option<i32>,
    pub image_url: String,
    pub artist: String,
    pub is_published: bool,
    pub is_featured: bool,
}

impl NewArtwork {
    pub fn from_entry(entry: &GalleryEntry, image_url: &str, defaults: &EntityDefaults) -> Self {
        Self {
            title: entry.title.clone(),
            year: entry.year(),
            image_url: image_url.to_string(),
            artist: defaults.artist.clone(),
            is_published: defaults.is_published,
            is_featured: defaults.is_featured,
        }
    }
}

/// Row inserted into the `videos` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVideo {
    pub title: String,
    pub video_url: String,
    pub artist: String,
    pub is_published: bool,
}

impl NewVideo {
    pub fn from_entry(entry: &VideoEntry, defaults: &EntityDefaults) -> Self {
        Self {
            title: entry.title.clone(),
            video_url: entry.video_url.clone(),
            artist: defaults.artist.clone(),
            is_published: defaults.is_published,
        }
    }
}

/// Summary of one import run
///
/// `successful + failed == total` and there is one error string per failed
/// record, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl ImportResult {
    pub(crate) fn record_success(&mut self) {
        self.total += 1;
        self.successful += 1;
    }

    pub(crate) fn record_failure(&mut self, error: &RecordError) {
        self.total += 1;
        self.failed += 1;
        self.errors.push(error.to_string());
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_limit() {
        assert_eq!(RunMode::Test.record_limit(12, 2), 2);
        assert_eq!(RunMode::Test.record_limit(1, 2), 1);
        assert_eq!(RunMode::Full.record_limit(12, 2), 12);
        assert_eq!(RunMode::from_test_flag(false), RunMode::Full);
    }

    #[test]
    fn test_artwork_from_entry_maps_unspecified_year_to_null() {
        let entry = GalleryEntry {
            thumbnail_url: "t.jpg".to_string(),
            title: "Falcon".to_string(),
            year_label: "undated".to_string(),
            image_url: "f.jpg".to_string(),
        };
        let artwork = NewArtwork::from_entry(&entry, "t.jpg", &EntityDefaults::default());

        assert_eq!(artwork.year, None);
        assert_eq!(artwork.image_url, "t.jpg");
        assert_eq!(artwork.artist, DEFAULT_ARTIST_NAME);

        let json = serde_json::to_value(&artwork).unwrap();
        assert!(json["year"].is_null());
        assert_eq!(json["is_published"], true);
    }

    #[test]
    fn test_result_serializes_with_counters() {
        let result = ImportResult {
            total: 2,
            successful: 1,
            failed: 1,
            errors: vec!["B: Video URL is invalid".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["total"], 2);
        assert_eq!(json["successful"], 1);
        assert_eq!(json["errors"][0], "B: Video URL is invalid");
        assert!(!result.is_clean());
    }
}
