//! Import configuration
//!
//! Read from the environment once at startup. Store credentials are required:
//! a missing URL or key stops the process before any request is served.

use folio_common::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::liveness::DEFAULT_PROBE_TIMEOUT_SECS;
use crate::models::{EntityDefaults, DEFAULT_ARTIST_NAME, DEFAULT_TEST_MODE_LIMIT};
use crate::source::{dataset_source, Dataset, RecordSource};

/// Hosted store location and credential
#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    #[serde(skip_serializing, default)]
    pub service_key: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("service_key", &"<redacted>")
            .finish()
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(FolioError::Config("FOLIO_STORE_URL must be set".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FolioError::Config(format!(
                "FOLIO_STORE_URL must be an http(s) URL, got '{url}'"
            )));
        }
        if self.service_key.trim().is_empty() {
            return Err(FolioError::Config(
                "FOLIO_STORE_SERVICE_KEY must be set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything an import run needs besides its records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub store: StoreConfig,
    pub probe_timeout_secs: u64,
    pub test_mode_limit: usize,
    pub defaults: EntityDefaults,
    pub gallery_dataset: Option<PathBuf>,
    pub video_dataset: Option<PathBuf>,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

impl ImportConfig {
    /// Read settings from `FOLIO_*` variables
    ///
    /// Does not validate; call [`ImportConfig::validate`] (or
    /// [`ImportConfig::validate_settings`] for runs that never reach the store).
    pub fn from_env() -> Self {
        Self {
            store: StoreConfig {
                url: std::env::var("FOLIO_STORE_URL").unwrap_or_default(),
                service_key: std::env::var("FOLIO_STORE_SERVICE_KEY").unwrap_or_default(),
            },
            probe_timeout_secs: env_parse("FOLIO_PROBE_TIMEOUT_SECS", DEFAULT_PROBE_TIMEOUT_SECS),
            test_mode_limit: env_parse("FOLIO_TEST_MODE_LIMIT", DEFAULT_TEST_MODE_LIMIT),
            defaults: EntityDefaults {
                artist: std::env::var("FOLIO_ARTIST_NAME")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_ARTIST_NAME.to_string()),
                is_published: env_parse("FOLIO_PUBLISH_IMPORTED", true),
                is_featured: false,
            },
            gallery_dataset: env_path("FOLIO_GALLERY_DATASET"),
            video_dataset: env_path("FOLIO_VIDEO_DATASET"),
        }
    }

    /// Validate everything, store credentials included
    pub fn validate(&self) -> Result<()> {
        self.validate_settings()?;
        self.store.validate()
    }

    /// Validate the settings that do not involve the store
    pub fn validate_settings(&self) -> Result<()> {
        if self.probe_timeout_secs == 0 {
            return Err(FolioError::Config(
                "FOLIO_PROBE_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }
        if self.test_mode_limit == 0 {
            return Err(FolioError::Config(
                "FOLIO_TEST_MODE_LIMIT must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn gallery_source(&self) -> Box<dyn RecordSource> {
        dataset_source(Dataset::Gallery, self.gallery_dataset.as_deref())
    }

    pub fn video_source(&self) -> Box<dyn RecordSource> {
        dataset_source(Dataset::Videos, self.video_dataset.as_deref())
    }
}
