//! Content store clients
//!
//! The hosted store exposes each table over REST at
//! `{base_url}/rest/v1/{table}`. Inserts authenticate with the privileged
//! service key, sent both as `apikey` and as a bearer token.

use async_trait::async_trait;
use folio_common::{FolioError, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::debug;

use crate::models::{NewArtwork, NewVideo};

/// Table receiving gallery rows
pub const ARTWORKS_TABLE: &str = "artworks";

/// Table receiving video rows
pub const VIDEOS_TABLE: &str = "videos";

/// Why the store did not accept an insert
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store rejected insert ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Insert interface over the persisted entities
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn insert_artwork(&self, artwork: &NewArtwork) -> std::result::Result<(), StoreError>;

    async fn insert_video(&self, video: &NewVideo) -> std::result::Result<(), StoreError>;
}

/// REST client for the hosted store
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url)
            .field("service_key", &"<redacted>")
            .finish()
    }
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("folio-import/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FolioError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn insert<T>(&self, table: &str, row: &T) -> std::result::Result<(), StoreError>
    where
        T: Serialize + Sync,
    {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(table, %status, "Row inserted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message: rejection_message(status, &body),
        })
    }
}

/// Prefer the store's own `message`, then the raw body, then the status reason
fn rejection_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .or_else(|| {
            let body = body.trim();
            (!body.is_empty()).then(|| body.to_string())
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}

#[async_trait]
impl ContentStore for RestStore {
    async fn insert_artwork(&self, artwork: &NewArtwork) -> std::result::Result<(), StoreError> {
        self.insert(ARTWORKS_TABLE, artwork).await
    }

    async fn insert_video(&self, video: &NewVideo) -> std::result::Result<(), StoreError> {
        self.insert(VIDEOS_TABLE, video).await
    }
}

/// Keeps inserted rows in memory; backs dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    artworks: Mutex<Vec<NewArtwork>>,
    videos: Mutex<Vec<NewVideo>>,
}

fn lock<T>(rows: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artworks(&self) -> Vec<NewArtwork> {
        lock(&self.artworks).clone()
    }

    pub fn videos(&self) -> Vec<NewVideo> {
        lock(&self.videos).clone()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn insert_artwork(&self, artwork: &NewArtwork) -> std::result::Result<(), StoreError> {
        lock(&self.artworks).push(artwork.clone());
        Ok(())
    }

    async fn insert_video(&self, video: &NewVideo) -> std::result::Result<(), StoreError> {
        lock(&self.videos).push(video.clone());
        Ok(())
    }
}
