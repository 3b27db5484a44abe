//! Where import records come from
//!
//! The built-in datasets are compiled into the binary. Operators can point a
//! run at a file instead, and tests hand records over directly.

use async_trait::async_trait;
use folio_common::{FolioError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::parser::{split_records, RawRecord};

/// A named, ordered sequence of raw records
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Label used in logs and error messages
    fn name(&self) -> String;

    async fn load(&self) -> Result<Vec<RawRecord>>;
}

/// The two built-in datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Gallery,
    Videos,
}

impl Dataset {
    fn document(self) -> &'static str {
        match self {
            Dataset::Gallery => include_str!("../data/gallery.csv"),
            Dataset::Videos => include_str!("../data/videos.csv"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dataset::Gallery => "gallery",
            Dataset::Videos => "videos",
        }
    }
}

/// Dataset shipped inside the binary
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    dataset: Dataset,
}

impl EmbeddedSource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

#[async_trait]
impl RecordSource for EmbeddedSource {
    fn name(&self) -> String {
        format!("embedded:{}", self.dataset.as_str())
    }

    async fn load(&self) -> Result<Vec<RawRecord>> {
        Ok(split_records(self.dataset.document()))
    }
}

/// Dataset read from disk at run time
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for FileSource {
    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn load(&self) -> Result<Vec<RawRecord>> {
        let document = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            FolioError::Dataset(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        let records = split_records(&document);
        if records.is_empty() {
            return Err(FolioError::Dataset(format!(
                "{} contains no records",
                self.path.display()
            )));
        }

        debug!(path = %self.path.display(), records = records.len(), "Dataset file loaded");
        Ok(records)
    }
}

/// Records supplied up front
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<RawRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    fn name(&self) -> String {
        format!("static:{}", self.records.len())
    }

    async fn load(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}

/// Pick the file override when one is configured, else the built-in dataset
pub fn dataset_source(dataset: Dataset, path: Option<&Path>) -> Box<dyn RecordSource> {
    match path {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(EmbeddedSource::new(dataset)),
    }
}
