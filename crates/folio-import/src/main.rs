//! Folio Import - run a content import from the command line

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_common::logging::{init_logging, LogConfig, LogLevel};
use folio_import::{
    config::ImportConfig,
    source::{dataset_source, Dataset, RecordSource},
    store::{ContentStore, MemoryStore, RestStore},
    ImportResult, Importer, RunMode,
};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "folio-import")]
#[command(author, version, about = "Folio content import tool")]
struct Cli {
    #[command(subcommand)]
    dataset: DatasetCommand,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Probe and parse without writing to the store
    #[arg(long, global = true)]
    dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum DatasetCommand {
    /// Import gallery artworks (first records only unless --full)
    Gallery {
        /// Process every record instead of the test-mode prefix
        #[arg(long)]
        full: bool,

        /// Read records from this file instead of the built-in dataset
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },

    /// Import lesson videos
    Videos {
        /// Read records from this file instead of the built-in dataset
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over the flag
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("folio-import")
        .build()
        .merge_env()?;
    let _log_guard = init_logging(&log_config)?;

    let config = ImportConfig::from_env();
    let store: Arc<dyn ContentStore> = if cli.dry_run {
        config.validate_settings()?;
        info!("Dry run: rows are kept in memory");
        Arc::new(MemoryStore::new())
    } else {
        config.validate()?;
        Arc::new(RestStore::new(&config.store.url, &config.store.service_key)?)
    };
    let importer = Importer::with_store(&config, store)?;

    let result = match cli.dataset {
        DatasetCommand::Gallery { full, dataset } => {
            let source = override_or(dataset, Dataset::Gallery, config.gallery_source());
            let mode = RunMode::from_test_flag(!full);
            importer.run_gallery(source.as_ref(), mode).await?
        },
        DatasetCommand::Videos { dataset } => {
            let source = override_or(dataset, Dataset::Videos, config.video_source());
            importer.run_videos(source.as_ref()).await?
        },
    };

    report(&result)
}

fn override_or(
    path: Option<PathBuf>,
    dataset: Dataset,
    configured: Box<dyn RecordSource>,
) -> Box<dyn RecordSource> {
    match path {
        Some(path) => dataset_source(dataset, Some(&path)),
        None => configured,
    }
}

fn report(result: &ImportResult) -> Result<()> {
    if result.is_clean() {
        info!(total = result.total, "Import complete");
    } else {
        warn!(
            total = result.total,
            successful = result.successful,
            failed = result.failed,
            "Import complete with failed records"
        );
    }
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
