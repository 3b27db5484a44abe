//! Folio Server - Main entry point

use anyhow::Result;
use folio_common::logging::{init_logging, LogConfig};
use folio_import::Importer;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing::info;

use folio_server::{api, config::Config, features::FeatureState};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("folio-server")
        .filter_directives("folio_server=debug,folio_import=debug,tower_http=debug")
        .build()
        .merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    info!("Starting Folio Server");

    // Fails fast when the store URL or service key is missing
    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let importer = Importer::from_config(&config.import)?;
    let gallery_source = config.import.gallery_source();
    let video_source = config.import.video_source();
    info!(
        gallery = %gallery_source.name(),
        videos = %video_source.name(),
        store = %config.import.store.url,
        "Importer ready"
    );

    let state = FeatureState {
        importer: Arc::new(importer),
        gallery_source: Arc::from(gallery_source),
        video_source: Arc::from(video_source),
    };

    let app = api::create_router(state, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give ongoing requests time to complete
    info!("Waiting up to {} seconds for connections to close", timeout_secs.min(5));
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
