//! SiteSync daemon - webhook-triggered replication service
//!
//! This binary wires the adapters together and serves the webhook:
//! - Dropbox change notifications arrive over HTTP
//! - Per-account sync runs replicate owned files into an S3 bucket
//! - Cursors in Redis keep every run incremental
//! - Graceful shutdown on SIGTERM/SIGINT
//!
//! # Architecture
//!
//! All state lives in the stores; the process itself is stateless and can
//! be restarted at any time. The HTTP handler only parses and dispatches;
//! sync work happens in spawned tasks supervised by the [`Dispatcher`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sitesync_core::config::Config;
use sitesync_core::ports::{ChangeSource, CursorStore, ObjectStore, TenantDirectory};
use sitesync_dropbox::DropboxClient;
use sitesync_s3::S3Mirror;
use sitesync_store::{PgTenantDirectory, RedisCursorStore};

use crate::dispatch::{Dispatcher, SourceFactory};
use crate::server::WebhookServer;

mod dispatch;
mod notification;
mod server;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();

    info!("sitesync daemon starting (sitesyncd)");

    let config = Config::from_env();
    let validation_errors = config.validate();
    if !validation_errors.is_empty() {
        for err in &validation_errors {
            error!(field = %err.field, "{}", err.message);
        }
        anyhow::bail!("invalid configuration ({} errors)", validation_errors.len());
    }

    let tenants: Arc<dyn TenantDirectory> = Arc::new(
        PgTenantDirectory::connect(&config.database)
            .await
            .context("failed to connect to postgres")?,
    );
    let cursors: Arc<dyn CursorStore> = Arc::new(
        RedisCursorStore::connect(&config.cursor_store)
            .await
            .context("failed to connect to redis")?,
    );
    let objects: Arc<dyn ObjectStore> = Arc::new(S3Mirror::new(&config.destination).await);
    let sources: SourceFactory =
        Arc::new(|token| Arc::new(DropboxClient::new(token)) as Arc<dyn ChangeSource>);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal(signal_token).await;
    });

    let dispatcher = Arc::new(Dispatcher::new(
        sources,
        cursors,
        tenants,
        objects,
        config.limits.max_concurrent_runs,
        Duration::from_secs(config.limits.run_timeout_secs),
        shutdown.clone(),
    ));

    let server = WebhookServer::bind(&config.server.listen_addr, Arc::clone(&dispatcher))
        .await
        .context("failed to start webhook server")?;

    let result = server.run(shutdown).await;

    // Let in-flight runs finish and checkpoint before the process exits.
    info!("waiting for in-flight runs");
    dispatcher.drain().await;

    match &result {
        Ok(()) => info!("sitesync daemon shut down gracefully"),
        Err(e) => error!(error = %e, "sitesync daemon exiting with error"),
    }

    result
}

/// Waits for SIGTERM or SIGINT and triggers the cancellation token.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }

    token.cancel();
}
