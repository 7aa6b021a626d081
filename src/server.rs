//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, service wiring, background tasks and the Axum
//! server lifecycle.

use crate::api::middleware::rate_limit::{ClientRateLimiter, spawn_cleanup};
use crate::application::services::{LinkService, LinkSettings};
use crate::config::Config;
use crate::infrastructure::http::HttpUrlValidator;
use crate::infrastructure::persistence::{SqliteMappingRepository, connect};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - URL validator and link service
/// - Rate limiter with background bucket cleanup
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect(&config)
        .await
        .context("Failed to open database")?;
    tracing::info!("Connected to database");

    let repository = Arc::new(SqliteMappingRepository::new(Arc::new(pool.clone())));
    let validator =
        Arc::new(HttpUrlValidator::from_config(&config).context("Failed to build HTTP client")?);
    let link_service = Arc::new(LinkService::new(
        repository,
        validator,
        LinkSettings::from_config(&config)?,
    ));

    let rate_limiter = Arc::new(ClientRateLimiter::from_config(&config)?);
    let cleanup = spawn_cleanup(rate_limiter.clone(), RATE_LIMIT_CLEANUP_INTERVAL);

    let state = AppState::new(link_service, rate_limiter);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    cleanup.abort();
    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
