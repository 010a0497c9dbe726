//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, the expiry sweeper and the
//! Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::persistence::PgShortLinkRepository;
use crate::jobs::{ExpirySweeper, run_daily};
use crate::routes::{RateLimit, app_router};
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Opens the connection pool with the configured limits.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Daily expiry sweeper (unless disabled)
/// - Axum HTTP server
///
/// On Ctrl+C or SIGTERM the server stops accepting connections, drains
/// in-flight requests and then stops the sweeper.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = Arc::new(connect_pool(&config).await?);
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(pool.as_ref())
        .await
        .context("Failed to migrate")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweep_schedule = config.sweeper_enabled.then_some(config.sweep_schedule);
    let sweeper_handle = sweep_schedule.map(|schedule| {
        let repository = Arc::new(PgShortLinkRepository::new(pool.clone()));
        let sweeper = Arc::new(ExpirySweeper::new(repository));
        tokio::spawn(run_daily(sweeper, schedule, shutdown_rx))
    });
    if sweeper_handle.is_none() {
        tracing::info!("Expiry sweeper disabled");
    }

    let state = AppState::new(
        pool,
        config.operation_timeout(),
        config.page_limits(),
        sweep_schedule,
    );

    let app = app_router(
        state,
        Some(RateLimit {
            per_second: config.rate_limit_per_second,
            burst: config.rate_limit_burst,
        }),
    )?;

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped, shutting down background jobs");
    let _ = shutdown_tx.send(true);
    if let Some(handle) = sweeper_handle
        && let Err(e) = handle.await
    {
        tracing::error!(error = %e, "Expiry sweeper task panicked");
    }

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
