//! HTTP server initialization and runtime setup.
//!
//! Opens the store once, applies migrations, serves requests until a
//! shutdown signal arrives, then closes the store.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::infrastructure::persistence::{SqliteShortenedUrlRepository, pool};
use crate::routes::app_router;
use crate::state::{AppState, SqliteLinkService};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Opens the SQLite store and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated; the
/// service must not start in that case.
pub async fn open_store(config: &Config) -> Result<Arc<SqliteLinkService>> {
    let (pool, metrics) = pool::connect(config)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let repository = SqliteShortenedUrlRepository::new(Arc::new(pool), metrics)
        .with_timeouts(config.query_timeout(), config.health_probe_timeout());

    Ok(Arc::new(LinkService::new(Arc::new(repository))))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let link_service = open_store(&config).await?;

    let state = AppState::new(link_service.clone());
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    link_service.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
