//! Server startup and graceful shutdown

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::sync::Notify;

use crate::config::ServerConfig;
use crate::setup::tls;

/// Serve until a shutdown signal, then drain for at most the grace period.
pub async fn start_server(config: &ServerConfig, app: Router) -> Result<()> {
    if config.tls {
        serve_tls(config, app).await
    } else {
        serve_plain(config, app).await
    }
}

async fn serve_plain(config: &ServerConfig, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;

    tracing::info!(
        addr = %config.listen,
        environment = %config.environment,
        "Server ready and accepting connections"
    );

    let shutdown_started = Arc::new(Notify::new());
    let signal_notify = Arc::clone(&shutdown_started);

    let server = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                signal_notify.notify_one();
            })
            .await
    };

    let grace = config.shutdown_grace();
    let deadline = async move {
        shutdown_started.notified().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            result.context("Server error")?;
            tracing::info!("Server stopped");
        }
        _ = deadline => {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "Shutdown grace period elapsed, dropping open connections"
            );
        }
    }

    Ok(())
}

async fn serve_tls(config: &ServerConfig, app: Router) -> Result<()> {
    let rustls = tls::rustls_config(&config.cert_path, &config.key_path)?;

    let handle = axum_server::Handle::new();
    let shutdown_handle = handle.clone();
    let grace = config.shutdown_grace();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_handle.graceful_shutdown(Some(grace));
    });

    tracing::info!(
        addr = %config.listen,
        environment = %config.environment,
        cert = %config.cert_path.display(),
        "Server ready and accepting TLS connections"
    );

    axum_server::bind_rustls(config.listen, rustls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .with_context(|| format!("TLS server on {} failed", config.listen))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Signal handler for graceful shutdown
///
/// Listens for Ctrl+C (SIGINT) and SIGTERM. If a handler cannot be installed,
/// that signal is ignored and the other one still works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");
}
