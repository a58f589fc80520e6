//! # Authorization Check Server
//!
//! HTTP front for the ERP's page guards. See `erp_authz::server` for the
//! endpoints and `erp_authz::config` for the environment variables.

use anyhow::Context;
use erp_authz::server::{create_router, AppState};
use erp_authz::AuthzConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received SIGTERM signal");
        }
    }

    info!("Starting graceful shutdown");
}

/// Main server entrypoint
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ERP Authorization Server v{}", erp_authz::VERSION);

    let config = AuthzConfig::from_env().context("invalid configuration")?;

    info!("Configuration:");
    info!("  Port: {}", config.port);
    info!("  Scope convention: {}", config.scope_convention);
    match &config.role_table_path {
        Some(path) => info!("  Role table: {}", path.display()),
        None => info!("  Role table: built-in"),
    }

    let roles = config
        .load_role_table()
        .context("failed to load role table")?;
    info!("Role table ready: {} roles", roles.len());

    let app = create_router(AppState::new(Arc::new(roles)));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Starting HTTP server on {}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shut down gracefully");
    Ok(())
}
