//! Infisical gateway entry point.
//!
//! Loads configuration, registers the Infisical client, and starts the Axum
//! HTTP server with graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use infisical_client::InfisicalClient;
use tokio::net::TcpListener;
use tracing::{info, warn};

use infisical_gateway::config::GatewayConfig;
use infisical_gateway::routes;
use infisical_gateway::service::GatewayService;
use infisical_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables win.
    let dotenv = dotenvy::dotenv();

    let config = GatewayConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env file"),
    }

    info!(
        site_url = %config.site_url,
        project_id = %config.defaults.project_id,
        environment = %config.defaults.environment,
        "Infisical gateway starting"
    );

    let state = build_app_state(&config)?;

    let app = routes::router(Arc::clone(&state));

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, docs = config.enable_docs, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("gateway stopped");
    Ok(())
}

/// Register the Infisical client and build the shared state.
fn build_app_state(config: &GatewayConfig) -> anyhow::Result<Arc<AppState>> {
    let client_config = config
        .client_config()
        .context("invalid gateway configuration")?;

    let auth_method = if config.access_token.is_some() {
        "access-token"
    } else {
        "universal-auth"
    };

    let client =
        InfisicalClient::with_config(client_config).context("failed to build Infisical client")?;
    info!(auth_method, "Infisical client registered");

    Ok(Arc::new(AppState {
        service: GatewayService::new(Arc::new(client), config.defaults.clone()),
        docs_enabled: config.enable_docs,
        max_concurrent_requests: config.max_concurrent_requests,
    }))
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
