//! Steam Gateway - A caching, rate-limited gateway to the Steam Web API
//!
//! Serves the tool registry and cache administration over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use steam_gateway::api::create_router;
use steam_gateway::client::STEAM_RATE_LIMIT_SCOPE;
use steam_gateway::{spawn_cleanup_task, AppState, Config, RateLimiterPool, SteamClient};

/// Main entry point for the Steam gateway.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from `.env` and environment variables
/// 3. Create the Steam client on the shared rate limiter
/// 4. Start background cache cleanup task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "steam_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Steam Gateway");

    if dotenvy::dotenv().is_ok() {
        info!("Loaded environment from .env");
    }

    let config = Config::from_env();
    info!(
        "Configuration loaded: rate_limit={}/s, max_retries={}, cache_enabled={}, port={}",
        config.requests_per_second, config.max_retries, config.cache_enabled, config.server_port
    );

    let limiters = RateLimiterPool::new();
    let limiter = limiters
        .get_or_create(STEAM_RATE_LIMIT_SCOPE, config.requests_per_second)
        .await
        .context("invalid STEAM_RATE_LIMIT")?;
    let client = SteamClient::new(&config, limiter).context("failed to create Steam client")?;

    let cleanup_handle = client
        .cache()
        .map(|cache| spawn_cleanup_task(cache.clone(), config.cleanup_interval));
    if cleanup_handle.is_some() {
        info!("Background cleanup task started");
    }

    let state = AppState::with_builtin_tools(client);
    info!("{} tools registered", state.tools.len());
    let client = state.client.clone();

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    // Handlers are gone once serve returns, so this is the last reference
    if let Ok(client) = Arc::try_unwrap(client) {
        client.close();
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
