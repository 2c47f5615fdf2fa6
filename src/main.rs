mod domain;
mod clients;

mod app_system;
mod auth;
mod http;
mod pricing;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod line_item_actor;
mod order_actor;
mod product_actor;
mod user_actor;

use tracing::{error, info};

use crate::app_system::{setup_tracing, AppConfig, OrderSystem};
use crate::auth::TokenSigner;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e.to_string()
    })?;

    let token_ttl = config.token_ttl().map_err(|e| e.to_string())?;

    // Create the entire order system (starts all actors)
    let system = OrderSystem::new(config.actor_buffer, config.orders);
    let tokens = TokenSigner::new(config.token_secret.clone(), token_ttl);
    let app = http::router(http::AppState::new(&system, tokens));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {addr}: {e}"))?;
    info!("shop-orders listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))?;

    // The router (and its client clones) is gone once serve returns
    system.shutdown().await?;

    info!("Application stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
