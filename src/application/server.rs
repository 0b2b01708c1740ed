use std::net::SocketAddr;

use anyhow::{Context, bail};
use axum::http::HeaderValue;
use chrono::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::application::routes::{app_router, cors_layer};
use crate::application::state::{AppState, AppStateConfig};
use crate::infrastructure::auth::TokenSigner;
use crate::infrastructure::database::Database;

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub token_secret: String,
    pub token_ttl: Duration,
    pub allowed_origin: Option<String>,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    if config.token_secret.trim().is_empty() {
        bail!("BOOKSHELF_TOKEN_SECRET must not be empty");
    }

    let allowed_origin = config
        .allowed_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .context("invalid BOOKSHELF_ALLOWED_ORIGIN")?;

    let database = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState::from_database(
        &database,
        AppStateConfig {
            token_signer: TokenSigner::new(config.token_secret.as_bytes(), config.token_ttl),
        },
    );

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    let app = app_router(state, cors_layer(allowed_origin));

    info!(
        address = %config.bind_address,
        database = %config.database_url,
        token_ttl_hours = config.token_ttl.num_hours(),
        "starting HTTP server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");

    Ok(())
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if signal handlers fail
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
