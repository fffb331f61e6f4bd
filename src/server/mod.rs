pub mod api;
pub mod views;

use anyhow::{Context, Result};
use colored::*;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::storage;

pub use api::{router, AppState};

/// Opens the store, binds `config.bind` and serves until Ctrl-C.
pub async fn start(config: &Config) -> Result<()> {
    let db = storage::init(&config.database).await?;
    info!(database = %config.database.display(), "message store ready");

    let app = router(AppState::new(Arc::new(db))?);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    let addr = listener.local_addr()?;
    info!(%addr, "HTTP server listening");
    println!(
        "{} Board running at {}",
        "✓".green(),
        format!("http://{}", addr).bright_blue()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
