//! # Spendtrack API Server
//!
//! Serves the `/user`, `/category`, `/event` and `/tasks` endpoints over a
//! MySQL-compatible database (or SQLite when `DATABASE_URL` is a `sqlite:`
//! URL).
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p spendtrack-api
//! ```

use anyhow::Context;
use spendtrack_api::{
    app::{build_router, AppState},
    config::Config,
};
use spendtrack_shared::db::pool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spendtrack_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Spendtrack API Server v{} starting...",
        spendtrack_shared::VERSION
    );

    let config = Config::from_env()?;
    tracing::info!(
        backend = config.database.backend(),
        conflict_policy = %config.users.conflict_policy,
        "Configuration loaded"
    );

    let db = pool::connect(&config.database)
        .await
        .context("failed to connect to the database")?;

    let address = config.bind_address();
    let state = AppState::new(db.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
