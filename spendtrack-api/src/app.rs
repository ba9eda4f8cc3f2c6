/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use spendtrack_api::{app::AppState, config::Config};
/// use spendtrack_shared::db::pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let db = pool::connect(&config.database).await?;
/// let state = AppState::new(db, config);
/// let app = spendtrack_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{catch_panic::panic_response, cors::CorsHeadersLayer},
    routes,
};
use axum::{
    routing::{any, get},
    Router,
};
use spendtrack_shared::db::Database;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database backend
    pub db: Arc<dyn Database>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: Arc<dyn Database>, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /health      # Health check
/// ├── /user            # GET, POST, PUT, DELETE
/// ├── /category        # GET, POST
/// ├── /event           # GET, POST, DELETE
/// ├── /tasks           # GET, POST, DELETE
/// └── *                # 404 "Invalid URL"
/// ```
///
/// Resource paths accept every method and answer unsupported ones with
/// 400 `Invalid request method`.
///
/// # Middleware Stack
///
/// Outermost first:
/// 1. CORS (preflight answered here, headers added to every response)
/// 2. Logging (tower-http TraceLayer)
/// 3. Panic recovery (tower-http CatchPanicLayer)
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/user", any(routes::user::handle))
        .route("/category", any(routes::category::handle))
        .route("/event", any(routes::expense::handle))
        .route("/tasks", any(routes::task::handle))
        .fallback(routes::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsHeadersLayer::new())
        .with_state(state)
}
