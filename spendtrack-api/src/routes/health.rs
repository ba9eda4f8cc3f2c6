/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```
///
/// The response is 200 even when the database is unreachable; `status` is
/// then `degraded` and `database` is `disconnected`.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match state.db.ping().await {
        Ok(()) => true,
        Err(err) => {
            warn!(backend = state.db.backend(), error = %err, "Database ping failed");
            false
        }
    };

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: spendtrack_shared::VERSION.to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    })
}
