/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `user`: `/user`
/// - `category`: `/category`
/// - `expense`: `/event`
/// - `task`: `/tasks`
///
/// `params` and `respond` hold the query parsing and response building the
/// resource handlers share.

pub mod category;
pub mod expense;
pub mod health;
pub mod params;
pub mod respond;
pub mod task;
pub mod user;

use axum::{http::StatusCode, response::Response};

/// Fallback for paths no resource handles
pub async fn not_found() -> Response {
    respond::text(StatusCode::NOT_FOUND, "Invalid URL")
}
