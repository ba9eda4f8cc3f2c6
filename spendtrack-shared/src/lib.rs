//! # Spendtrack Shared Library
//!
//! Database access and data models used by the Spendtrack API server.
//!
//! ## Module Organization
//!
//! - `db`: Database adapter trait and its MySQL/SQLite implementations
//! - `models`: Table models and the SQL each endpoint issues
//! - `clock`: Timestamp formatting and task time windows

pub mod clock;
pub mod db;
pub mod models;

/// Release version, reported by the server at startup and on `/health`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
