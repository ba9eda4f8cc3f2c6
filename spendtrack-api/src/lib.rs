//! # Spendtrack API Server Library
//!
//! HTTP backend for the expense and task tracker: users, expense categories,
//! expense entries and tasks, stored in a MySQL-compatible database.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: CORS and panic recovery
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
