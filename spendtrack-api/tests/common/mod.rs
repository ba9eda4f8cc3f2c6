//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - In-memory SQLite database with the Spendtrack tables
//! - A statement-recording database wrapper
//! - Router construction and request helpers

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use spendtrack_api::app::{build_router, AppState};
use spendtrack_api::config::{ApiConfig, Config, ConflictPolicy, UserConfig};
use spendtrack_shared::db::pool::DatabaseConfig;
use spendtrack_shared::db::sqlite::SqliteDatabase;
use spendtrack_shared::db::{Database, DbError, QueryOutcome, SqlParam};
use std::sync::{Arc, Mutex};
use tower::Service as _;

/// Database wrapper that records every statement it executes
pub struct RecordingDatabase {
    inner: SqliteDatabase,
    statements: Mutex<Vec<String>>,
}

impl RecordingDatabase {
    pub fn new(inner: SqliteDatabase) -> Self {
        Self {
            inner,
            statements: Mutex::new(Vec::new()),
        }
    }

    /// Statements executed so far
    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.statements.lock().unwrap().clear();
    }
}

#[async_trait]
impl Database for RecordingDatabase {
    fn backend(&self) -> &'static str {
        self.inner.backend()
    }

    async fn execute(&self, sql: &str, params: &[SqlParam]) -> Result<QueryOutcome, DbError> {
        self.statements.lock().unwrap().push(sql.to_string());
        self.inner.execute(sql, params).await
    }

    async fn close(&self) {
        self.inner.close().await;
    }
}

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: Arc<RecordingDatabase>,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a test context over a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_policy(ConflictPolicy::Reject).await
    }

    /// Creates a test context with the given user conflict policy
    pub async fn with_policy(conflict_policy: ConflictPolicy) -> anyhow::Result<Self> {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: Some("sqlite::memory:".to_string()),
                ..Default::default()
            },
            users: UserConfig { conflict_policy },
        };

        let db = Arc::new(RecordingDatabase::new(SqliteDatabase::in_memory().await?));

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext { db, app, config })
    }

    /// Sends a request with an empty body
    pub async fn send(&self, method: Method, uri: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.app.clone().call(request).await.unwrap()
    }

    /// Sends a request and returns its status and body text
    pub async fn send_text(&self, method: Method, uri: &str) -> (StatusCode, String) {
        let response = self.send(method, uri).await;
        let status = response.status();
        (status, body_text(response).await)
    }

    /// Sends a request and parses its body as JSON
    pub async fn send_json(&self, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.send_text(method, uri).await;
        let value = serde_json::from_str(&body)
            .unwrap_or_else(|err| panic!("Expected JSON body, got {body:?}: {err}"));
        (status, value)
    }

    /// Runs a statement against the database directly
    pub async fn sql(&self, statement: &str) -> QueryOutcome {
        self.db.inner.execute(statement, &[]).await.unwrap()
    }
}

/// Reads a response body as text
pub async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&body).into_owned()
}

/// Content-Type of a response
pub fn content_type(response: &Response) -> &str {
    response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
