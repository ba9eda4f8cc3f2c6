/// Database layer for Spendtrack
///
/// Every statement the API issues goes through the [`Database`] trait: one
/// parameterized `execute` call that yields the returned rows together with
/// the number of rows affected. Rows come back as JSON objects keyed by column
/// name and are decoded into typed models by the `models` module.
///
/// # Modules
///
/// - `pool`: Backend selection and connection setup from configuration
/// - `mysql`: MySQL backend (production, PlanetScale)
/// - `sqlite`: SQLite backend (local development and tests)
/// - `schema`: Table definitions for the SQLite backend
///
/// # Example
///
/// ```no_run
/// use spendtrack_shared::db::{pool::{connect, DatabaseConfig}, SqlParam};
///
/// # async fn example() -> Result<(), spendtrack_shared::db::DbError> {
/// let config = DatabaseConfig {
///     url: Some("sqlite::memory:".to_string()),
///     ..Default::default()
/// };
///
/// let db = connect(&config).await?;
/// let outcome = db
///     .execute("SELECT * FROM TaskEntry WHERE userId = ?;", &[SqlParam::from(1_i64)])
///     .await?;
/// println!("{} rows", outcome.rows.len());
/// # Ok(())
/// # }
/// ```

pub mod mysql;
pub mod pool;
pub mod schema;
pub mod sqlite;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

/// A result row, keyed by column name
pub type Row = Map<String, JsonValue>;

/// Database error type
///
/// The `Display` output of a driver error is the raw message reported by the
/// database, which handlers pass straight through to clients.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Error reported by the driver or the database server
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    /// A returned row did not match the expected model
    #[error("failed to decode row: {0}")]
    Decode(#[from] serde_json::Error),

    /// A column type the row converter does not handle
    #[error("unsupported type {type_name} in column {column}")]
    UnsupportedType {
        /// Column name
        column: String,
        /// Database type name
        type_name: String,
    },
}

/// A bound statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
    Bool(bool),
    Null,
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Bool(value)
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlParam::Null)
    }
}

/// Rows and affected-row count produced by one statement
#[derive(Debug, Clone, Default)]
pub struct QueryOutcome {
    /// Rows returned by the statement (empty for INSERT/UPDATE/DELETE)
    pub rows: Vec<Row>,

    /// Rows inserted, updated or deleted by the statement
    pub rows_affected: u64,
}

impl QueryOutcome {
    /// Decodes every row into `T`
    pub fn decode<T: DeserializeOwned>(self) -> Result<Vec<T>, DbError> {
        self.rows
            .into_iter()
            .map(|row| serde_json::from_value(JsonValue::Object(row)).map_err(DbError::from))
            .collect()
    }

    /// Decodes the first row into `T`, if any
    pub fn first<T: DeserializeOwned>(self) -> Result<Option<T>, DbError> {
        match self.rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(JsonValue::Object(row))?)),
            None => Ok(None),
        }
    }
}

/// Parameterized statement execution against a SQL backend
///
/// Implementations hold whatever connection handle the backend needs. No
/// transaction support is exposed; each call is a single statement.
#[async_trait]
pub trait Database: Send + Sync {
    /// Short backend name used in logs ("mysql", "sqlite")
    fn backend(&self) -> &'static str;

    /// Executes one statement with `?` placeholders bound to `params`
    async fn execute(&self, sql: &str, params: &[SqlParam]) -> Result<QueryOutcome, DbError>;

    /// Verifies the backend answers a trivial query
    async fn ping(&self) -> Result<(), DbError> {
        self.execute("SELECT 1", &[]).await.map(|_| ())
    }

    /// Closes all connections held by the backend
    async fn close(&self);
}
