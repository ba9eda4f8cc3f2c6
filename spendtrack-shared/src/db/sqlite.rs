/// SQLite backend
///
/// Used for local development (`DATABASE_URL=sqlite:...`) and by the test
/// suites, which run against an in-memory database.
///
/// SQLite stores booleans as integers, so a column declared `BOOLEAN` is
/// converted back to a JSON boolean; every other value is converted by its
/// storage class.

use super::{schema, Database, DbError, QueryOutcome, Row, SqlParam};
use async_trait::async_trait;
use futures::TryStreamExt;
use serde_json::Value as JsonValue;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Either, Row as _, Sqlite, TypeInfo, ValueRef};
use tracing::{debug, info};

/// [`Database`] implementation over a sqlx SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Wraps an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a private in-memory database with the Spendtrack tables created
    ///
    /// The pool is pinned to a single connection that never expires, since
    /// every SQLite in-memory connection is a separate database.
    pub async fn in_memory() -> Result<Self, DbError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let db = Self::new(pool);
        db.ensure_schema().await?;
        Ok(db)
    }

    /// Creates any missing Spendtrack tables
    pub async fn ensure_schema(&self) -> Result<(), DbError> {
        for statement in schema::SQLITE_TABLES {
            self.execute(statement, &[]).await?;
        }
        info!(tables = schema::SQLITE_TABLES.len(), "SQLite schema ready");
        Ok(())
    }

    /// Returns the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [SqlParam],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlParam::Int(value) => query.bind(*value),
            SqlParam::Text(value) => query.bind(value.as_str()),
            SqlParam::Bool(value) => query.bind(*value),
            SqlParam::Null => query.bind(None::<String>),
        };
    }
    query
}

fn row_to_json(row: &SqliteRow) -> Result<Row, DbError> {
    let mut map = Row::new();

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        let value = if raw.is_null() {
            JsonValue::Null
        } else {
            let storage = raw.type_info().name().to_string();
            match storage.as_str() {
                "INTEGER" if column.type_info().name() == "BOOLEAN" => {
                    JsonValue::from(row.try_get::<bool, _>(index)?)
                }
                "INTEGER" => JsonValue::from(row.try_get::<i64, _>(index)?),
                "REAL" => JsonValue::from(row.try_get::<f64, _>(index)?),
                "TEXT" => JsonValue::from(row.try_get::<String, _>(index)?),
                other => {
                    return Err(DbError::UnsupportedType {
                        column: column.name().to_string(),
                        type_name: other.to_string(),
                    })
                }
            }
        };

        map.insert(column.name().to_string(), value);
    }

    Ok(map)
}

#[async_trait]
impl Database for SqliteDatabase {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn execute(&self, sql: &str, params: &[SqlParam]) -> Result<QueryOutcome, DbError> {
        debug!(sql, params = params.len(), "Executing statement");

        let mut outcome = QueryOutcome::default();
        let mut stream = bind_params(sqlx::query(sql), params).fetch_many(&self.pool);

        while let Some(item) = stream.try_next().await? {
            match item {
                Either::Left(result) => outcome.rows_affected += result.rows_affected(),
                Either::Right(row) => outcome.rows.push(row_to_json(&row)?),
            }
        }

        Ok(outcome)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
