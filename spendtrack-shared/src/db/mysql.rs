/// MySQL backend
///
/// PlanetScale speaks the MySQL protocol, so this is the production backend.
/// Columns are converted to JSON by their declared MySQL type.

use super::{Database, DbError, QueryOutcome, Row, SqlParam};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use futures::TryStreamExt;
use serde_json::{Number, Value as JsonValue};
use sqlx::mysql::{MySqlArguments, MySqlPool, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, Either, MySql, Row as _, TypeInfo, ValueRef};
use tracing::debug;

/// [`Database`] implementation over a sqlx MySQL pool
#[derive(Debug, Clone)]
pub struct MySqlDatabase {
    pool: MySqlPool,
}

impl MySqlDatabase {
    /// Wraps an existing pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn bind_params<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    params: &'q [SqlParam],
) -> Query<'q, MySql, MySqlArguments> {
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

/// DECIMAL arrives as text; whole values become integers, the rest floats
fn decimal_to_json(text: &str) -> JsonValue {
    let text = text.trim();

    if let Ok(value) = text.parse::<i64>() {
        return JsonValue::from(value);
    }

    // "12.00" is still a whole amount
    if let Some((whole, fraction)) = text.split_once('.') {
        if fraction.bytes().all(|b| b == b'0') {
            if let Ok(value) = whole.parse::<i64>() {
                return JsonValue::from(value);
            }
        }
    }

    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::from(text))
}

fn json_text_to_json(text: String) -> JsonValue {
    serde_json::from_str(&text).unwrap_or(JsonValue::String(text))
}

fn row_to_json(row: &MySqlRow) -> Result<Row, DbError> {
    let mut map = Row::new();

    for column in row.columns() {
        let index = column.ordinal();
        let type_name = column.type_info().name();

        let value = if row.try_get_raw(index)?.is_null() {
            JsonValue::Null
        } else {
            match type_name {
                "BOOLEAN" => JsonValue::from(row.try_get::<bool, _>(index)?),
                "TINYINT" | "SMALLINT" | "INT" | "MEDIUMINT" | "BIGINT" => {
                    JsonValue::from(row.try_get::<i64, _>(index)?)
                }
                name if name.ends_with("UNSIGNED") => {
                    JsonValue::from(row.try_get::<u64, _>(index)?)
                }
                "FLOAT" => JsonValue::from(row.try_get::<f32, _>(index)?),
                "DOUBLE" => JsonValue::from(row.try_get::<f64, _>(index)?),
                "DATETIME" | "TIMESTAMP" => JsonValue::from(
                    row.try_get::<NaiveDateTime, _>(index)?
                        .format(crate::clock::TIMESTAMP_FORMAT)
                        .to_string(),
                ),
                "DATE" => JsonValue::from(
                    row.try_get::<NaiveDate, _>(index)?
                        .format("%Y-%m-%d")
                        .to_string(),
                ),
                "YEAR" => JsonValue::from(row.try_get_unchecked::<i64, _>(index)?),
                "TIME" => match row.try_get::<NaiveTime, _>(index) {
                    Ok(time) => JsonValue::from(time.format("%H:%M:%S").to_string()),
                    Err(_) => JsonValue::from(row.try_get_unchecked::<String, _>(index)?),
                },
                "DECIMAL" => decimal_to_json(&row.try_get_unchecked::<String, _>(index)?),
                "JSON" => json_text_to_json(row.try_get_unchecked::<String, _>(index)?),
                "CHAR" | "VARCHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT"
                | "ENUM" => JsonValue::from(row.try_get::<String, _>(index)?),
                other => match row.try_get_unchecked::<String, _>(index) {
                    Ok(text) => JsonValue::from(text),
                    Err(_) => {
                        return Err(DbError::UnsupportedType {
                            column: column.name().to_string(),
                            type_name: other.to_string(),
                        })
                    }
                },
            }
        };

        map.insert(column.name().to_string(), value);
    }

    Ok(map)
}

#[async_trait]
impl Database for MySqlDatabase {
    fn backend(&self) -> &'static str {
        "mysql"
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
