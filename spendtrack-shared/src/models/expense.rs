/// Expense entry model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE ExpenseEntry (
///     expense_id BIGINT PRIMARY KEY AUTO_INCREMENT,
///     expense_title VARCHAR(255) NOT NULL,
///     expense_creation_date VARCHAR(19) NOT NULL,
///     expense_category VARCHAR(255),
///     expense_amount BIGINT NOT NULL,
///     expense_desc TEXT,
///     star_marked BOOLEAN NOT NULL DEFAULT FALSE,
///     userId BIGINT NOT NULL
/// );
/// ```
///
/// `expense_category` holds the category name as free text; it is not a
/// foreign key.

use crate::db::{Database, DbError, SqlParam};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value as JsonValue};

/// A single expense
///
/// Rows written by older clients may hold NULLs or fractional amounts, so
/// everything but the keys is read as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub expense_id: i64,
    pub expense_title: Option<String>,

    /// Creation time with the +05:30 shift applied
    pub expense_creation_date: Option<String>,

    pub expense_category: Option<String>,

    /// Integer for rows written by the API; DECIMAL columns yield fractions
    pub expense_amount: Option<Number>,

    pub expense_desc: Option<String>,

    /// Stored as BOOLEAN or as a 0/1 integer
    #[serde(deserialize_with = "deserialize_flag")]
    pub star_marked: bool,

    /// Owning user
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// Reads a boolean column that may arrive as a bool, a number or NULL
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::Bool(flag) => flag,
        JsonValue::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        JsonValue::String(text) => text.eq_ignore_ascii_case("true") || text == "1",
        _ => false,
    })
}

/// Input for recording an expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub user_id: i64,
    pub category: String,
    pub amount: i64,
    pub description: String,
    pub star_marked: bool,
    pub created_at: String,
}

/// Filters for listing a user's expenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub user_id: i64,

    /// Exact category name
    pub category: Option<String>,

    /// Maximum number of rows
    pub limit: Option<i64>,
}

impl ExpenseFilter {
    /// Builds the SELECT for this filter, newest entries first
    pub fn to_query(&self) -> (String, Vec<SqlParam>) {
        let mut sql = String::from("SELECT * FROM ExpenseEntry WHERE userId = ? ");
        let mut params = vec![SqlParam::from(self.user_id)];

        if let Some(category) = &self.category {
            sql.push_str("AND expense_category = ? ");
            params.push(SqlParam::from(category.as_str()));
        }

        sql.push_str("ORDER BY expense_creation_date DESC");

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ?");
            params.push(SqlParam::from(limit));
        }

        sql.push(';');
        (sql, params)
    }
}

impl ExpenseEntry {
    /// Lists expenses matching the filter
    pub async fn list(db: &dyn Database, filter: &ExpenseFilter) -> Result<Vec<Self>, DbError> {
        let (sql, params) = filter.to_query();
        db.execute(&sql, &params).await?.decode()
    }

    /// Inserts an expense, returning the number of rows inserted
    pub async fn create(db: &dyn Database, data: &NewExpense) -> Result<u64, DbError> {
        let outcome = db
            .execute(
                "INSERT INTO ExpenseEntry (expense_title, expense_creation_date, expense_category, expense_amount, expense_desc, star_marked, userId) VALUES (?, ?, ?, ?, ?, ?, ?);",
                &[
                    SqlParam::from(data.title.as_str()),
                    SqlParam::from(data.created_at.as_str()),
                    SqlParam::from(data.category.as_str()),
                    SqlParam::from(data.amount),
                    SqlParam::from(data.description.as_str()),
                    SqlParam::from(data.star_marked),
                    SqlParam::from(data.user_id),
                ],
            )
            .await?;

        Ok(outcome.rows_affected)
    }

    /// Deletes an expense by ID, returning the number of rows deleted
    pub async fn delete(db: &dyn Database, expense_id: &str) -> Result<u64, DbError> {
        let outcome = db
            .execute(
                "DELETE FROM ExpenseEntry WHERE expense_id = ?;",
                &[SqlParam::from(expense_id)],
            )
            .await?;

        Ok(outcome.rows_affected)
    }
}
