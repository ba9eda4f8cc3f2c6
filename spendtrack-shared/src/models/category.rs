/// Expense category model and database operations
///
/// A category is identified by its name within one user's categories. The
/// (name, user) pair is only unique by convention: the API checks for an
/// existing row before inserting.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE ExpenseCategory (
///     id BIGINT PRIMARY KEY AUTO_INCREMENT,
///     expense_category VARCHAR(255) NOT NULL,
///     category_description TEXT,
///     userId BIGINT NOT NULL,
///     categoryColor VARCHAR(32),
///     category_budget BIGINT NOT NULL DEFAULT 0
/// );
/// ```

use crate::db::{Database, DbError, SqlParam};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// An expense category owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: i64,

    /// Category name
    pub expense_category: Option<String>,

    pub category_description: Option<String>,

    /// Owning user
    #[serde(rename = "userId")]
    pub user_id: i64,

    /// Display color (e.g. "#ff8800")
    #[serde(rename = "categoryColor")]
    pub category_color: Option<String>,

    /// Monthly budget; DECIMAL columns yield fractions
    pub category_budget: Option<Number>,
}

/// Fields written when a category is created or edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDetails {
    pub name: String,
    pub user_id: i64,
    pub description: String,
    pub color: String,
    pub budget: i64,
}

impl ExpenseCategory {
    /// Finds categories by primary key
    pub async fn list_by_id(db: &dyn Database, id: &str) -> Result<Vec<Self>, DbError> {
        db.execute(
            "SELECT * FROM ExpenseCategory WHERE id = ?;",
            &[SqlParam::from(id)],
        )
        .await?
        .decode()
    }

    /// Lists every category owned by a user
    pub async fn list_by_user(db: &dyn Database, user_id: &str) -> Result<Vec<Self>, DbError> {
        db.execute(
            "SELECT * FROM ExpenseCategory WHERE userId = ?;",
            &[SqlParam::from(user_id)],
        )
        .await?
        .decode()
    }

    /// Lists a user's categories with the given name
    pub async fn list_by_name(
        db: &dyn Database,
        name: &str,
        user_id: i64,
    ) -> Result<Vec<Self>, DbError> {
        db.execute(
            "SELECT * FROM ExpenseCategory WHERE expense_category = ? AND userId = ?;",
            &[SqlParam::from(name), SqlParam::from(user_id)],
        )
        .await?
        .decode()
    }

    /// Inserts a category, returning the number of rows inserted
    pub async fn create(db: &dyn Database, details: &CategoryDetails) -> Result<u64, DbError> {
        let outcome = db
            .execute(
                "INSERT INTO ExpenseCategory (expense_category, category_description, userId, categoryColor, category_budget) VALUES (?, ?, ?, ?, ?);",
                &[
                    SqlParam::from(details.name.as_str()),
                    SqlParam::from(details.description.as_str()),
                    SqlParam::from(details.user_id),
                    SqlParam::from(details.color.as_str()),
                    SqlParam::from(details.budget),
                ],
            )
            .await?;

        Ok(outcome.rows_affected)
    }

    /// Overwrites description, color and budget of the matching category
    pub async fn update_details(
        db: &dyn Database,
        details: &CategoryDetails,
    ) -> Result<u64, DbError> {
        let outcome = db
            .execute(
                "UPDATE ExpenseCategory SET category_description = ?, categoryColor = ?, category_budget = ? WHERE expense_category = ? AND userId = ?;",
                &[
                    SqlParam::from(details.description.as_str()),
                    SqlParam::from(details.color.as_str()),
                    SqlParam::from(details.budget),
                    SqlParam::from(details.name.as_str()),
                    SqlParam::from(details.user_id),
                ],
            )
            .await?;

        Ok(outcome.rows_affected)
    }
}
