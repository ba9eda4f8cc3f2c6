/// User model and database operations
///
/// Users are looked up by email, which acts as the natural key. Nothing in
/// the table enforces uniqueness; the API checks for an existing row before
/// inserting.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE MyExpenseUser (
///     UserId BIGINT PRIMARY KEY AUTO_INCREMENT,
///     UserName VARCHAR(255),
///     UserEmail VARCHAR(255) NOT NULL,
///     RegistrationDate VARCHAR(19)
/// );
/// ```

use crate::db::{Database, DbError, SqlParam};
use serde::{Deserialize, Serialize};

/// A registered user
///
/// Serialized with the column names as JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    /// Primary key
    pub user_id: i64,

    /// Display name
    pub user_name: Option<String>,

    /// Email address used for lookups
    pub user_email: String,

    /// When the user registered (`YYYY-MM-DD HH:MM:SS`, UTC)
    pub registration_date: Option<String>,
}

/// Input for registering a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub registered_at: String,
}

impl User {
    /// Returns every user with the given email
    pub async fn list_by_email(db: &dyn Database, email: &str) -> Result<Vec<Self>, DbError> {
        db.execute(
            "SELECT * FROM MyExpenseUser WHERE UserEmail = ?;",
            &[SqlParam::from(email)],
        )
        .await?
        .decode()
    }

    /// Finds the first user with the given email
    pub async fn find_by_email(db: &dyn Database, email: &str) -> Result<Option<Self>, DbError> {
        db.execute(
            "SELECT * FROM MyExpenseUser WHERE UserEmail = ?;",
            &[SqlParam::from(email)],
        )
        .await?
        .first()
    }

    /// Finds a user by ID
    pub async fn find_by_id(db: &dyn Database, user_id: i64) -> Result<Option<Self>, DbError> {
        db.execute(
            "SELECT * FROM MyExpenseUser WHERE UserId = ?;",
            &[SqlParam::from(user_id)],
        )
        .await?
        .first()
    }

    /// Inserts a user, returning the number of rows inserted
    pub async fn create(db: &dyn Database, data: &NewUser) -> Result<u64, DbError> {
        let outcome = db
            .execute(
                "INSERT INTO MyExpenseUser (UserName, UserEmail, RegistrationDate) VALUES (?, ?, ?);",
                &[
                    SqlParam::from(data.name.as_str()),
                    SqlParam::from(data.email.as_str()),
                    SqlParam::from(data.registered_at.as_str()),
                ],
            )
            .await?;

        Ok(outcome.rows_affected)
    }

    /// Sets the display name of the user(s) with the given email
    pub async fn rename_by_email(
        db: &dyn Database,
        email: &str,
        name: &str,
    ) -> Result<u64, DbError> {
        let outcome = db
            .execute(
                "UPDATE MyExpenseUser SET UserName = ? WHERE UserEmail = ?;",
                &[SqlParam::from(name), SqlParam::from(email)],
            )
            .await?;

        Ok(outcome.rows_affected)
    }

    /// Sets the display name of a user
    ///
    /// A missing name stores NULL.
    pub async fn rename(
        db: &dyn Database,
        user_id: i64,
        name: Option<&str>,
    ) -> Result<u64, DbError> {
        let outcome = db
            .execute(
                "UPDATE MyExpenseUser SET UserName = ? WHERE UserId = ?;",
                &[SqlParam::from(name), SqlParam::from(user_id)],
            )
            .await?;

        Ok(outcome.rows_affected)
    }

    /// Deletes a user, returning the number of rows deleted
    pub async fn delete(db: &dyn Database, user_id: i64) -> Result<u64, DbError> {
        let outcome = db
            .execute(
                "DELETE FROM MyExpenseUser WHERE UserId = ?;",
                &[SqlParam::from(user_id)],
            )
            .await?;

        Ok(outcome.rows_affected)
    }
}

/// Display name for a user registered without one: the local part of the email
pub fn derive_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}
