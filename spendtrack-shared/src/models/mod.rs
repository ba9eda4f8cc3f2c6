/// Table models for Spendtrack
///
/// Each module holds the row type for one table, the input types for its
/// writes, and the SQL the API issues against it. All operations go through
/// a [`Database`](crate::db::Database) handle.
///
/// # Models
///
/// - `user`: Registered users (`MyExpenseUser`)
/// - `category`: Expense categories with budgets (`ExpenseCategory`)
/// - `expense`: Expense entries (`ExpenseEntry`)
/// - `task`: To-do entries with due dates (`TaskEntry`)
///
/// # Example
///
/// ```no_run
/// use spendtrack_shared::db::sqlite::SqliteDatabase;
/// use spendtrack_shared::models::user::{NewUser, User};
///
/// # async fn example() -> Result<(), spendtrack_shared::db::DbError> {
/// let db = SqliteDatabase::in_memory().await?;
///
/// User::create(&db, &NewUser {
///     name: "Jane".to_string(),
///     email: "jane@example.com".to_string(),
///     registered_at: "2024-01-01 00:00:00".to_string(),
/// }).await?;
///
/// let user = User::find_by_email(&db, "jane@example.com").await?;
/// # Ok(())
/// # }
/// ```

pub mod category;
pub mod expense;
pub mod task;
pub mod user;
