/// Task model and database operations
///
/// Tasks are to-do entries with a priority and a due date. Listing supports
/// a title search, a category filter, a due-date window, priority-first
/// ordering and a row limit; see [`TaskFilter::to_query`].
///
/// # Schema
///
/// ```sql
/// CREATE TABLE TaskEntry (
///     task_id BIGINT PRIMARY KEY AUTO_INCREMENT,
///     task_title VARCHAR(255) NOT NULL,
///     task_creation_date VARCHAR(19) NOT NULL,
///     task_category VARCHAR(255),
///     task_priority BIGINT NOT NULL,
///     task_date VARCHAR(19) NOT NULL,
///     task_desc TEXT,
///     userId BIGINT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use spendtrack_shared::clock::TimeRange;
/// use spendtrack_shared::models::task::{TaskEntry, TaskFilter};
/// # use spendtrack_shared::db::Database;
///
/// # async fn example(db: &dyn Database) -> Result<(), spendtrack_shared::db::DbError> {
/// let filter = TaskFilter {
///     user_id: 1,
///     window: Some(TimeRange::ThisWeek.window(chrono::Utc::now())),
///     sort_by_priority: true,
///     ..Default::default()
/// };
///
/// let tasks = TaskEntry::list(db, &filter).await?;
/// # Ok(())
/// # }
/// ```

use crate::clock::TimeWindow;
use crate::db::{Database, DbError, SqlParam};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A to-do entry
///
/// Non-key columns are read as stored; NULLs come back as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub task_id: i64,
    pub task_title: Option<String>,

    /// Creation time with the +05:30 shift applied
    pub task_creation_date: Option<String>,

    pub task_category: Option<String>,

    /// Higher is more important
    pub task_priority: Option<Number>,

    /// Due date as supplied by the client
    pub task_date: Option<String>,

    pub task_desc: Option<String>,

    /// Owning user
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub user_id: i64,
    pub category: String,
    pub priority: i64,
    pub due_date: String,
    pub description: String,
    pub created_at: String,
}

/// Filters for listing a user's tasks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub user_id: i64,

    /// Substring of the title
    pub search: Option<String>,

    /// Exact category name
    pub category: Option<String>,

    /// Due-date window (inclusive)
    pub window: Option<TimeWindow>,

    /// Order by priority before creation date
    pub sort_by_priority: bool,

    /// Maximum number of rows
    pub limit: Option<i64>,
}

impl TaskFilter {
    /// Builds the SELECT for this filter
    ///
    /// Rows are always ordered by creation date descending, preceded by
    /// priority descending when `sort_by_priority` is set.
    pub fn to_query(&self) -> (String, Vec<SqlParam>) {
        let mut sql = String::from("SELECT * FROM TaskEntry WHERE userId = ? ");
        let mut params = vec![SqlParam::from(self.user_id)];

        if let Some(search) = &self.search {
            sql.push_str("AND task_title LIKE ? ");
            params.push(SqlParam::Text(format!("%{search}%")));
        }

        if let Some(category) = &self.category {
            sql.push_str("AND task_category = ? ");
            params.push(SqlParam::from(category.as_str()));
        }

        if let Some(window) = &self.window {
            let (start, end) = window.bounds();
            sql.push_str("AND task_date BETWEEN ? AND ? ");
            params.push(SqlParam::Text(start));
            params.push(SqlParam::Text(end));
        }

        sql.push_str("ORDER BY ");
        if self.sort_by_priority {
            sql.push_str("task_priority DESC, ");
        }
        sql.push_str("task_creation_date DESC");

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ?");
            params.push(SqlParam::from(limit));
        }

        sql.push(';');
        (sql, params)
    }
}

impl TaskEntry {
    /// Lists tasks matching the filter
    pub async fn list(db: &dyn Database, filter: &TaskFilter) -> Result<Vec<Self>, DbError> {
        let (sql, params) = filter.to_query();
        db.execute(&sql, &params).await?.decode()
    }

    /// Inserts a task, returning the number of rows inserted
    pub async fn create(db: &dyn Database, data: &NewTask) -> Result<u64, DbError> {
        let outcome = db
            .execute(
                "INSERT INTO TaskEntry (task_title, task_creation_date, task_category, task_priority, task_date, task_desc, userId) VALUES (?, ?, ?, ?, ?, ?, ?);",
                &[
                    SqlParam::from(data.title.as_str()),
                    SqlParam::from(data.created_at.as_str()),
                    SqlParam::from(data.category.as_str()),
                    SqlParam::from(data.priority),
                    SqlParam::from(data.due_date.as_str()),
                    SqlParam::from(data.description.as_str()),
                    SqlParam::from(data.user_id),
                ],
            )
            .await?;

        Ok(outcome.rows_affected)
    }

    /// Deletes a task by ID, returning the number of rows deleted
    pub async fn delete(db: &dyn Database, task_id: &str) -> Result<u64, DbError> {
        let outcome = db
            .execute(
                "DELETE FROM TaskEntry WHERE task_id = ?;",
                &[SqlParam::from(task_id)],
            )
            .await?;

        Ok(outcome.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimeRange;
    use crate::db::sqlite::SqliteDatabase;
    use chrono::{TimeZone, Utc};

    fn task(title: &str, priority: i64, due: &str, created: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            user_id: 1,
            category: "Home".to_string(),
            priority,
            due_date: due.to_string(),
            description: String::new(),
            created_at: created.to_string(),
        }
    }

    #[test]
    fn test_query_minimal() {
        let (sql, params) = TaskFilter {
            user_id: 4,
            ..Default::default()
        }
        .to_query();

        assert_eq!(
            sql,
            "SELECT * FROM TaskEntry WHERE userId = ? ORDER BY task_creation_date DESC;"
        );
        assert_eq!(params, vec![SqlParam::Int(4)]);
    }

    #[test]
    fn test_query_with_every_filter() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        let (sql, params) = TaskFilter {
            user_id: 4,
            search: Some("milk".to_string()),
            category: Some("Home".to_string()),
            window: Some(TimeRange::Today.window(now)),
            sort_by_priority: true,
            limit: Some(10),
        }
        .to_query();

        assert_eq!(
            sql,
            "SELECT * FROM TaskEntry WHERE userId = ? AND task_title LIKE ? AND task_category = ? \
             AND task_date BETWEEN ? AND ? ORDER BY task_priority DESC, task_creation_date DESC LIMIT ?;"
        );
        assert_eq!(
            params,
            vec![
                SqlParam::Int(4),
                SqlParam::Text("%milk%".to_string()),
                SqlParam::Text("Home".to_string()),
                SqlParam::Text("2024-05-14 12:00:00".to_string()),
                SqlParam::Text("2024-05-15 12:00:00".to_string()),
                SqlParam::Int(10),
            ]
        );
    }

    #[tokio::test]
    async fn test_priority_sort_and_search() {
        let db = SqliteDatabase::in_memory().await.unwrap();
        TaskEntry::create(&db, &task("buy milk", 1, "2024-05-15 10:00:00", "2024-05-01 00:00:00")).await.unwrap();
        TaskEntry::create(&db, &task("pay rent", 5, "2024-05-15 10:00:00", "2024-04-01 00:00:00")).await.unwrap();
        TaskEntry::create(&db, &task("buy bread", 3, "2024-05-15 10:00:00", "2024-03-01 00:00:00")).await.unwrap();

        let by_date = TaskEntry::list(&db, &TaskFilter { user_id: 1, ..Default::default() })
            .await
            .unwrap();
        let titles: Vec<_> = by_date.iter().filter_map(|t| t.task_title.as_deref()).collect();
        assert_eq!(titles, vec!["buy milk", "pay rent", "buy bread"]);

        let by_priority = TaskEntry::list(
            &db,
            &TaskFilter {
                user_id: 1,
                sort_by_priority: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let titles: Vec<_> = by_priority.iter().filter_map(|t| t.task_title.as_deref()).collect();
        assert_eq!(titles, vec!["pay rent", "buy bread", "buy milk"]);

        let searched = TaskEntry::list(
            &db,
            &TaskFilter {
                user_id: 1,
                search: Some("buy".to_string()),
                limit: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].task_title.as_deref(), Some("buy milk"));
    }

    #[tokio::test]
    async fn test_list_keeps_null_columns() {
        let db = SqliteDatabase::in_memory().await.unwrap();
        db.execute(
            "INSERT INTO TaskEntry (task_title, task_creation_date, task_priority, task_date, userId) \
             VALUES ('legacy', '2024-01-01 00:00:00', 1.5, '2024-01-02 00:00:00', 1)",
            &[],
        )
        .await
        .unwrap();

        let tasks = TaskEntry::list(&db, &TaskFilter { user_id: 1, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_category, None);
        assert_eq!(tasks[0].task_priority.as_ref().and_then(Number::as_f64), Some(1.5));
    }
}
