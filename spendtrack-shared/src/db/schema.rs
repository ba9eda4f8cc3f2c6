/// Table definitions for the SQLite backend
///
/// The production MySQL schema is managed outside this repository; the
/// equivalent MySQL definitions are documented on each model. These
/// statements only create tables that do not exist yet.

/// `CREATE TABLE IF NOT EXISTS` statements for every Spendtrack table
pub const SQLITE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS MyExpenseUser (
        UserId INTEGER PRIMARY KEY AUTOINCREMENT,
        UserName TEXT,
        UserEmail TEXT NOT NULL,
        RegistrationDate TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ExpenseCategory (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        expense_category TEXT NOT NULL,
        category_description TEXT,
        userId INTEGER NOT NULL,
        categoryColor TEXT,
        category_budget INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ExpenseEntry (
        expense_id INTEGER PRIMARY KEY AUTOINCREMENT,
        expense_title TEXT NOT NULL,
        expense_creation_date TEXT NOT NULL,
        expense_category TEXT,
        expense_amount INTEGER NOT NULL,
        expense_desc TEXT,
        star_marked BOOLEAN NOT NULL DEFAULT 0,
        userId INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS TaskEntry (
        task_id INTEGER PRIMARY KEY AUTOINCREMENT,
        task_title TEXT NOT NULL,
        task_creation_date TEXT NOT NULL,
        task_category TEXT,
        task_priority INTEGER NOT NULL,
        task_date TEXT NOT NULL,
        task_desc TEXT,
        userId INTEGER NOT NULL
    )
    "#,
];
