/// Expense entry endpoints
///
/// # Endpoints
///
/// - `GET /event?userId=[&expense_category=][&count=]` - List expenses, newest first
/// - `POST /event?expense_title=&userId=&expense_category=&expense_amount=&expense_desc=[&star_marked=true]` - Record an expense
/// - `DELETE /event?expense_id=` - Delete an expense

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{params::QueryParams, respond},
};
use axum::{
    extract::{Query, State},
    http::Method,
    response::Response,
};
use spendtrack_shared::{
    clock,
    db::Database,
    models::expense::{ExpenseEntry, ExpenseFilter, NewExpense},
};
use tracing::{debug, info, warn};

/// Status for every branch of the expense endpoints
pub mod status {
    use axum::http::StatusCode;

    pub const LISTED: StatusCode = StatusCode::OK;
    pub const MISSING_USER_ID: StatusCode = StatusCode::BAD_REQUEST;
    pub const LIST_FAILED: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

    pub const CREATED: StatusCode = StatusCode::OK;
    pub const WRITE_FAILED: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

    pub const DELETED: StatusCode = StatusCode::OK;
    pub const MISSING_EXPENSE_ID: StatusCode = StatusCode::BAD_REQUEST;
    pub const NOT_FOUND: StatusCode = StatusCode::NOT_FOUND;
}

/// Dispatches `/event` by method
pub async fn handle(
    State(state): State<AppState>,
    method: Method,
    Query(params): Query<QueryParams>,
) -> ApiResult<Response> {
    let db = state.db.as_ref();

    match method {
        Method::GET => list_expenses(db, &params).await,
        Method::POST => record_expense(db, &params).await,
        Method::DELETE => delete_expense(db, &params).await,
        _ => Err(ApiError::InvalidMethod),
    }
}

/// Lists a user's expenses
///
/// # Responses
///
/// - `200`: JSON array of expenses
/// - `400`: `userId` missing (no query is run)
/// - `500`: raw database error
async fn list_expenses(db: &dyn Database, params: &QueryParams) -> ApiResult<Response> {
    if params.get("userId").is_none() {
        return Err(ApiError::missing(status::MISSING_USER_ID, "Missing user id"));
    }

    let filter = ExpenseFilter {
        user_id: params.require_int("userId")?,
        category: params.get("expense_category").map(str::to_string),
        limit: params.int("count")?,
    };
    debug!(?filter, "Listing expenses");

    let expenses = ExpenseEntry::list(db, &filter).await.map_err(|err| {
        warn!(error = %err, "Expense listing failed");
        ApiError::database(status::LIST_FAILED, &err)
    })?;

    respond::json(status::LISTED, &expenses)
}

fn new_expense_from(params: &QueryParams, created_at: String) -> ApiResult<NewExpense> {
    let field = |name| params.require(name).map(str::to_string);

    Ok(NewExpense {
        title: field("expense_title")?,
        user_id: params.require_int("userId")?,
        category: field("expense_category")?,
        amount: params.require_int("expense_amount")?,
        description: field("expense_desc")?,
        star_marked: params
            .get("star_marked")
            .is_some_and(|value| value.eq_ignore_ascii_case("true")),
        created_at,
    })
}

/// Records an expense
///
/// # Responses
///
/// - `200`: `Expense entry was added successfully`
/// - `400`: a required field is missing or not an integer
/// - `500`: raw database error
async fn record_expense(db: &dyn Database, params: &QueryParams) -> ApiResult<Response> {
    let expense = new_expense_from(params, clock::creation_timestamp(chrono::Utc::now()))?;

    ExpenseEntry::create(db, &expense).await.map_err(|err| {
        warn!(error = %err, "Expense insert failed");
        ApiError::database(status::WRITE_FAILED, &err)
    })?;
    info!(user_id = expense.user_id, amount = expense.amount, "Recorded expense");

    Ok(respond::text(
        status::CREATED,
        "Expense entry was added successfully",
    ))
}

/// Deletes an expense
///
/// # Responses
///
/// - `200`: `Expense Entry was deleted successfully`
/// - `400`: `expense_id` missing
/// - `404`: no expense with this ID
/// - `500`: raw database error
async fn delete_expense(db: &dyn Database, params: &QueryParams) -> ApiResult<Response> {
    let expense_id = params
        .get("expense_id")
        .ok_or_else(|| ApiError::missing(status::MISSING_EXPENSE_ID, "Missing Expense Entry id"))?;

    let deleted = ExpenseEntry::delete(db, expense_id)
        .await
        .map_err(|err| ApiError::database(status::WRITE_FAILED, &err))?;

    if deleted == 0 {
        return Ok(respond::text(
            status::NOT_FOUND,
            format!("No Expense Entry found with id: {expense_id}"),
        ));
    }

    info!(%expense_id, "Deleted expense");
    Ok(respond::text(
        status::DELETED,
        "Expense Entry was deleted successfully",
    ))
}
