/// Expense category endpoints
///
/// # Endpoints
///
/// - `GET /category?id=` or `GET /category?userId=` - List categories
/// - `POST /category?expense_category=&category_description=&userId=&categoryColor=[&category_budget=][&edit=1]` - Create or edit a category

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
    db::Database,
    models::category::{CategoryDetails, ExpenseCategory},
};
use tracing::{info, warn};

/// Status for every branch of the category endpoints
pub mod status {
    use axum::http::StatusCode;

    pub const LISTED: StatusCode = StatusCode::OK;
    pub const NONE_FOUND: StatusCode = StatusCode::NOT_FOUND;
    pub const MISSING_SELECTOR: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;
    pub const LIST_FAILED: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

    pub const ALREADY_EXISTS: StatusCode = StatusCode::ACCEPTED;
    pub const EDITED: StatusCode = StatusCode::OK;
    pub const CREATED: StatusCode = StatusCode::OK;
    pub const EXISTENCE_CHECK_FAILED: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;
    pub const WRITE_FAILED: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;
}

/// Dispatches `/category` by method
pub async fn handle(
    State(state): State<AppState>,
    method: Method,
    Query(params): Query<QueryParams>,
) -> ApiResult<Response> {
    let db = state.db.as_ref();

    match method {
        Method::GET => list_categories(db, &params).await,
        Method::POST => save_category(db, &params).await,
        _ => Err(ApiError::InvalidMethod),
    }
}

/// Lists categories by `id`, or else by `userId`
///
/// # Responses
///
/// - `200`: JSON array of categories
/// - `404`: `No categories found`
/// - `500`: neither `id` nor `userId` given, or the query failed
async fn list_categories(db: &dyn Database, params: &QueryParams) -> ApiResult<Response> {
    let result = if let Some(id) = params.get("id") {
        ExpenseCategory::list_by_id(db, id).await
    } else if let Some(user_id) = params.get("userId") {
        ExpenseCategory::list_by_user(db, user_id).await
    } else {
        return Err(ApiError::caught(
            status::MISSING_SELECTOR,
            "Error: Missing id or userId in URL parameters",
        ));
    };

    let categories = result.map_err(|err| {
        warn!(error = %err, "Category listing failed");
        ApiError::caught(status::LIST_FAILED, err.to_string())
    })?;

    if categories.is_empty() {
        return Ok(respond::text(status::NONE_FOUND, "No categories found"));
    }

    respond::json(status::LISTED, &categories)
}

fn details_from(params: &QueryParams) -> ApiResult<CategoryDetails> {
    let field = |name| params.require(name).map(str::to_string);

    Ok(CategoryDetails {
        name: field("expense_category")?,
        description: field("category_description")?,
        user_id: params.require_int("userId")?,
        color: field("categoryColor")?,
        budget: params.int("category_budget")?.unwrap_or(0),
    })
}

/// Creates a category, or edits it when it exists and `edit=1`
///
/// # Responses
///
/// - `200`: `Expense category was added successfully`, or the edited rows as JSON
/// - `202`: `Category already exists` (existing row left unchanged)
/// - `400`: a required field is missing or not an integer
/// - `500`: the database failed
async fn save_category(db: &dyn Database, params: &QueryParams) -> ApiResult<Response> {
    let details = details_from(params)?;
    let edit = params.int("edit")?.unwrap_or(0);

    let existing = ExpenseCategory::list_by_name(db, &details.name, details.user_id)
        .await
        .map_err(|err| {
            warn!(error = %err, "Category existence check failed");
            ApiError::caught(status::EXISTENCE_CHECK_FAILED, err.to_string())
        })?;

    if !existing.is_empty() {
        if edit != 1 {
            return Ok(respond::text(status::ALREADY_EXISTS, "Category already exists"));
        }

        ExpenseCategory::update_details(db, &details)
            .await
            .map_err(|err| ApiError::database(status::WRITE_FAILED, &err))?;
        info!(category = %details.name, user_id = details.user_id, "Edited category");

        let edited = ExpenseCategory::list_by_name(db, &details.name, details.user_id)
            .await
            .map_err(|err| ApiError::caught(status::EXISTENCE_CHECK_FAILED, err.to_string()))?;

        return respond::json(status::EDITED, &edited);
    }

    ExpenseCategory::create(db, &details)
        .await
        .map_err(|err| ApiError::database(status::WRITE_FAILED, &err))?;
    info!(category = %details.name, user_id = details.user_id, "Created category");

    Ok(respond::text(
        status::CREATED,
        "Expense category was added successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_missing_selector_is_server_error() {
        assert_eq!(status::MISSING_SELECTOR, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status::ALREADY_EXISTS, StatusCode::ACCEPTED);
    }

    #[test]
    fn test_details_defaults() {
        let params: QueryParams = [
            ("expense_category", "Food"),
            ("category_description", "Meals"),
            ("userId", "2"),
            ("categoryColor", "red"),
        ]
        .into_iter()
        .collect();

        let details = details_from(&params).unwrap();
        assert_eq!(details.budget, 0);
        assert_eq!(details.user_id, 2);
    }

    #[test]
    fn test_details_require_color() {
        let params: QueryParams = [
            ("expense_category", "Food"),
            ("category_description", "Meals"),
            ("userId", "2"),
        ]
        .into_iter()
        .collect();

        let err = details_from(&params).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing categoryColor");
    }
}
