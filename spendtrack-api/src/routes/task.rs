/// Task endpoints
///
/// # Endpoints
///
/// - `GET /tasks?userId=[&search_str=][&task_category=][&time_range=][&sort_priority=][&count=]` - List tasks
/// - `POST /tasks?task_title=&userId=&task_category=&task_priority=&task_date=&task_desc=` - Create a task
/// - `DELETE /tasks?task_id=` - Delete a task
///
/// `time_range` is one of `today`, `tomorrow`, `this_week` or `this_month`
/// and filters on `task_date`. Any other value selects the last 24 hours.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, BodyType},
    routes::{params::QueryParams, respond},
};
use axum::{
    extract::{Query, State},
    http::Method,
    response::Response,
};
use chrono::{DateTime, Utc};
use spendtrack_shared::{
    clock::{self, TimeRange},
    db::Database,
    models::task::{NewTask, TaskEntry, TaskFilter},
};
use tracing::{debug, info, warn};

/// Status for every branch of the task endpoints
pub mod status {
    use axum::http::StatusCode;

    pub const LISTED: StatusCode = StatusCode::OK;
    pub const MISSING_USER_ID: StatusCode = StatusCode::BAD_REQUEST;
    pub const LIST_FAILED: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

    pub const CREATED: StatusCode = StatusCode::OK;
    pub const WRITE_FAILED: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

    pub const DELETED: StatusCode = StatusCode::OK;
    pub const MISSING_TASK_ID: StatusCode = StatusCode::BAD_REQUEST;
    pub const NOT_FOUND: StatusCode = StatusCode::NOT_FOUND;
}

/// Dispatches `/tasks` by method
pub async fn handle(
    State(state): State<AppState>,
    method: Method,
    Query(params): Query<QueryParams>,
) -> ApiResult<Response> {
    let db = state.db.as_ref();

    match method {
        Method::GET => list_tasks(db, &params).await,
        Method::POST => create_task(db, &params).await,
        Method::DELETE => delete_task(db, &params).await,
        _ => Err(ApiError::InvalidMethod),
    }
}

fn filter_from(params: &QueryParams, now: DateTime<Utc>) -> ApiResult<TaskFilter> {
    Ok(TaskFilter {
        user_id: params.require_int("userId")?,
        search: params.get("search_str").map(str::to_string),
        category: params.get("task_category").map(str::to_string),
        window: params
            .get("time_range")
            .map(|range| TimeRange::parse(range).window(now)),
        sort_by_priority: params.get("sort_priority").is_some(),
        limit: params.int("count")?,
    })
}

/// Lists a user's tasks
///
/// # Responses
///
/// - `200`: JSON array of tasks
/// - `400`: `userId` missing (no query is run)
/// - `500`: raw database error
async fn list_tasks(db: &dyn Database, params: &QueryParams) -> ApiResult<Response> {
    if params.get("userId").is_none() {
        return Err(ApiError::missing(status::MISSING_USER_ID, "Missing user id"));
    }

    let filter = filter_from(params, Utc::now())?;
    debug!(?filter, "Listing tasks");

    let tasks = TaskEntry::list(db, &filter).await.map_err(|err| {
        warn!(error = %err, "Task listing failed");
        ApiError::database_as(status::LIST_FAILED, &err, BodyType::Json)
    })?;

    respond::json(status::LISTED, &tasks)
}

fn new_task_from(params: &QueryParams, created_at: String) -> ApiResult<NewTask> {
    let field = |name| params.require(name).map(str::to_string);

    Ok(NewTask {
        title: field("task_title")?,
        user_id: params.require_int("userId")?,
        category: field("task_category")?,
        priority: params.require_int("task_priority")?,
        due_date: field("task_date")?,
        description: field("task_desc")?,
        created_at,
    })
}

/// Creates a task
///
/// # Responses
///
/// - `200`: `Task entry was added successfully`
/// - `400`: a required field is missing or not an integer
/// - `500`: raw database error
async fn create_task(db: &dyn Database, params: &QueryParams) -> ApiResult<Response> {
    let task = new_task_from(params, clock::creation_timestamp(Utc::now()))?;

    TaskEntry::create(db, &task).await.map_err(|err| {
        warn!(error = %err, "Task insert failed");
        ApiError::database(status::WRITE_FAILED, &err)
    })?;
    info!(user_id = task.user_id, priority = task.priority, "Created task");

    Ok(respond::text(
        status::CREATED,
        "Task entry was added successfully",
    ))
}

/// Deletes a task
///
/// # Responses
///
/// - `200`: `Task entry was deleted successfully`
/// - `400`: `task_id` missing
/// - `404`: no task with this ID
/// - `500`: raw database error
async fn delete_task(db: &dyn Database, params: &QueryParams) -> ApiResult<Response> {
    let task_id = params
        .get("task_id")
        .ok_or_else(|| ApiError::missing(status::MISSING_TASK_ID, "Missing task id"))?;

    let deleted = TaskEntry::delete(db, task_id)
        .await
        .map_err(|err| ApiError::database(status::WRITE_FAILED, &err))?;

    if deleted == 0 {
        return Ok(respond::text(
            status::NOT_FOUND,
            format!("No task entry was found with id: {task_id}"),
        ));
    }

    info!(%task_id, "Deleted task");
    Ok(respond::text(
        status::DELETED,
        "Task entry was deleted successfully",
    ))
}
