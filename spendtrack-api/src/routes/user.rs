/// User endpoints
///
/// # Endpoints
///
/// - `GET /user?email=` - Look up a user by email
/// - `POST /user?email=&UserName=` - Register a user
/// - `PUT /user?UserId=&UserName=` - Rename a user
/// - `DELETE /user?UserId=` - Delete a user
///
/// POST on an email that is already registered follows the configured
/// [`ConflictPolicy`]. The existence check and the write are separate
/// statements, so two concurrent registrations of one email can both insert.

use crate::{
    app::AppState,
    config::ConflictPolicy,
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
    models::user::{derive_name, NewUser, User},
};
use tracing::{info, warn};

/// Status for every branch of the user endpoints
pub mod status {
    use axum::http::StatusCode;

    pub const FOUND: StatusCode = StatusCode::OK;
    pub const NO_MATCH: StatusCode = StatusCode::ACCEPTED;
    pub const LOOKUP_FAILED: StatusCode = StatusCode::NOT_FOUND;
    pub const REREAD_FAILED: StatusCode = StatusCode::METHOD_NOT_ALLOWED;

    pub const MISSING_EMAIL: StatusCode = StatusCode::BAD_REQUEST;
    pub const ALREADY_EXISTS: StatusCode = StatusCode::CONFLICT;
    pub const CREATED: StatusCode = StatusCode::CREATED;
    pub const EXISTENCE_CHECK_FAILED: StatusCode = StatusCode::BAD_REQUEST;
    pub const QUERY_FAILED: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

    pub const UPDATED: StatusCode = StatusCode::OK;
    pub const NOT_FOUND: StatusCode = StatusCode::NOT_FOUND;
    pub const MISSING_USER_ID: StatusCode = StatusCode::BAD_REQUEST;
    pub const DELETED: StatusCode = StatusCode::OK;
}

/// Dispatches `/user` by method
pub async fn handle(
    State(state): State<AppState>,
    method: Method,
    Query(params): Query<QueryParams>,
) -> ApiResult<Response> {
    let db = state.db.as_ref();

    match method {
        Method::GET => get_user(db, &params).await,
        Method::POST => register_user(db, state.config.users.conflict_policy, &params).await,
        Method::PUT => rename_user(db, &params).await,
        Method::DELETE => delete_user(db, &params).await,
        _ => Err(ApiError::InvalidMethod),
    }
}

/// Looks up a user by email
///
/// # Responses
///
/// - `200`: the first matching user as a JSON object
/// - `202`: `[]` when no user has this email
/// - `400`: `email` missing
/// - `404` / `405`: raw database error from the first / second read
async fn get_user(db: &dyn Database, params: &QueryParams) -> ApiResult<Response> {
    let email = params
        .get("email")
        .ok_or_else(|| ApiError::missing(status::MISSING_EMAIL, "Missing email"))?;

    let matches = User::list_by_email(db, email).await.map_err(|err| {
        warn!(error = %err, "User lookup failed");
        ApiError::database(status::LOOKUP_FAILED, &err)
    })?;

    if matches.is_empty() {
        return respond::json(status::NO_MATCH, &matches);
    }

    let user = User::find_by_email(db, email).await.map_err(|err| {
        warn!(error = %err, "User re-read failed");
        ApiError::database(status::REREAD_FAILED, &err)
    })?;

    match user {
        Some(user) => respond::json(status::FOUND, &user),
        None => respond::json(status::NO_MATCH, &Vec::<User>::new()),
    }
}

/// Registers a user, or resolves an existing email per `policy`
///
/// # Responses
///
/// - `201`: the created user, or under `upsert` the existing one, renamed
///   when `UserName` is given
/// - `409`: email already registered under `reject`
/// - `400`: `email` missing, or the existence check failed
/// - `500`: raw database error from the write or the re-read
async fn register_user(
    db: &dyn Database,
    policy: ConflictPolicy,
    params: &QueryParams,
) -> ApiResult<Response> {
    let email = params
        .get("email")
        .ok_or_else(|| ApiError::missing(status::MISSING_EMAIL, "Missing email"))?;

    let name = params.get("UserName");

    let existing = User::list_by_email(db, email).await.map_err(|err| {
        warn!(error = %err, "User existence check failed");
        ApiError::caught(status::EXISTENCE_CHECK_FAILED, err.to_string())
    })?;

    if !existing.is_empty() {
        match policy {
            ConflictPolicy::Reject => {
                return Ok(respond::labelled_json(
                    status::ALREADY_EXISTS,
                    "User already exists",
                ));
            }
            // Without a supplied name the stored one stays
            ConflictPolicy::Upsert => {
                if let Some(name) = name {
                    User::rename_by_email(db, email, name)
                        .await
                        .map_err(|err| ApiError::database(status::QUERY_FAILED, &err))?;
                    info!(%email, "Updated existing user name");
                }
            }
        }
    } else {
        let new_user = NewUser {
            name: name.map_or_else(|| derive_name(email), str::to_string),
            email: email.to_string(),
            registered_at: clock::format_timestamp(chrono::Utc::now()),
        };

        User::create(db, &new_user)
            .await
            .map_err(|err| ApiError::database(status::QUERY_FAILED, &err))?;
        info!(%email, "Registered user");
    }

    let user = User::find_by_email(db, email)
        .await
        .map_err(|err| ApiError::database(status::QUERY_FAILED, &err))?;

    respond::json(status::CREATED, &user)
}

/// Renames a user
///
/// # Responses
///
/// - `200`: the updated user
/// - `404`: `UserId` missing or no such user
/// - `500`: raw database error
async fn rename_user(db: &dyn Database, params: &QueryParams) -> ApiResult<Response> {
    let not_found = || respond::labelled_json(status::NOT_FOUND, "User does not exist");

    let Some(user_id) = params.int("UserId")? else {
        return Ok(not_found());
    };

    let existing = User::find_by_id(db, user_id)
        .await
        .map_err(|err| ApiError::database(status::QUERY_FAILED, &err))?;

    if existing.is_none() {
        return Ok(not_found());
    }

    User::rename(db, user_id, params.get("UserName"))
        .await
        .map_err(|err| ApiError::database(status::QUERY_FAILED, &err))?;
    info!(user_id, "Renamed user");

    let user = User::find_by_id(db, user_id)
        .await
        .map_err(|err| ApiError::database(status::QUERY_FAILED, &err))?;

    respond::json(status::UPDATED, &user)
}

/// Deletes a user
///
/// # Responses
///
/// - `200`: `User deleted successfully`
/// - `400`: `UserId` missing
/// - `404`: no such user
/// - `500`: raw database error
async fn delete_user(db: &dyn Database, params: &QueryParams) -> ApiResult<Response> {
    let user_id = params
        .int("UserId")?
        .ok_or_else(|| ApiError::missing(status::MISSING_USER_ID, "Missing user id"))?;

    let deleted = User::delete(db, user_id)
        .await
        .map_err(|err| ApiError::database(status::QUERY_FAILED, &err))?;

    if deleted == 0 {
        return Ok(respond::text(status::NOT_FOUND, "User does not exist"));
    }

    info!(user_id, "Deleted user");
    Ok(respond::text(status::DELETED, "User deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_table() {
        assert_eq!(status::NO_MATCH, StatusCode::ACCEPTED);
        assert_eq!(status::LOOKUP_FAILED, StatusCode::NOT_FOUND);
        assert_eq!(status::REREAD_FAILED, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(status::EXISTENCE_CHECK_FAILED, StatusCode::BAD_REQUEST);
        assert_eq!(status::QUERY_FAILED, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
