/// Response builders shared by the resource handlers
///
/// Content types are set explicitly (`text/plain` or `application/json`
/// without a charset) since clients compare the header literally.

use crate::error::{ApiError, ApiResult};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

fn text_plain() -> HeaderValue {
    HeaderValue::from_static("text/plain")
}

fn application_json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// Plain text response
pub fn text(status: StatusCode, body: impl Into<String>) -> Response {
    (status, [(header::CONTENT_TYPE, text_plain())], body.into()).into_response()
}

/// Plain text body labelled `application/json`
pub fn labelled_json(status: StatusCode, body: impl Into<String>) -> Response {
    (status, [(header::CONTENT_TYPE, application_json())], body.into()).into_response()
}

/// JSON response
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> ApiResult<Response> {
    let body = serde_json::to_string(value)
        .map_err(|err| ApiError::caught(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;

    Ok((status, [(header::CONTENT_TYPE, application_json())], body).into_response())
}
