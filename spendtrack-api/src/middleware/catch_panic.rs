/// Converts handler panics into the legacy caught-failure response
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`. The body is
/// `Error: <panic message>\n[object Request]` with status 500.

use crate::error::ApiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;

pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    ApiError::caught(StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {message}")).into_response()
}
