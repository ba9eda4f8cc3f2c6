/// Error handling for the API server
///
/// Failure responses are plain text bodies whose status depends on the branch
/// that failed; each route module keeps its own status table and picks the
/// status when it builds the error. Handlers return `ApiResult<Response>`.
///
/// Database failures are passed through with the raw database message as the
/// body. Failures the handlers treat as caught exceptions carry the legacy
/// `"<message>\n[object Request]"` body that existing clients parse.
///
/// # Example
///
/// ```
/// use axum::http::StatusCode;
/// use spendtrack_api::error::{ApiError, ApiResult};
///
/// fn require(value: Option<&str>) -> ApiResult<&str> {
///     value.ok_or_else(|| ApiError::missing(StatusCode::BAD_REQUEST, "Missing user id"))
/// }
/// ```

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use spendtrack_shared::db::DbError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// How the request object renders when appended to a caught failure
pub const STRINGIFIED_REQUEST: &str = "[object Request]";

/// Content type announced on a failure response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Text,
    /// Plain text body labelled `application/json`
    Json,
}

impl BodyType {
    pub fn header_value(self) -> HeaderValue {
        match self {
            BodyType::Text => HeaderValue::from_static("text/plain"),
            BodyType::Json => HeaderValue::from_static("application/json"),
        }
    }
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required query parameter is absent
    #[error("{message}")]
    MissingParameter { status: StatusCode, message: String },

    /// A query parameter could not be parsed as an integer (400)
    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// The database reported an error; the body is its raw message
    #[error("{message}")]
    Database {
        status: StatusCode,
        message: String,
        body_type: BodyType,
    },

    /// A failure caught by the handler
    #[error("{message}\n{}", STRINGIFIED_REQUEST)]
    Caught { status: StatusCode, message: String },

    /// The resource does not support the HTTP method (400)
    #[error("Invalid request method")]
    InvalidMethod,
}

impl ApiError {
    pub fn missing(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::MissingParameter {
            status,
            message: message.into(),
        }
    }

    /// Database failure with a `text/plain` body
    pub fn database(status: StatusCode, err: &DbError) -> Self {
        Self::database_as(status, err, BodyType::Text)
    }

    pub fn database_as(status: StatusCode, err: &DbError, body_type: BodyType) -> Self {
        ApiError::Database {
            status,
            message: err.to_string(),
            body_type,
        }
    }

    pub fn caught(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::Caught {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of the response
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter { status, .. }
            | ApiError::Database { status, .. }
            | ApiError::Caught { status, .. } => *status,
            ApiError::InvalidParameter { .. } | ApiError::InvalidMethod => StatusCode::BAD_REQUEST,
        }
    }

    fn body_type(&self) -> BodyType {
        match self {
            ApiError::Database { body_type, .. } => *body_type,
            _ => BodyType::Text,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let content_type = self.body_type().header_value();
        (status, [(header::CONTENT_TYPE, content_type)], self.to_string()).into_response()
    }
}
