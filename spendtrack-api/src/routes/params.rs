/// Query string access for the resource handlers
///
/// Every input arrives as a URL query parameter. A parameter given with an
/// empty value counts as absent, and integers are read the lenient way the
/// existing clients rely on: leading whitespace and sign, then digits, with
/// anything after the digits ignored (`"12abc"` → 12).

use crate::error::{ApiError, ApiResult};
use axum::http::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;

/// Decoded query parameters of one request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Returns the value of `name` unless it is absent or empty
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns the value of `name`, or a 400 naming the parameter
    pub fn require(&self, name: &str) -> ApiResult<&str> {
        self.get(name)
            .ok_or_else(|| ApiError::missing(StatusCode::BAD_REQUEST, format!("Missing {name}")))
    }

    /// Reads `name` as an integer if present
    pub fn int(&self, name: &'static str) -> ApiResult<Option<i64>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => parse_leading_int(value)
                .map(Some)
                .ok_or_else(|| ApiError::InvalidParameter {
                    name,
                    value: value.to_string(),
                }),
        }
    }

    /// Reads a required integer parameter
    pub fn require_int(&self, name: &'static str) -> ApiResult<i64> {
        self.require(name)?;
        self.int(name)?
            .ok_or_else(|| ApiError::missing(StatusCode::BAD_REQUEST, format!("Missing {name}")))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QueryParams(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Parses the integer prefix of `value`
///
/// Returns `None` when no digit follows the optional sign or the number does
/// not fit in an `i64`.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
