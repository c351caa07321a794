//! Current user extraction from HTTP request headers.
//!
//! Authentication happens upstream: the identity provider in front of this
//! service verifies the caller and forwards the user id in [`USER_ID_HEADER`].

use crate::AppError;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use serde_json::json;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extracts the authenticated user id from request headers.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] if the header is missing, is not valid
/// UTF-8, or is not a positive integer.
pub fn extract_user_id_from_headers(headers: &HeaderMap) -> Result<i64, AppError> {
    let value = headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| {
            AppError::unauthorized(
                "Authentication required",
                json!({ "reason": "User identity header is missing" }),
            )
        })?
        .to_str()
        .map_err(|_| {
            AppError::unauthorized(
                "Authentication required",
                json!({ "reason": "User identity header is not valid UTF-8" }),
            )
        })?;

    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::unauthorized(
            "Authentication required",
            json!({ "reason": "User identity header is invalid" }),
        )),
    }
}

/// Extractor for the authenticated user.
///
/// ```rust,ignore
/// async fn handler(CurrentUser(user_id): CurrentUser) { /* ... */ }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_user_id_from_headers(&parts.headers).map(CurrentUser)
    }
}

/// Extractor for endpoints open to anonymous callers.
///
/// A missing header yields `None`; a present but invalid one is still rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalUser(pub Option<i64>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(USER_ID_HEADER) {
            return Ok(OptionalUser(None));
        }
        extract_user_id_from_headers(&parts.headers).map(|id| OptionalUser(Some(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_user_id() {
        assert_eq!(extract_user_id_from_headers(&headers_with("42")).unwrap(), 42);
    }

    #[test]
    fn test_extract_user_id_trims_whitespace() {
        assert_eq!(extract_user_id_from_headers(&headers_with(" 7 ")).unwrap(), 7);
    }

    #[test]
    fn test_missing_header() {
        let result = extract_user_id_from_headers(&HeaderMap::new());
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_non_numeric_header() {
        let result = extract_user_id_from_headers(&headers_with("alice"));
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_non_positive_header() {
        assert!(extract_user_id_from_headers(&headers_with("0")).is_err());
        assert!(extract_user_id_from_headers(&headers_with("-3")).is_err());
    }
}
