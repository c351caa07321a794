//! Host extraction from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Returns the `Host` header as sent, port included.
///
/// Used to build absolute short links when no public base URL is configured.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the header is missing, is not valid
/// UTF-8, or contains characters that cannot appear in a host.
pub fn extract_host_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
        .trim();

    if host.is_empty() || host.contains(['/', '\\', '@', ' ']) {
        return Err(AppError::bad_request(
            "Invalid Host header",
            json!({ "host": host }),
        ));
    }

    Ok(host.to_string())
}
