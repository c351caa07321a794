//! DTOs for short link endpoints.

use serde::Serialize;

/// Absolute short link of a recipe.
#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}
