//! Handlers for short link redirect and lookup.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};

use crate::api::dto::short_link::ShortLinkResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::extract_host_from_headers;

/// Redirects a short link to its recipe page.
///
/// # Endpoint
///
/// `GET /s/{token}`
///
/// # Request Flow
///
/// 1. Check cache for the recipe id (key `shortlink:{token}`)
/// 2. On cache miss, query the database and back-fill the cache
/// 3. Return 307 Temporary Redirect to `/recipes/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the token is unknown.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let recipe_id = state.short_link_service.resolve(&token).await?;

    Ok(Redirect::temporary(&format!("/recipes/{recipe_id}")))
}

/// Returns the absolute short link of a recipe.
///
/// # Endpoint
///
/// `GET /api/recipes/{id}/get-link`
///
/// # Response
///
/// ```json
/// { "short-link": "foodgram.example.com/s/aB3xYz" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the recipe has no short link.
pub async fn get_link_handler(
    Path(recipe_id): Path<i64>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ShortLinkResponse>, AppError> {
    let link = state.short_link_service.link_for_recipe(recipe_id).await?;
    let base = public_base(&state, &headers)?;

    Ok(Json(ShortLinkResponse {
        short_link: state.short_link_service.short_url(&base, &link.token),
    }))
}

/// Base for absolute short links: the configured public URL, else the request host.
pub(crate) fn public_base(state: &AppState, headers: &HeaderMap) -> Result<String, AppError> {
    match &state.public_base_url {
        Some(base) => Ok(base.clone()),
        None => extract_host_from_headers(headers),
    }
}
