//! Handlers for the current user's favorites.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::recipe::ShortRecipeResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_user::CurrentUser;

/// Marks a recipe as a favorite of the current user.
///
/// # Endpoint
///
/// `POST /api/recipes/{id}/favorite`
///
/// # Response Codes
///
/// - **201 Created**: Added, body is the short recipe form
/// - **404 Not Found**: Unknown recipe
/// - **409 Conflict**: Already a favorite
pub async fn add_favorite_handler(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(recipe_id): Path<i64>,
) -> Result<(StatusCode, Json<ShortRecipeResponse>), AppError> {
    let recipe = state.favorite_service.add(user_id, recipe_id).await?;
    Ok((StatusCode::CREATED, Json(recipe.into())))
}

/// Removes a recipe from the current user's favorites.
///
/// # Endpoint
///
/// `DELETE /api/recipes/{id}/favorite`
///
/// # Response Codes
///
/// - **204 No Content**: Removed
/// - **400 Bad Request**: The recipe was not a favorite
/// - **404 Not Found**: Unknown recipe
pub async fn remove_favorite_handler(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(recipe_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.favorite_service.remove(user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
