//! Handlers for the shopping cart and its CSV export.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::shopping_cart::ShoppingCartResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_user::CurrentUser;

/// File name offered to the browser for the exported list.
pub const EXPORT_FILE_NAME: &str = "exported_data.csv";

/// Adds a recipe to the current user's shopping cart.
///
/// # Endpoint
///
/// `POST /api/recipes/{id}/shopping_cart`
///
/// # Response Codes
///
/// - **201 Created**: Added
/// - **404 Not Found**: Unknown recipe
/// - **409 Conflict**: Already in the cart
pub async fn add_to_cart_handler(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(recipe_id): Path<i64>,
) -> Result<(StatusCode, Json<ShoppingCartResponse>), AppError> {
    let entry = state.shopping_cart_service.add(user_id, recipe_id).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// Removes a recipe from the current user's shopping cart.
///
/// # Endpoint
///
/// `DELETE /api/recipes/{id}/shopping_cart`
///
/// # Response Codes
///
/// - **204 No Content**: Removed
/// - **400 Bad Request**: The recipe was not in the cart
/// - **404 Not Found**: Unknown recipe
pub async fn remove_from_cart_handler(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(recipe_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.shopping_cart_service.remove(user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Downloads the current user's aggregated shopping list as CSV.
///
/// # Endpoint
///
/// `GET /api/recipes/download_shopping_cart`
///
/// # Response
///
/// `text/csv` attachment: a UTF-8 byte-order mark, then one
/// `"<name>, <unit>",<total>` row per ingredient. An empty cart downloads
/// a file holding only the byte-order mark.
pub async fn download_shopping_cart_handler(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let body = state.shopping_list_service.export_csv(user_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}
