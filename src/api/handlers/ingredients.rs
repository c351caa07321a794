//! Handler for ingredient search.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::ingredient::{IngredientResponse, IngredientSearchParams};
use crate::error::AppError;
use crate::state::AppState;

/// Lists ingredients by case-insensitive name prefix.
///
/// # Endpoint
///
/// `GET /api/ingredients?name={prefix}&limit={n}`
pub async fn ingredient_list_handler(
    State(state): State<AppState>,
    Query(params): Query<IngredientSearchParams>,
) -> Result<Json<Vec<IngredientResponse>>, AppError> {
    let ingredients = state
        .ingredient_service
        .search(params.name.as_deref().unwrap_or_default(), params.limit)
        .await?;

    Ok(Json(ingredients.into_iter().map(Into::into).collect()))
}
