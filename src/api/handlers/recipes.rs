//! Handlers for recipe publishing, reading and deletion.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use validator::Validate;

use crate::api::dto::recipe::{CreateRecipeRequest, RecipeListParams, RecipeResponse};
use crate::api::handlers::short_link::public_base;
use crate::application::services::RecipeDetails;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_user::{CurrentUser, OptionalUser};

/// Publishes a recipe and assigns its short link.
///
/// # Endpoint
///
/// `POST /api/recipes`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Pancakes",
///   "text": "Mix and fry",
///   "cooking_time": 20,
///   "ingredients": [{ "id": 1, "amount": 200 }],
///   "tags": [1]
/// }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: Recipe stored and linked
/// - **400 Bad Request**: Validation failed, unknown ingredient or tag
/// - **401 Unauthorized**: No authenticated user
/// - **500 Internal Server Error**: No free short link token
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    headers: HeaderMap,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), AppError> {
    payload.validate()?;

    let base = public_base(&state, &headers)?;
    let (recipe, _) = state
        .recipe_service
        .create(payload.into_new_recipe(user_id))
        .await?;
    let details = state
        .recipe_query_service
        .get(Some(user_id), recipe.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(render(&state, Some(base.as_str()), details)),
    ))
}

/// Returns one recipe with its tags, ingredients and the caller's flags.
///
/// # Endpoint
///
/// `GET /api/recipes/{id}`
///
/// # Response Codes
///
/// - **200 OK**: Found
/// - **401 Unauthorized**: Malformed `X-User-Id`
/// - **404 Not Found**: Unknown recipe
pub async fn get_recipe_handler(
    State(state): State<AppState>,
    OptionalUser(viewer): OptionalUser,
    Path(recipe_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<RecipeResponse>, AppError> {
    let details = state.recipe_query_service.get(viewer, recipe_id).await?;
    let base = public_base(&state, &headers).ok();

    Ok(Json(render(&state, base.as_deref(), details)))
}

/// Lists recipes newest first.
///
/// # Endpoint
///
/// `GET /api/recipes?author={id}&tags={slug,slug}&is_favorited=1&is_in_shopping_cart=1&limit={n}`
///
/// `is_favorited` and `is_in_shopping_cart` filter by the caller's own lists
/// and match nothing for anonymous callers.
pub async fn list_recipes_handler(
    State(state): State<AppState>,
    OptionalUser(viewer): OptionalUser,
    Query(params): Query<RecipeListParams>,
    headers: HeaderMap,
) -> Result<Json<Vec<RecipeResponse>>, AppError> {
    let recipes = state
        .recipe_query_service
        .list(viewer, params.into())
        .await?;
    let base = public_base(&state, &headers).ok();

    Ok(Json(
        recipes
            .into_iter()
            .map(|details| render(&state, base.as_deref(), details))
            .collect(),
    ))
}

/// Deletes a recipe together with its cart entries and short link.
///
/// # Endpoint
///
/// `DELETE /api/recipes/{id}`
///
/// # Response Codes
///
/// - **204 No Content**: Deleted
/// - **403 Forbidden**: Caller is not the author
/// - **404 Not Found**: Unknown recipe
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(recipe_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.recipe_service.delete(user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Without a known base the short link is left out.
fn render(state: &AppState, base: Option<&str>, mut details: RecipeDetails) -> RecipeResponse {
    let Some(base) = base else {
        details.short_link_token = None;
        return RecipeResponse::new(details, str::to_string);
    };

    RecipeResponse::new(details, |token| {
        state.short_link_service.short_url(base, token)
    })
}
