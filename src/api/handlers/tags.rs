//! Read-only tag handlers. Tags are managed through the admin CLI.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::tag::TagResponse;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/tags`
pub async fn tag_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, AppError> {
    let tags = state.tag_service.list().await?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

/// `GET /api/tags/{id}`, 404 for an unknown tag.
pub async fn tag_get_handler(
    State(state): State<AppState>,
    Path(tag_id): Path<i64>,
) -> Result<Json<TagResponse>, AppError> {
    Ok(Json(state.tag_service.get(tag_id).await?.into()))
}
