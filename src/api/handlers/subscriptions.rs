//! Handlers for following authors.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::subscription::{SubscriptionParams, SubscriptionResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_user::CurrentUser;

/// Subscribes the current user to an author.
///
/// # Endpoint
///
/// `POST /api/users/{id}/subscribe?recipes_limit={n}`
///
/// # Response Codes
///
/// - **201 Created**: Subscribed, body summarizes the author
/// - **400 Bad Request**: Subscribing to yourself
/// - **409 Conflict**: Already subscribed
pub async fn subscribe_handler(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(author_id): Path<i64>,
    Query(params): Query<SubscriptionParams>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let summary = state
        .subscription_service
        .subscribe(user_id, author_id, params.recipes_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

/// Ends a subscription.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}/subscribe`
///
/// # Response Codes
///
/// - **204 No Content**: Unsubscribed
/// - **400 Bad Request**: Was not subscribed
pub async fn unsubscribe_handler(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(author_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .subscription_service
        .unsubscribe(user_id, author_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Authors the current user follows, with their newest recipes.
///
/// # Endpoint
///
/// `GET /api/users/subscriptions?recipes_limit={n}`
pub async fn subscription_list_handler(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<SubscriptionParams>,
) -> Result<Json<Vec<SubscriptionResponse>>, AppError> {
    let summaries = state
        .subscription_service
        .subscriptions(user_id, params.recipes_limit)
        .await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}
