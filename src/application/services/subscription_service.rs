//! Subscriptions to authors.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{RECIPE_LIST_LIMIT, Recipe, RecipeFilter};
use crate::domain::repositories::{RecipeRepository, SubscriptionRepository};
use crate::error::AppError;

/// An author as seen by a subscriber: the newest recipes and how many there are.
#[derive(Debug, Clone)]
pub struct AuthorSummary {
    pub author_id: i64,
    pub recipes_count: i64,
    pub recipes: Vec<Recipe>,
}

/// Lets users follow authors and lists whom they follow.
///
/// Users live with the identity provider, so any positive id is accepted as
/// an author.
pub struct SubscriptionService<S, R>
where
    S: SubscriptionRepository + ?Sized,
    R: RecipeRepository + ?Sized,
{
    subscription_repository: Arc<S>,
    recipe_repository: Arc<R>,
}

impl<S, R> SubscriptionService<S, R>
where
    S: SubscriptionRepository + ?Sized,
    R: RecipeRepository + ?Sized,
{
    pub fn new(subscription_repository: Arc<S>, recipe_repository: Arc<R>) -> Self {
        Self {
            subscription_repository,
            recipe_repository,
        }
    }

    /// Subscribes `subscriber_id` to `author_id` and returns the author's summary.
    ///
    /// `recipes_limit` caps the listed recipes (default and maximum 100).
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] when subscribing to yourself
    /// - [`AppError::Conflict`] if already subscribed
    pub async fn subscribe(
        &self,
        subscriber_id: i64,
        author_id: i64,
        recipes_limit: Option<i64>,
    ) -> Result<AuthorSummary, AppError> {
        if subscriber_id == author_id {
            return Err(AppError::bad_request(
                "Cannot subscribe to yourself",
                json!({ "author_id": author_id }),
            ));
        }

        self.subscription_repository
            .add(subscriber_id, author_id)
            .await?;
        info!(subscriber_id, author_id, "Subscribed");

        self.summary(author_id, recipes_limit).await
    }

    /// Ends a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if there was no subscription.
    pub async fn unsubscribe(&self, subscriber_id: i64, author_id: i64) -> Result<(), AppError> {
        if !self
            .subscription_repository
            .remove(subscriber_id, author_id)
            .await?
        {
            return Err(AppError::bad_request(
                "Not subscribed to this author",
                json!({ "author_id": author_id }),
            ));
        }

        Ok(())
    }

    /// Summaries of every author `subscriber_id` follows, oldest subscription first.
    pub async fn subscriptions(
        &self,
        subscriber_id: i64,
        recipes_limit: Option<i64>,
    ) -> Result<Vec<AuthorSummary>, AppError> {
        let authors = self.subscription_repository.authors_of(subscriber_id).await?;

        let mut summaries = Vec::with_capacity(authors.len());
        for author_id in authors {
            summaries.push(self.summary(author_id, recipes_limit).await?);
        }

        Ok(summaries)
    }

    async fn summary(
        &self,
        author_id: i64,
        recipes_limit: Option<i64>,
    ) -> Result<AuthorSummary, AppError> {
        let limit = recipes_limit
            .unwrap_or(RECIPE_LIST_LIMIT)
            .clamp(0, RECIPE_LIST_LIMIT);

        let recipes = if limit == 0 {
            Vec::new()
        } else {
            self.recipe_repository
                .list(RecipeFilter::by_author(author_id, limit))
                .await?
        };

        Ok(AuthorSummary {
            author_id,
            recipes_count: self.recipe_repository.count_by_author(author_id).await?,
            recipes,
        })
    }
}
