//! Repository trait for subscriptions to authors.

use crate::domain::entities::Subscription;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for subscriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Subscribes a user to an author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the subscription exists,
    /// [`AppError::Validation`] if `subscriber_id == author_id` and
    /// [`AppError::Internal`] on database errors.
    async fn add(&self, subscriber_id: i64, author_id: i64) -> Result<Subscription, AppError>;

    /// Ends a subscription. Returns `Ok(false)` if there was none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn remove(&self, subscriber_id: i64, author_id: i64) -> Result<bool, AppError>;

    /// Authors a user follows, oldest subscription first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn authors_of(&self, subscriber_id: i64) -> Result<Vec<i64>, AppError>;

    /// Counts all subscriptions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
