//! Repository trait for favorite recipes.

use crate::domain::entities::FavoriteEntry;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for users' favorite recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Marks a recipe as a user's favorite.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if it already is one,
    /// [`AppError::NotFound`] if the recipe does not exist and
    /// [`AppError::Internal`] on database errors.
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<FavoriteEntry, AppError>;

    /// Unmarks a favorite. Returns `Ok(false)` if it was not one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;

    /// Returns the subset of `recipe_ids` the user has favorited.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn favorited_among(&self, user_id: i64, recipe_ids: &[i64])
    -> Result<Vec<i64>, AppError>;

    /// Counts all favorites.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
