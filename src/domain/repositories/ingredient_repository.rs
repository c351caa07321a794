//! Repository trait for ingredient reference data.

use crate::domain::entities::{Ingredient, NewIngredient};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Lists ingredients whose name starts with `prefix` (case-insensitive),
    /// ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn search(&self, prefix: &str, limit: i64) -> Result<Vec<Ingredient>, AppError>;

    /// Returns the ids from `ids` that match no ingredient.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_missing(&self, ids: &[i64]) -> Result<Vec<i64>, AppError>;

    /// Inserts ingredients in bulk and returns how many rows were written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_many(&self, ingredients: Vec<NewIngredient>) -> Result<u64, AppError>;

    /// Counts all ingredients.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
