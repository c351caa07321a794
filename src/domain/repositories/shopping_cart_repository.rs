//! Repository trait for shopping cart data access.

use crate::domain::entities::{IngredientLine, ShoppingCartEntry};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for users' shopping carts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingCartRepository: Send + Sync {
    /// Puts a recipe in a user's cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the recipe is already in the cart.
    /// Returns [`AppError::Internal`] on database errors.
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<ShoppingCartEntry, AppError>;

    /// Removes a recipe from a user's cart.
    ///
    /// Returns `Ok(false)` if the recipe was not in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;

    /// Returns whether a recipe is in a user's cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn contains(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;

    /// Returns the subset of `recipe_ids` in the user's cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn in_cart_among(&self, user_id: i64, recipe_ids: &[i64]) -> Result<Vec<i64>, AppError>;

    /// Returns every ingredient line of every recipe in a user's cart.
    ///
    /// Resolved with a single join (cart → recipe → ingredient line →
    /// ingredient), never one query per recipe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn ingredient_lines_for_user(&self, user_id: i64)
    -> Result<Vec<IngredientLine>, AppError>;
}
