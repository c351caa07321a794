//! Repository trait for recipe data access.

use crate::domain::entities::{NewRecipe, Recipe, RecipeFilter, RecipeIngredientAmount};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Creates a recipe with its ingredient lines and tags atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if an ingredient or tag does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_recipe: NewRecipe) -> Result<Recipe, AppError>;

    /// Finds a recipe by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, recipe_id: i64) -> Result<Option<Recipe>, AppError>;

    /// Returns whether a recipe exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, recipe_id: i64) -> Result<bool, AppError>;

    /// Deletes a recipe together with its ingredient lines, tags, cart
    /// entries, favorites and short link.
    ///
    /// Returns `Ok(false)` if the recipe did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, recipe_id: i64) -> Result<bool, AppError>;

    /// Lists recipes matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, filter: RecipeFilter) -> Result<Vec<Recipe>, AppError>;

    /// Returns the ingredients of the given recipes in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn ingredients_for(
        &self,
        recipe_ids: &[i64],
    ) -> Result<Vec<RecipeIngredientAmount>, AppError>;

    /// Counts the recipes of one author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError>;

    /// Counts all recipes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
