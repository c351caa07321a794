//! Recipe creation and deletion.
//!
//! Creating a recipe also gives it a short link: a recipe that cannot be
//! linked is not kept.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::application::services::ShortLinkService;
use crate::domain::entities::{NewRecipe, Recipe, ShortLink};
use crate::domain::repositories::{
    IngredientRepository, RecipeRepository, ShortLinkRepository, TagRepository,
};
use crate::error::AppError;

pub struct RecipeService<R, I, T, S>
where
    R: RecipeRepository + ?Sized,
    I: IngredientRepository + ?Sized,
    T: TagRepository + ?Sized,
    S: ShortLinkRepository + ?Sized,
{
    recipe_repository: Arc<R>,
    ingredient_repository: Arc<I>,
    tag_repository: Arc<T>,
    short_links: Arc<ShortLinkService<S>>,
}

impl<R, I, T, S> RecipeService<R, I, T, S>
where
    R: RecipeRepository + ?Sized,
    I: IngredientRepository + ?Sized,
    T: TagRepository + ?Sized,
    S: ShortLinkRepository + ?Sized,
{
    pub fn new(
        recipe_repository: Arc<R>,
        ingredient_repository: Arc<I>,
        tag_repository: Arc<T>,
        short_links: Arc<ShortLinkService<S>>,
    ) -> Self {
        Self {
            recipe_repository,
            ingredient_repository,
            tag_repository,
            short_links,
        }
    }

    /// Validates and stores a recipe, then assigns its short link.
    ///
    /// If no short link can be generated the recipe is deleted again and the
    /// generation error is returned.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the recipe has no ingredients or no tags,
    ///   repeats an ingredient or tag, references an unknown one, or has an
    ///   amount or cooking time below 1
    /// - [`AppError::LinkGenerationExhausted`] if no free token was found
    /// - [`AppError::Internal`] on database errors
    pub async fn create(&self, new_recipe: NewRecipe) -> Result<(Recipe, ShortLink), AppError> {
        validate_recipe(&new_recipe)?;

        let ids: Vec<i64> = new_recipe
            .ingredients
            .iter()
            .map(|line| line.ingredient_id)
            .collect();
        let missing = self.ingredient_repository.find_missing(&ids).await?;
        if !missing.is_empty() {
            return Err(AppError::bad_request(
                "Unknown ingredient",
                json!({ "ingredient_ids": missing }),
            ));
        }

        let missing_tags = self.tag_repository.find_missing(&new_recipe.tags).await?;
        if !missing_tags.is_empty() {
            return Err(AppError::bad_request(
                "Unknown tag",
                json!({ "tag_ids": missing_tags }),
            ));
        }

        let recipe = self.recipe_repository.create(new_recipe).await?;

        match self.short_links.generate(recipe.id).await {
            Ok(link) => {
                info!(recipe_id = recipe.id, token = %link.token, "Recipe created");
                Ok((recipe, link))
            }
            Err(e) => {
                warn!(recipe_id = recipe.id, error = %e, "Short link generation failed, discarding recipe");
                if let Err(cleanup) = self.recipe_repository.delete(recipe.id).await {
                    warn!(recipe_id = recipe.id, error = %cleanup, "Failed to discard unlinked recipe");
                }
                Err(e)
            }
        }
    }

    /// Deletes a recipe along with its cart entries and short link.
    ///
    /// Only the author may delete a recipe.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe does not exist
    /// - [`AppError::Forbidden`] if `user_id` is not the author
    pub async fn delete(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        let recipe = self
            .recipe_repository
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Recipe not found", json!({ "recipe_id": recipe_id }))
            })?;

        if recipe.author_id != user_id {
            return Err(AppError::forbidden(
                "Only the author can delete a recipe",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        let token = match self.short_links.link_for_recipe(recipe_id).await {
            Ok(link) => Some(link.token),
            Err(AppError::NotFound { .. }) => None,
            Err(e) => return Err(e),
        };

        if let Some(token) = &token {
            self.short_links.forget(token).await;
        }

        if !self.recipe_repository.delete(recipe_id).await? {
            return Err(AppError::not_found(
                "Recipe not found",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        // A redirect that read the link before the delete may have cached it.
        if let Some(token) = &token {
            self.short_links.forget(token).await;
        }

        info!(recipe_id, "Recipe deleted");
        Ok(())
    }

    /// Counts all recipes.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.recipe_repository.count().await
    }
}

fn validate_recipe(recipe: &NewRecipe) -> Result<(), AppError> {
    if recipe.ingredients.is_empty() {
        return Err(AppError::bad_request(
            "A recipe needs at least one ingredient",
            json!({ "field": "ingredients" }),
        ));
    }

    let mut seen = HashSet::with_capacity(recipe.ingredients.len());
    for line in &recipe.ingredients {
        if !seen.insert(line.ingredient_id) {
            return Err(AppError::bad_request(
                "Ingredients must not repeat",
                json!({ "ingredient_id": line.ingredient_id }),
            ));
        }
        if line.amount < 1 {
            return Err(AppError::bad_request(
                "Ingredient amount must be at least 1",
                json!({ "ingredient_id": line.ingredient_id, "amount": line.amount }),
            ));
        }
    }

    if recipe.tags.is_empty() {
        return Err(AppError::bad_request(
            "A recipe needs at least one tag",
            json!({ "field": "tags" }),
        ));
    }

    let mut seen_tags = HashSet::with_capacity(recipe.tags.len());
    for tag_id in &recipe.tags {
        if !seen_tags.insert(*tag_id) {
            return Err(AppError::bad_request(
                "Tags must not repeat",
                json!({ "tag_id": tag_id }),
            ));
        }
    }

    if recipe.cooking_time < 1 {
        return Err(AppError::bad_request(
            "Cooking time must be at least 1 minute",
            json!({ "cooking_time": recipe.cooking_time }),
        ));
    }

    Ok(())
}
