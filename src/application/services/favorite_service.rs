//! Favorite recipes.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::Recipe;
use crate::domain::repositories::{FavoriteRepository, RecipeRepository};
use crate::error::AppError;

/// Marks recipes as favorites and unmarks them.
pub struct FavoriteService<F, R>
where
    F: FavoriteRepository + ?Sized,
    R: RecipeRepository + ?Sized,
{
    favorite_repository: Arc<F>,
    recipe_repository: Arc<R>,
}

impl<F, R> FavoriteService<F, R>
where
    F: FavoriteRepository + ?Sized,
    R: RecipeRepository + ?Sized,
{
    pub fn new(favorite_repository: Arc<F>, recipe_repository: Arc<R>) -> Self {
        Self {
            favorite_repository,
            recipe_repository,
        }
    }

    /// Marks a recipe as the user's favorite and returns it.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe does not exist
    /// - [`AppError::Conflict`] if it already is a favorite
    pub async fn add(&self, user_id: i64, recipe_id: i64) -> Result<Recipe, AppError> {
        let recipe = self.find_recipe(recipe_id).await?;
        self.favorite_repository.add(user_id, recipe_id).await?;
        Ok(recipe)
    }

    /// Unmarks a favorite.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe does not exist
    /// - [`AppError::Validation`] if the recipe is not a favorite
    pub async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        self.find_recipe(recipe_id).await?;

        if !self.favorite_repository.remove(user_id, recipe_id).await? {
            return Err(AppError::bad_request(
                "Recipe is not a favorite",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        Ok(())
    }

    async fn find_recipe(&self, recipe_id: i64) -> Result<Recipe, AppError> {
        self.recipe_repository
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Recipe not found", json!({ "recipe_id": recipe_id }))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FavoriteEntry;
    use crate::domain::repositories::{MockFavoriteRepository, MockRecipeRepository};
    use chrono::Utc;

    fn recipes(exists: bool) -> MockRecipeRepository {
        let mut repo = MockRecipeRepository::new();
        repo.expect_find_by_id().returning(move |id| {
            Ok(exists.then(|| Recipe {
                id,
                author_id: 1,
                name: "Soup".to_string(),
                text: "Boil".to_string(),
                cooking_time: 30,
                created_at: Utc::now(),
            }))
        });
        repo
    }

    #[tokio::test]
    async fn test_add_returns_recipe() {
        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_add()
            .withf(|user, recipe| *user == 4 && *recipe == 2)
            .times(1)
            .returning(|user_id, recipe_id| {
                Ok(FavoriteEntry {
                    user_id,
                    recipe_id,
                    created_at: Utc::now(),
                })
            });

        let service = FavoriteService::new(Arc::new(favorites), Arc::new(recipes(true)));
        let recipe = service.add(4, 2).await.unwrap();

        assert_eq!(recipe.id, 2);
        assert_eq!(recipe.name, "Soup");
    }

    #[tokio::test]
    async fn test_add_unknown_recipe() {
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_add().never();

        let service = FavoriteService::new(Arc::new(favorites), Arc::new(recipes(false)));

        assert!(matches!(
            service.add(4, 2).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_missing_favorite_is_bad_request() {
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_remove().times(1).returning(|_, _| Ok(false));

        let service = FavoriteService::new(Arc::new(favorites), Arc::new(recipes(true)));

        assert!(matches!(
            service.remove(4, 2).await,
            Err(AppError::Validation { .. })
        ));
    }
}
