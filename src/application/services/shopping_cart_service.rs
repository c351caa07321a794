//! Shopping cart membership.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::ShoppingCartEntry;
use crate::domain::repositories::{RecipeRepository, ShoppingCartRepository};
use crate::error::AppError;

/// Adds recipes to and removes them from users' shopping carts.
pub struct ShoppingCartService<C, R>
where
    C: ShoppingCartRepository + ?Sized,
    R: RecipeRepository + ?Sized,
{
    cart_repository: Arc<C>,
    recipe_repository: Arc<R>,
}

impl<C, R> ShoppingCartService<C, R>
where
    C: ShoppingCartRepository + ?Sized,
    R: RecipeRepository + ?Sized,
{
    pub fn new(cart_repository: Arc<C>, recipe_repository: Arc<R>) -> Self {
        Self {
            cart_repository,
            recipe_repository,
        }
    }

    /// Puts a recipe in the user's cart.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe does not exist
    /// - [`AppError::Conflict`] if the recipe is already in the cart
    pub async fn add(&self, user_id: i64, recipe_id: i64) -> Result<ShoppingCartEntry, AppError> {
        self.ensure_recipe(recipe_id).await?;
        self.cart_repository.add(user_id, recipe_id).await
    }

    /// Takes a recipe out of the user's cart.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe does not exist
    /// - [`AppError::Validation`] if the recipe is not in the cart
    pub async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        self.ensure_recipe(recipe_id).await?;

        if !self.cart_repository.remove(user_id, recipe_id).await? {
            return Err(AppError::bad_request(
                "Recipe is not in the shopping cart",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        Ok(())
    }

    async fn ensure_recipe(&self, recipe_id: i64) -> Result<(), AppError> {
        if self.recipe_repository.exists(recipe_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Recipe not found",
                json!({ "recipe_id": recipe_id }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockRecipeRepository, MockShoppingCartRepository};
    use chrono::Utc;

    fn recipes(exists: bool) -> MockRecipeRepository {
        let mut repo = MockRecipeRepository::new();
        repo.expect_exists().returning(move |_| Ok(exists));
        repo
    }

    #[tokio::test]
    async fn test_add_success() {
        let mut cart = MockShoppingCartRepository::new();
        cart.expect_add()
            .withf(|user, recipe| *user == 1 && *recipe == 2)
            .times(1)
            .returning(|user_id, recipe_id| {
                Ok(ShoppingCartEntry {
                    user_id,
                    recipe_id,
                    created_at: Utc::now(),
                })
            });

        let service = ShoppingCartService::new(Arc::new(cart), Arc::new(recipes(true)));
        let entry = service.add(1, 2).await.unwrap();

        assert_eq!(entry.recipe_id, 2);
    }

    #[tokio::test]
    async fn test_add_unknown_recipe() {
        let mut cart = MockShoppingCartRepository::new();
        cart.expect_add().never();

        let service = ShoppingCartService::new(Arc::new(cart), Arc::new(recipes(false)));

        assert!(matches!(
            service.add(1, 99).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_add_twice_conflicts() {
        let mut cart = MockShoppingCartRepository::new();
        cart.expect_add()
            .returning(|_, _| Err(AppError::conflict("Recipe is already in the shopping cart", json!({}))));

        let service = ShoppingCartService::new(Arc::new(cart), Arc::new(recipes(true)));

        assert!(matches!(
            service.add(1, 2).await,
            Err(AppError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_missing_entry_is_bad_request() {
        let mut cart = MockShoppingCartRepository::new();
        cart.expect_remove().times(1).returning(|_, _| Ok(false));

        let service = ShoppingCartService::new(Arc::new(cart), Arc::new(recipes(true)));

        assert!(matches!(
            service.remove(1, 2).await,
            Err(AppError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_success() {
        let mut cart = MockShoppingCartRepository::new();
        cart.expect_remove().times(1).returning(|_, _| Ok(true));

        let service = ShoppingCartService::new(Arc::new(cart), Arc::new(recipes(true)));

        assert!(service.remove(1, 2).await.is_ok());
    }
}
