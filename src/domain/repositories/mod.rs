//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented in `crate::infrastructure::persistence`.
//!
//! # Available Repositories
//!
//! - [`ShortLinkRepository`] - Recipe short links
//! - [`ShoppingCartRepository`] - Cart membership and the shopping list join
//! - [`RecipeRepository`] - Recipes and their ingredient lines
//! - [`IngredientRepository`] - Ingredient reference data
//! - [`TagRepository`] - Tags and recipe tags
//! - [`FavoriteRepository`] - Favorite recipes
//! - [`SubscriptionRepository`] - Subscriptions to authors
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` under `cfg(test)`.
//! PostgreSQL integration tests live in `tests/repository_*.rs`.

pub mod favorite_repository;
pub mod ingredient_repository;
pub mod recipe_repository;
pub mod shopping_cart_repository;
pub mod short_link_repository;
pub mod subscription_repository;
pub mod tag_repository;

pub use favorite_repository::FavoriteRepository;
pub use ingredient_repository::IngredientRepository;
pub use recipe_repository::RecipeRepository;
pub use shopping_cart_repository::ShoppingCartRepository;
pub use short_link_repository::ShortLinkRepository;
pub use subscription_repository::SubscriptionRepository;
pub use tag_repository::TagRepository;

#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
#[cfg(test)]
pub use shopping_cart_repository::MockShoppingCartRepository;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
