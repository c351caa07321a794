//! Repository implementations.
//!
//! PostgreSQL implementations use runtime-checked SQLx queries over a shared
//! [`sqlx::PgPool`]. [`InMemoryStore`] implements every trait in-process.
//!
//! # Repositories
//!
//! - [`PgShortLinkRepository`] - Recipe short links
//! - [`PgShoppingCartRepository`] - Cart membership and the shopping list join
//! - [`PgRecipeRepository`] - Recipes with their ingredient lines
//! - [`PgIngredientRepository`] - Ingredient search and bulk import
//! - [`PgTagRepository`] - Tags and recipe tags
//! - [`PgFavoriteRepository`] - Favorite recipes
//! - [`PgSubscriptionRepository`] - Subscriptions to authors
//! - [`InMemoryStore`] - All of the above without a database

pub mod memory_store;
pub mod pg_favorite_repository;
pub mod pg_ingredient_repository;
pub mod pg_recipe_repository;
pub mod pg_shopping_cart_repository;
pub mod pg_short_link_repository;
pub mod pg_subscription_repository;
pub mod pg_tag_repository;

pub use memory_store::InMemoryStore;
pub use pg_favorite_repository::PgFavoriteRepository;
pub use pg_ingredient_repository::PgIngredientRepository;
pub use pg_recipe_repository::PgRecipeRepository;
pub use pg_shopping_cart_repository::PgShoppingCartRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
pub use pg_subscription_repository::PgSubscriptionRepository;
pub use pg_tag_repository::PgTagRepository;
