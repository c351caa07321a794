//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and enforce business rules. They are
//! generic over the repository traits so the same code runs against
//! PostgreSQL, the in-memory store, or mocks.
//!
//! # Available Services
//!
//! - [`services::ShortLinkService`] - Short link generation and resolution
//! - [`services::ShoppingListService`] - Shopping list aggregation and CSV export
//! - [`services::ShoppingCartService`] - Cart membership
//! - [`services::RecipeService`] - Recipe creation (with its short link) and deletion
//! - [`services::IngredientService`] - Ingredient search and bulk import

pub mod services;
