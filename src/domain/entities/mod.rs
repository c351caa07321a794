//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Creation inputs live in separate
//! `New*` structs.
//!
//! # Entity Types
//!
//! - [`Ingredient`] - Immutable ingredient reference data
//! - [`Recipe`] - A recipe and, via [`IngredientLine`], what it needs
//! - [`ShoppingCartEntry`] - A recipe in a user's shopping cart
//! - [`ShortLink`] - The shareable token of a recipe
//! - [`Tag`] - A label recipes are filed under
//! - [`FavoriteEntry`] - A recipe a user marked as favorite
//! - [`Subscription`] - A user following an author

pub mod favorite;
pub mod ingredient;
pub mod recipe;
pub mod shopping_cart;
pub mod short_link;
pub mod subscription;
pub mod tag;

pub use favorite::FavoriteEntry;
pub use ingredient::{Ingredient, NewIngredient};
pub use recipe::{
    IngredientLine, NewRecipe, RECIPE_LIST_LIMIT, Recipe, RecipeFilter, RecipeIngredient,
    RecipeIngredientAmount,
};
pub use shopping_cart::ShoppingCartEntry;
pub use short_link::{NewShortLink, ShortLink};
pub use subscription::Subscription;
pub use tag::{NewTag, Tag};
