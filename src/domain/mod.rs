//! Domain layer containing business entities and logic.
//!
//! This module has no dependencies on infrastructure or presentation layers.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`shopping_list`] - Ingredient aggregation for shopping list export
//!
//! # Shopping List Flow
//!
//! 1. [`repositories::ShoppingCartRepository::ingredient_lines_for_user`] joins
//!    cart → recipes → ingredient lines in one query
//! 2. [`shopping_list::ShoppingList::aggregate`] folds the lines into totals keyed
//!    by (ingredient name, measurement unit)
//! 3. The application layer renders the totals as CSV

pub mod entities;
pub mod repositories;
pub mod shopping_list;
