//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod favorites;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod shopping_cart;
pub mod short_link;
pub mod subscriptions;
pub mod tags;

pub use favorites::{add_favorite_handler, remove_favorite_handler};
pub use health::health_handler;
pub use ingredients::ingredient_list_handler;
pub use recipes::{
    create_recipe_handler, delete_recipe_handler, get_recipe_handler, list_recipes_handler,
};
pub use shopping_cart::{
    add_to_cart_handler, download_shopping_cart_handler, remove_from_cart_handler,
};
pub use short_link::{get_link_handler, redirect_handler};
pub use subscriptions::{subscribe_handler, subscription_list_handler, unsubscribe_handler};
pub use tags::{tag_get_handler, tag_list_handler};
