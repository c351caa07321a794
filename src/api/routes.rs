//! API route configuration.
//!
//! Write endpoints and per-user lists identify the caller through
//! [`crate::utils::extract_user::CurrentUser`]; recipe reads accept
//! anonymous callers via [`crate::utils::extract_user::OptionalUser`].

use crate::api::handlers::{
    add_favorite_handler, add_to_cart_handler, create_recipe_handler, delete_recipe_handler,
    download_shopping_cart_handler, get_link_handler, get_recipe_handler,
    ingredient_list_handler, list_recipes_handler, remove_favorite_handler,
    remove_from_cart_handler, subscribe_handler, subscription_list_handler, tag_get_handler,
    tag_list_handler, unsubscribe_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All routes nested under `/api`.
///
/// # Endpoints
///
/// - `GET    /recipes`                        - List recipes (filters: author, tags, favorites, cart)
/// - `POST   /recipes`                        - Publish a recipe (gets a short link)
/// - `GET    /recipes/{id}`                   - Recipe with tags, ingredients and caller flags
/// - `DELETE /recipes/{id}`                   - Delete own recipe
/// - `GET    /recipes/{id}/get-link`          - Absolute short link of a recipe
/// - `POST   /recipes/{id}/favorite`          - Add recipe to favorites
/// - `DELETE /recipes/{id}/favorite`          - Remove recipe from favorites
/// - `POST   /recipes/{id}/shopping_cart`     - Add recipe to cart
/// - `DELETE /recipes/{id}/shopping_cart`     - Remove recipe from cart
/// - `GET    /recipes/download_shopping_cart` - Aggregated shopping list as CSV
/// - `GET    /ingredients`                    - Ingredient search by name prefix
/// - `GET    /tags`                           - All tags
/// - `GET    /tags/{id}`                      - One tag
/// - `POST   /users/{id}/subscribe`           - Follow an author
/// - `DELETE /users/{id}/subscribe`           - Stop following an author
/// - `GET    /users/subscriptions`            - Followed authors with their newest recipes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes",
            get(list_recipes_handler).post(create_recipe_handler),
        )
        .route(
            "/recipes/download_shopping_cart",
            get(download_shopping_cart_handler),
        )
        .route(
            "/recipes/{id}",
            get(get_recipe_handler).delete(delete_recipe_handler),
        )
        .route("/recipes/{id}/get-link", get(get_link_handler))
        .route(
            "/recipes/{id}/favorite",
            post(add_favorite_handler).delete(remove_favorite_handler),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(add_to_cart_handler).delete(remove_from_cart_handler),
        )
        .route("/ingredients", get(ingredient_list_handler))
        .route("/tags", get(tag_list_handler))
        .route("/tags/{id}", get(tag_get_handler))
        .route("/users/subscriptions", get(subscription_list_handler))
        .route(
            "/users/{id}/subscribe",
            post(subscribe_handler).delete(unsubscribe_handler),
        )
}

/// Public short link redirect, mounted at the root.
pub fn short_link_routes() -> Router<AppState> {
    Router::new().route("/s/{token}", get(crate::api::handlers::redirect_handler))
}
