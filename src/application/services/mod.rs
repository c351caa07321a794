//! Business logic services for the application layer.

pub mod favorite_service;
pub mod ingredient_service;
pub mod recipe_query_service;
pub mod recipe_service;
pub mod shopping_cart_service;
pub mod shopping_list_service;
pub mod short_link_service;
pub mod subscription_service;
pub mod tag_service;

pub use favorite_service::FavoriteService;
pub use ingredient_service::IngredientService;
pub use recipe_query_service::{RecipeDetails, RecipeQuery, RecipeQueryService};
pub use recipe_service::RecipeService;
pub use shopping_cart_service::ShoppingCartService;
pub use shopping_list_service::ShoppingListService;
pub use short_link_service::ShortLinkService;
pub use subscription_service::{AuthorSummary, SubscriptionService};
pub use tag_service::TagService;
