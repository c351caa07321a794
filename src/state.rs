//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    FavoriteService, IngredientService, RecipeQueryService, RecipeService, ShoppingCartService,
    ShoppingListService, ShortLinkService, SubscriptionService, TagService,
};
use crate::domain::repositories::{
    FavoriteRepository, IngredientRepository, RecipeRepository, ShoppingCartRepository,
    ShortLinkRepository, SubscriptionRepository, TagRepository,
};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    InMemoryStore, PgFavoriteRepository, PgIngredientRepository, PgRecipeRepository,
    PgShoppingCartRepository, PgShortLinkRepository, PgSubscriptionRepository, PgTagRepository,
};
use crate::utils::token_generator::ShortLinkConfig;

pub type SharedShortLinkService = ShortLinkService<dyn ShortLinkRepository>;
pub type SharedShoppingListService = ShoppingListService<dyn ShoppingCartRepository>;
pub type SharedShoppingCartService =
    ShoppingCartService<dyn ShoppingCartRepository, dyn RecipeRepository>;
pub type SharedRecipeService = RecipeService<
    dyn RecipeRepository,
    dyn IngredientRepository,
    dyn TagRepository,
    dyn ShortLinkRepository,
>;
pub type SharedRecipeQueryService = RecipeQueryService<
    dyn RecipeRepository,
    dyn TagRepository,
    dyn FavoriteRepository,
    dyn ShoppingCartRepository,
    dyn ShortLinkRepository,
>;
pub type SharedIngredientService = IngredientService<dyn IngredientRepository>;
pub type SharedTagService = TagService<dyn TagRepository>;
pub type SharedFavoriteService = FavoriteService<dyn FavoriteRepository, dyn RecipeRepository>;
pub type SharedSubscriptionService =
    SubscriptionService<dyn SubscriptionRepository, dyn RecipeRepository>;

/// One implementation of every repository trait.
#[derive(Clone)]
pub struct Repositories {
    pub short_links: Arc<dyn ShortLinkRepository>,
    pub shopping_cart: Arc<dyn ShoppingCartRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub ingredients: Arc<dyn IngredientRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
}

impl Repositories {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            short_links: Arc::new(PgShortLinkRepository::new(pool.clone())),
            shopping_cart: Arc::new(PgShoppingCartRepository::new(pool.clone())),
            recipes: Arc::new(PgRecipeRepository::new(pool.clone())),
            ingredients: Arc::new(PgIngredientRepository::new(pool.clone())),
            tags: Arc::new(PgTagRepository::new(pool.clone())),
            favorites: Arc::new(PgFavoriteRepository::new(pool.clone())),
            subscriptions: Arc::new(PgSubscriptionRepository::new(pool)),
        }
    }

    /// Every repository backed by the same in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            short_links: store.clone(),
            shopping_cart: store.clone(),
            recipes: store.clone(),
            ingredients: store.clone(),
            tags: store.clone(),
            favorites: store.clone(),
            subscriptions: store,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub short_link_service: Arc<SharedShortLinkService>,
    pub shopping_list_service: Arc<SharedShoppingListService>,
    pub shopping_cart_service: Arc<SharedShoppingCartService>,
    pub recipe_service: Arc<SharedRecipeService>,
    pub recipe_query_service: Arc<SharedRecipeQueryService>,
    pub ingredient_service: Arc<SharedIngredientService>,
    pub tag_service: Arc<SharedTagService>,
    pub favorite_service: Arc<SharedFavoriteService>,
    pub subscription_service: Arc<SharedSubscriptionService>,
    pub cache: Arc<dyn CacheService>,
    /// Base of absolute short links; the request `Host` is used when unset.
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(
        repositories: Repositories,
        cache: Arc<dyn CacheService>,
        short_link_config: ShortLinkConfig,
        public_base_url: Option<String>,
    ) -> Self {
        let short_link_service = Arc::new(ShortLinkService::new(
            repositories.short_links.clone(),
            cache.clone(),
            short_link_config,
        ));

        Self {
            shopping_list_service: Arc::new(ShoppingListService::new(
                repositories.shopping_cart.clone(),
            )),
            shopping_cart_service: Arc::new(ShoppingCartService::new(
                repositories.shopping_cart.clone(),
                repositories.recipes.clone(),
            )),
            recipe_service: Arc::new(RecipeService::new(
                repositories.recipes.clone(),
                repositories.ingredients.clone(),
                repositories.tags.clone(),
                short_link_service.clone(),
            )),
            recipe_query_service: Arc::new(RecipeQueryService::new(
                repositories.recipes.clone(),
                repositories.tags.clone(),
                repositories.favorites.clone(),
                repositories.shopping_cart,
                repositories.short_links,
            )),
            ingredient_service: Arc::new(IngredientService::new(repositories.ingredients)),
            tag_service: Arc::new(TagService::new(repositories.tags)),
            favorite_service: Arc::new(FavoriteService::new(
                repositories.favorites,
                repositories.recipes.clone(),
            )),
            subscription_service: Arc::new(SubscriptionService::new(
                repositories.subscriptions,
                repositories.recipes,
            )),
            short_link_service,
            cache,
            public_base_url,
        }
    }
}
