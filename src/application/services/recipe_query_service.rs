//! Read side of recipes: details with tags, ingredients and per-user flags.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{
    RECIPE_LIST_LIMIT, Recipe, RecipeFilter, RecipeIngredientAmount, Tag,
};
use crate::domain::repositories::{
    FavoriteRepository, RecipeRepository, ShoppingCartRepository, ShortLinkRepository,
    TagRepository,
};
use crate::error::AppError;

/// A recipe with everything a reader sees.
///
/// The flags are relative to the viewer and always `false` for anonymous
/// viewers.
#[derive(Debug, Clone)]
pub struct RecipeDetails {
    pub recipe: Recipe,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredientAmount>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub short_link_token: Option<String>,
}

/// Listing criteria as a reader states them.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub author_id: Option<i64>,
    pub tag_slugs: Vec<String>,
    /// Only the viewer's favorites.
    pub favorited: bool,
    /// Only recipes in the viewer's cart.
    pub in_shopping_cart: bool,
    pub limit: Option<i64>,
}

pub struct RecipeQueryService<R, T, F, C, S>
where
    R: RecipeRepository + ?Sized,
    T: TagRepository + ?Sized,
    F: FavoriteRepository + ?Sized,
    C: ShoppingCartRepository + ?Sized,
    S: ShortLinkRepository + ?Sized,
{
    recipe_repository: Arc<R>,
    tag_repository: Arc<T>,
    favorite_repository: Arc<F>,
    cart_repository: Arc<C>,
    short_link_repository: Arc<S>,
}

impl<R, T, F, C, S> RecipeQueryService<R, T, F, C, S>
where
    R: RecipeRepository + ?Sized,
    T: TagRepository + ?Sized,
    F: FavoriteRepository + ?Sized,
    C: ShoppingCartRepository + ?Sized,
    S: ShortLinkRepository + ?Sized,
{
    pub fn new(
        recipe_repository: Arc<R>,
        tag_repository: Arc<T>,
        favorite_repository: Arc<F>,
        cart_repository: Arc<C>,
        short_link_repository: Arc<S>,
    ) -> Self {
        Self {
            recipe_repository,
            tag_repository,
            favorite_repository,
            cart_repository,
            short_link_repository,
        }
    }

    /// Returns one recipe as `viewer` sees it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    pub async fn get(&self, viewer: Option<i64>, recipe_id: i64) -> Result<RecipeDetails, AppError> {
        let not_found =
            || AppError::not_found("Recipe not found", json!({ "recipe_id": recipe_id }));

        let recipe = self
            .recipe_repository
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(not_found)?;

        self.decorate(viewer, vec![recipe])
            .await?
            .into_iter()
            .next()
            .ok_or_else(not_found)
    }

    /// Lists recipes newest first.
    ///
    /// The limit defaults to and is clamped at 100. Asking for favorites or
    /// cart contents without a viewer yields nothing.
    pub async fn list(
        &self,
        viewer: Option<i64>,
        query: RecipeQuery,
    ) -> Result<Vec<RecipeDetails>, AppError> {
        if viewer.is_none() && (query.favorited || query.in_shopping_cart) {
            return Ok(Vec::new());
        }

        let filter = RecipeFilter {
            author_id: query.author_id,
            tag_slugs: query.tag_slugs,
            favorited_by: viewer.filter(|_| query.favorited),
            in_cart_of: viewer.filter(|_| query.in_shopping_cart),
            limit: query
                .limit
                .unwrap_or(RECIPE_LIST_LIMIT)
                .clamp(1, RECIPE_LIST_LIMIT),
        };

        let recipes = self.recipe_repository.list(filter).await?;
        self.decorate(viewer, recipes).await
    }

    /// Loads tags, ingredients, flags and links for all recipes at once.
    async fn decorate(
        &self,
        viewer: Option<i64>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeDetails>, AppError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();

        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for (recipe_id, tag) in self.tag_repository.for_recipes(&ids).await? {
            tags.entry(recipe_id).or_default().push(tag);
        }

        let mut ingredients: HashMap<i64, Vec<RecipeIngredientAmount>> = HashMap::new();
        for item in self.recipe_repository.ingredients_for(&ids).await? {
            ingredients.entry(item.recipe_id).or_default().push(item);
        }

        let (favorited, in_cart): (HashSet<i64>, HashSet<i64>) = match viewer {
            Some(user_id) => (
                self.favorite_repository
                    .favorited_among(user_id, &ids)
                    .await?
                    .into_iter()
                    .collect(),
                self.cart_repository
                    .in_cart_among(user_id, &ids)
                    .await?
                    .into_iter()
                    .collect(),
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        let mut tokens: HashMap<i64, String> = self
            .short_link_repository
            .find_by_recipes(&ids)
            .await?
            .into_iter()
            .map(|link| (link.recipe_id, link.token))
            .collect();

        Ok(recipes
            .into_iter()
            .map(|recipe| RecipeDetails {
                tags: tags.remove(&recipe.id).unwrap_or_default(),
                ingredients: ingredients.remove(&recipe.id).unwrap_or_default(),
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                short_link_token: tokens.remove(&recipe.id),
                recipe,
            })
            .collect())
    }
}
