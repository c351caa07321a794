//! In-process implementation of every repository trait.
//!
//! Enforces the same uniqueness and cascade rules as the PostgreSQL schema, so
//! services behave identically against it. Used for local wiring and for
//! tests that must not depend on a database.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{
    FavoriteEntry, Ingredient, IngredientLine, NewIngredient, NewRecipe, NewShortLink, NewTag,
    Recipe, RecipeFilter, RecipeIngredient, RecipeIngredientAmount, ShoppingCartEntry, ShortLink,
    Subscription, Tag,
};
use crate::domain::repositories::{
    FavoriteRepository, IngredientRepository, RecipeRepository, ShoppingCartRepository,
    ShortLinkRepository, SubscriptionRepository, TagRepository,
};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    next_id: i64,
    ingredients: BTreeMap<i64, Ingredient>,
    recipes: BTreeMap<i64, Recipe>,
    recipe_lines: Vec<(i64, RecipeIngredient)>,
    cart: Vec<ShoppingCartEntry>,
    links_by_token: HashMap<String, ShortLink>,
    tokens_by_recipe: HashMap<i64, String>,
    tags: BTreeMap<i64, Tag>,
    recipe_tags: Vec<(i64, i64)>,
    favorites: Vec<FavoriteEntry>,
    subscriptions: Vec<Subscription>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn ensure_recipe(&self, recipe_id: i64) -> Result<(), AppError> {
        if self.recipes.contains_key(&recipe_id) {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Recipe not found",
                json!({ "recipe_id": recipe_id }),
            ))
        }
    }

    fn matches(&self, recipe: &Recipe, filter: &RecipeFilter) -> bool {
        if filter.author_id.is_some_and(|author| author != recipe.author_id) {
            return false;
        }
        if !filter.tag_slugs.is_empty()
            && !self.recipe_tags.iter().any(|(recipe_id, tag_id)| {
                *recipe_id == recipe.id
                    && self
                        .tags
                        .get(tag_id)
                        .is_some_and(|tag| filter.tag_slugs.contains(&tag.slug))
            })
        {
            return false;
        }
        if let Some(user_id) = filter.favorited_by {
            if !self
                .favorites
                .iter()
                .any(|f| f.user_id == user_id && f.recipe_id == recipe.id)
            {
                return false;
            }
        }
        if let Some(user_id) = filter.in_cart_of {
            if !self
                .cart
                .iter()
                .any(|e| e.user_id == user_id && e.recipe_id == recipe.id)
            {
                return false;
            }
        }
        true
    }
}

/// Mutex-guarded in-memory tables.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    token_lookups: AtomicUsize,
    rejected_link_inserts: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::internal("In-memory store is poisoned", json!({})))
    }

    /// Number of `token_exists` calls served so far.
    pub fn token_lookups(&self) -> usize {
        self.token_lookups.load(Ordering::Relaxed)
    }

    /// Number of short link inserts rejected by a uniqueness rule.
    pub fn rejected_link_inserts(&self) -> usize {
        self.rejected_link_inserts.load(Ordering::Relaxed)
    }

    /// Every stored short link token.
    pub fn tokens(&self) -> Vec<String> {
        self.lock()
            .map(|t| t.links_by_token.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryStore {
    async fn token_exists(&self, token: &str) -> Result<bool, AppError> {
        self.token_lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.lock()?.links_by_token.contains_key(token))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.lock()?.links_by_token.get(token).cloned())
    }

    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, AppError> {
        let tables = self.lock()?;
        Ok(tables
            .tokens_by_recipe
            .get(&recipe_id)
            .and_then(|token| tables.links_by_token.get(token))
            .cloned())
    }

    async fn find_by_recipes(&self, recipe_ids: &[i64]) -> Result<Vec<ShortLink>, AppError> {
        let tables = self.lock()?;
        Ok(recipe_ids
            .iter()
            .filter_map(|id| tables.tokens_by_recipe.get(id))
            .filter_map(|token| tables.links_by_token.get(token))
            .cloned()
            .collect())
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut tables = self.lock()?;

        tables.ensure_recipe(new_link.recipe_id)?;
        if tables.links_by_token.contains_key(&new_link.token) {
            self.rejected_link_inserts.fetch_add(1, Ordering::Relaxed);
            return Err(AppError::duplicate_link(
                "Short link token already taken",
                json!({ "token": new_link.token }),
            ));
        }
        if tables.tokens_by_recipe.contains_key(&new_link.recipe_id) {
            self.rejected_link_inserts.fetch_add(1, Ordering::Relaxed);
            return Err(AppError::conflict(
                "Recipe already has a short link",
                json!({ "recipe_id": new_link.recipe_id }),
            ));
        }

        let link = ShortLink::new(
            tables.next_id(),
            new_link.recipe_id,
            new_link.token,
            Utc::now(),
        );
        tables
            .tokens_by_recipe
            .insert(link.recipe_id, link.token.clone());
        tables
            .links_by_token
            .insert(link.token.clone(), link.clone());

        Ok(link)
    }
}

#[async_trait]
impl ShoppingCartRepository for InMemoryStore {
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<ShoppingCartEntry, AppError> {
        let mut tables = self.lock()?;

        tables.ensure_recipe(recipe_id)?;
        if tables
            .cart
            .iter()
            .any(|e| e.user_id == user_id && e.recipe_id == recipe_id)
        {
            return Err(AppError::conflict(
                "Recipe is already in the shopping cart",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        let entry = ShoppingCartEntry {
            user_id,
            recipe_id,
            created_at: Utc::now(),
        };
        tables.cart.push(entry.clone());

        Ok(entry)
    }

    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        let mut tables = self.lock()?;
        let before = tables.cart.len();
        tables
            .cart
            .retain(|e| !(e.user_id == user_id && e.recipe_id == recipe_id));

        Ok(tables.cart.len() < before)
    }

    async fn contains(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        Ok(self
            .lock()?
            .cart
            .iter()
            .any(|e| e.user_id == user_id && e.recipe_id == recipe_id))
    }

    async fn in_cart_among(&self, user_id: i64, recipe_ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let tables = self.lock()?;
        Ok(recipe_ids
            .iter()
            .copied()
            .filter(|id| {
                tables
                    .cart
                    .iter()
                    .any(|e| e.user_id == user_id && e.recipe_id == *id)
            })
            .collect())
    }

    async fn ingredient_lines_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<IngredientLine>, AppError> {
        let tables = self.lock()?;

        let lines = tables
            .cart
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .flat_map(|entry| {
                tables
                    .recipe_lines
                    .iter()
                    .filter(move |(recipe_id, _)| *recipe_id == entry.recipe_id)
            })
            .filter_map(|(recipe_id, line)| {
                tables.ingredients.get(&line.ingredient_id).map(|ingredient| {
                    IngredientLine {
                        recipe_id: *recipe_id,
                        name: ingredient.name.clone(),
                        measurement_unit: ingredient.measurement_unit.clone(),
                        amount: line.amount,
                    }
                })
            })
            .collect();

        Ok(lines)
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn create(&self, new_recipe: NewRecipe) -> Result<Recipe, AppError> {
        let mut tables = self.lock()?;

        let missing: Vec<i64> = new_recipe
            .ingredients
            .iter()
            .map(|line| line.ingredient_id)
            .filter(|id| !tables.ingredients.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::bad_request(
                "Unknown ingredient",
                json!({ "ingredient_ids": missing }),
            ));
        }

        let missing_tags: Vec<i64> = new_recipe
            .tags
            .iter()
            .copied()
            .filter(|id| !tables.tags.contains_key(id))
            .collect();
        if !missing_tags.is_empty() {
            return Err(AppError::bad_request(
                "Unknown tag",
                json!({ "tag_ids": missing_tags }),
            ));
        }

        let recipe = Recipe {
            id: tables.next_id(),
            author_id: new_recipe.author_id,
            name: new_recipe.name,
            text: new_recipe.text,
            cooking_time: new_recipe.cooking_time,
            created_at: Utc::now(),
        };
        for line in new_recipe.ingredients {
            tables.recipe_lines.push((recipe.id, line));
        }
        for tag_id in new_recipe.tags {
            tables.recipe_tags.push((recipe.id, tag_id));
        }
        tables.recipes.insert(recipe.id, recipe.clone());

        Ok(recipe)
    }

    async fn find_by_id(&self, recipe_id: i64) -> Result<Option<Recipe>, AppError> {
        Ok(self.lock()?.recipes.get(&recipe_id).cloned())
    }

    async fn exists(&self, recipe_id: i64) -> Result<bool, AppError> {
        Ok(self.lock()?.recipes.contains_key(&recipe_id))
    }

    async fn delete(&self, recipe_id: i64) -> Result<bool, AppError> {
        let mut tables = self.lock()?;

        if tables.recipes.remove(&recipe_id).is_none() {
            return Ok(false);
        }
        tables.recipe_lines.retain(|(id, _)| *id != recipe_id);
        tables.recipe_tags.retain(|(id, _)| *id != recipe_id);
        tables.cart.retain(|e| e.recipe_id != recipe_id);
        tables.favorites.retain(|f| f.recipe_id != recipe_id);
        if let Some(token) = tables.tokens_by_recipe.remove(&recipe_id) {
            tables.links_by_token.remove(&token);
        }

        Ok(true)
    }

    async fn list(&self, filter: RecipeFilter) -> Result<Vec<Recipe>, AppError> {
        let tables = self.lock()?;

        let mut found: Vec<Recipe> = tables
            .recipes
            .values()
            .filter(|recipe| tables.matches(recipe, &filter))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        found.truncate(usize::try_from(filter.limit).unwrap_or(0));

        Ok(found)
    }

    async fn ingredients_for(
        &self,
        recipe_ids: &[i64],
    ) -> Result<Vec<RecipeIngredientAmount>, AppError> {
        let tables = self.lock()?;

        Ok(tables
            .recipe_lines
            .iter()
            .filter(|(recipe_id, _)| recipe_ids.contains(recipe_id))
            .filter_map(|(recipe_id, line)| {
                tables
                    .ingredients
                    .get(&line.ingredient_id)
                    .map(|ingredient| RecipeIngredientAmount {
                        recipe_id: *recipe_id,
                        ingredient: ingredient.clone(),
                        amount: line.amount,
                    })
            })
            .collect())
    }

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError> {
        Ok(self
            .lock()?
            .recipes
            .values()
            .filter(|r| r.author_id == author_id)
            .count() as i64)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.recipes.len() as i64)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Tag>, AppError> {
        Ok(self.lock()?.tags.values().cloned().collect())
    }

    async fn find_by_id(&self, tag_id: i64) -> Result<Option<Tag>, AppError> {
        Ok(self.lock()?.tags.get(&tag_id).cloned())
    }

    async fn find_missing(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let tables = self.lock()?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !tables.tags.contains_key(id))
            .collect())
    }

    async fn insert(&self, new_tag: NewTag) -> Result<Tag, AppError> {
        let mut tables = self.lock()?;

        if tables
            .tags
            .values()
            .any(|t| t.name == new_tag.name || t.slug == new_tag.slug)
        {
            return Err(AppError::conflict(
                "Tag name or slug already taken",
                json!({ "name": new_tag.name, "slug": new_tag.slug }),
            ));
        }

        let tag = Tag {
            id: tables.next_id(),
            name: new_tag.name,
            slug: new_tag.slug,
        };
        tables.tags.insert(tag.id, tag.clone());

        Ok(tag)
    }

    async fn for_recipes(&self, recipe_ids: &[i64]) -> Result<Vec<(i64, Tag)>, AppError> {
        let tables = self.lock()?;

        let mut pairs: Vec<(i64, Tag)> = tables
            .recipe_tags
            .iter()
            .filter(|(recipe_id, _)| recipe_ids.contains(recipe_id))
            .filter_map(|(recipe_id, tag_id)| {
                tables.tags.get(tag_id).map(|tag| (*recipe_id, tag.clone()))
            })
            .collect();
        pairs.sort_by_key(|(recipe_id, tag)| (*recipe_id, tag.id));

        Ok(pairs)
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryStore {
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<FavoriteEntry, AppError> {
        let mut tables = self.lock()?;

        tables.ensure_recipe(recipe_id)?;
        if tables
            .favorites
            .iter()
            .any(|f| f.user_id == user_id && f.recipe_id == recipe_id)
        {
            return Err(AppError::conflict(
                "Recipe is already a favorite",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        let entry = FavoriteEntry {
            user_id,
            recipe_id,
            created_at: Utc::now(),
        };
        tables.favorites.push(entry.clone());

        Ok(entry)
    }

    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        let mut tables = self.lock()?;
        let before = tables.favorites.len();
        tables
            .favorites
            .retain(|f| !(f.user_id == user_id && f.recipe_id == recipe_id));

        Ok(tables.favorites.len() < before)
    }

    async fn favorited_among(
        &self,
        user_id: i64,
        recipe_ids: &[i64],
    ) -> Result<Vec<i64>, AppError> {
        let tables = self.lock()?;
        let favorites: HashSet<i64> = tables
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .map(|f| f.recipe_id)
            .collect();

        Ok(recipe_ids
            .iter()
            .copied()
            .filter(|id| favorites.contains(id))
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.favorites.len() as i64)
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn add(&self, subscriber_id: i64, author_id: i64) -> Result<Subscription, AppError> {
        let mut tables = self.lock()?;

        if subscriber_id == author_id {
            return Err(AppError::bad_request(
                "Cannot subscribe to yourself",
                json!({ "author_id": author_id }),
            ));
        }
        if tables
            .subscriptions
            .iter()
            .any(|s| s.subscriber_id == subscriber_id && s.author_id == author_id)
        {
            return Err(AppError::conflict(
                "Already subscribed to this author",
                json!({ "author_id": author_id }),
            ));
        }

        let subscription = Subscription {
            subscriber_id,
            author_id,
            created_at: Utc::now(),
        };
        tables.subscriptions.push(subscription.clone());

        Ok(subscription)
    }

    async fn remove(&self, subscriber_id: i64, author_id: i64) -> Result<bool, AppError> {
        let mut tables = self.lock()?;
        let before = tables.subscriptions.len();
        tables
            .subscriptions
            .retain(|s| !(s.subscriber_id == subscriber_id && s.author_id == author_id));

        Ok(tables.subscriptions.len() < before)
    }

    async fn authors_of(&self, subscriber_id: i64) -> Result<Vec<i64>, AppError> {
        Ok(self
            .lock()?
            .subscriptions
            .iter()
            .filter(|s| s.subscriber_id == subscriber_id)
            .map(|s| s.author_id)
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.subscriptions.len() as i64)
    }
}

#[async_trait]
impl IngredientRepository for InMemoryStore {
    async fn search(&self, prefix: &str, limit: i64) -> Result<Vec<Ingredient>, AppError> {
        let prefix = prefix.to_lowercase();
        let tables = self.lock()?;

        let mut found: Vec<Ingredient> = tables
            .ingredients
            .values()
            .filter(|i| i.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        found.truncate(usize::try_from(limit).unwrap_or(0));

        Ok(found)
    }

    async fn find_missing(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let tables = self.lock()?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !tables.ingredients.contains_key(id))
            .collect())
    }

    async fn insert_many(&self, ingredients: Vec<NewIngredient>) -> Result<u64, AppError> {
        let mut tables = self.lock()?;
        let mut inserted = 0;

        for new in ingredients {
            let id = tables.next_id();
            tables
                .ingredients
                .insert(id, Ingredient::new(id, new.name, new.measurement_unit));
            inserted += 1;
        }

        Ok(inserted)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.ingredients.len() as i64)
    }
}
