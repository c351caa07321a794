#![allow(dead_code)]

use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use recipe_share::api::handlers::health_handler;
use recipe_share::api::routes::{api_routes, short_link_routes};
use recipe_share::domain::entities::{NewIngredient, NewRecipe, NewTag, Recipe, RecipeIngredient};
use recipe_share::domain::repositories::{IngredientRepository, RecipeRepository, TagRepository};
use recipe_share::infrastructure::cache::NullCache;
use recipe_share::infrastructure::persistence::InMemoryStore;
use recipe_share::state::{AppState, Repositories};
use recipe_share::utils::token_generator::ShortLinkConfig;
use sqlx::PgPool;
use std::sync::Arc;

pub fn create_test_state(store: Arc<InMemoryStore>) -> AppState {
    AppState::new(
        Repositories::in_memory(store),
        Arc::new(NullCache::new()),
        ShortLinkConfig::default(),
        None,
    )
}

/// Every route of the service, without rate limiting.
pub fn create_test_router(state: AppState) -> Router {
    Router::new()
        .merge(short_link_routes())
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state)
}

pub fn create_test_server(store: Arc<InMemoryStore>) -> TestServer {
    TestServer::new(create_test_router(create_test_state(store))).unwrap()
}

pub async fn seed_ingredient(store: &InMemoryStore, name: &str, unit: &str) -> i64 {
    store
        .insert_many(vec![NewIngredient {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
        }])
        .await
        .unwrap();

    store
        .search(name, 100)
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.name == name && i.measurement_unit == unit)
        .unwrap()
        .id
}

pub async fn seed_recipe(store: &InMemoryStore, author_id: i64, lines: &[(i64, i32)]) -> Recipe {
    RecipeRepository::create(
        store,
        NewRecipe {
            author_id,
            name: "Pancakes".to_string(),
            text: "Mix and fry".to_string(),
            cooking_time: 20,
            ingredients: lines
                .iter()
                .map(|&(ingredient_id, amount)| RecipeIngredient {
                    ingredient_id,
                    amount,
                })
                .collect(),
            tags: Vec::new(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_tag(store: &InMemoryStore, slug: &str) -> i64 {
    TagRepository::insert(
        store,
        NewTag {
            name: slug.to_uppercase(),
            slug: slug.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

/// Same as [`seed_recipe`] with tags attached.
pub async fn seed_tagged_recipe(store: &InMemoryStore, author_id: i64, tags: &[i64]) -> Recipe {
    RecipeRepository::create(
        store,
        NewRecipe {
            author_id,
            name: "Pancakes".to_string(),
            text: "Mix and fry".to_string(),
            cooking_time: 20,
            ingredients: Vec::new(),
            tags: tags.to_vec(),
        },
    )
    .await
    .unwrap()
}

pub async fn create_pg_ingredient(pool: &PgPool, name: &str, unit: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(unit)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_pg_recipe(pool: &PgPool, author_id: i64, lines: &[(i64, i32)]) -> i64 {
    let recipe_id: i64 = sqlx::query_scalar(
        "INSERT INTO recipes (author_id, name, text, cooking_time) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(author_id)
    .bind("Pancakes")
    .bind("Mix and fry")
    .bind(20_i32)
    .fetch_one(pool)
    .await
    .unwrap();

    for &(ingredient_id, amount) in lines {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
        )
        .bind(recipe_id)
        .bind(ingredient_id)
        .bind(amount)
        .execute(pool)
        .await
        .unwrap();
    }

    recipe_id
}

pub async fn create_pg_tag(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO tags (name, slug) VALUES ($1, $2) RETURNING id")
        .bind(slug.to_uppercase())
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn tag_pg_recipe(pool: &PgPool, recipe_id: i64, tag_id: i64) {
    sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
        .bind(recipe_id)
        .bind(tag_id)
        .execute(pool)
        .await
        .unwrap();
}
