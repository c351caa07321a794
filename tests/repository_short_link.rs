mod common;

use recipe_share::AppError;
use recipe_share::domain::entities::NewShortLink;
use recipe_share::domain::repositories::ShortLinkRepository;
use recipe_share::infrastructure::persistence::PgShortLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(recipe_id: i64, token: &str) -> NewShortLink {
    NewShortLink {
        recipe_id,
        token: token.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_and_find(pool: PgPool) {
    let recipe_id = common::create_pg_recipe(&pool, 1, &[]).await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let link = repo.insert(new_link(recipe_id, "aB3xYz")).await.unwrap();
    assert_eq!(link.recipe_id, recipe_id);
    assert_eq!(link.token, "aB3xYz");

    assert!(repo.token_exists("aB3xYz").await.unwrap());
    assert!(!repo.token_exists("ab3xyz").await.unwrap());

    let by_token = repo.find_by_token("aB3xYz").await.unwrap().unwrap();
    assert_eq!(by_token.recipe_id, recipe_id);

    let by_recipe = repo.find_by_recipe(recipe_id).await.unwrap().unwrap();
    assert_eq!(by_recipe.token, "aB3xYz");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_token(pool: PgPool) {
    let first = common::create_pg_recipe(&pool, 1, &[]).await;
    let second = common::create_pg_recipe(&pool, 1, &[]).await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    repo.insert(new_link(first, "same")).await.unwrap();
    let result = repo.insert(new_link(second, "same")).await;

    assert!(matches!(result, Err(AppError::DuplicateLink { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_second_link_for_recipe(pool: PgPool) {
    let recipe_id = common::create_pg_recipe(&pool, 1, &[]).await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    repo.insert(new_link(recipe_id, "first")).await.unwrap();
    let result = repo.insert(new_link(recipe_id, "second")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_link_for_missing_recipe(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let result = repo.insert(new_link(404, "orphan")).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_link_removed_with_recipe(pool: PgPool) {
    let recipe_id = common::create_pg_recipe(&pool, 1, &[]).await;
    let repo = PgShortLinkRepository::new(Arc::new(pool.clone()));
    repo.insert(new_link(recipe_id, "gone")).await.unwrap();

    sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(repo.find_by_token("gone").await.unwrap().is_none());
}
