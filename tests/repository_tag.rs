mod common;

use recipe_share::AppError;
use recipe_share::domain::entities::NewTag;
use recipe_share::domain::repositories::TagRepository;
use recipe_share::infrastructure::persistence::PgTagRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_tag(name: &str, slug: &str) -> NewTag {
    NewTag {
        name: name.to_string(),
        slug: slug.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgTagRepository::new(Arc::new(pool));

    let tag = repo.insert(new_tag("Breakfast", "breakfast")).await.unwrap();

    assert_eq!(repo.find_by_id(tag.id).await.unwrap(), Some(tag.clone()));
    assert_eq!(repo.list().await.unwrap(), vec![tag.clone()]);
    assert_eq!(
        repo.find_missing(&[tag.id, tag.id + 100]).await.unwrap(),
        vec![tag.id + 100]
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_slug(pool: PgPool) {
    let repo = PgTagRepository::new(Arc::new(pool));

    repo.insert(new_tag("Breakfast", "breakfast")).await.unwrap();
    let result = repo.insert(new_tag("Morning", "breakfast")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_for_recipes(pool: PgPool) {
    let breakfast = common::create_pg_tag(&pool, "breakfast").await;
    let lunch = common::create_pg_tag(&pool, "lunch").await;
    let first = common::create_pg_recipe(&pool, 1, &[]).await;
    let second = common::create_pg_recipe(&pool, 1, &[]).await;
    common::tag_pg_recipe(&pool, first, lunch).await;
    common::tag_pg_recipe(&pool, first, breakfast).await;
    let repo = PgTagRepository::new(Arc::new(pool));

    let pairs: Vec<(i64, i64)> = repo
        .for_recipes(&[first, second])
        .await
        .unwrap()
        .into_iter()
        .map(|(recipe_id, tag)| (recipe_id, tag.id))
        .collect();

    assert_eq!(pairs, vec![(first, breakfast), (first, lunch)]);
}
