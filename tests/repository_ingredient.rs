mod common;

use recipe_share::domain::entities::NewIngredient;
use recipe_share::domain::repositories::IngredientRepository;
use recipe_share::infrastructure::persistence::PgIngredientRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn ingredient(name: &str, unit: &str) -> NewIngredient {
    NewIngredient {
        name: name.to_string(),
        measurement_unit: unit.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_many_and_search(pool: PgPool) {
    let repo = PgIngredientRepository::new(Arc::new(pool));

    let inserted = repo
        .insert_many(vec![
            ingredient("Мука пшеничная", "г"),
            ingredient("мука ржаная", "г"),
            ingredient("молоко", "мл"),
        ])
        .await
        .unwrap();
    assert_eq!(inserted, 3);
    assert_eq!(repo.count().await.unwrap(), 3);

    let found = repo.search("МУКА", 10).await.unwrap();
    assert_eq!(found.len(), 2);

    let limited = repo.search("м", 1).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_search_escapes_wildcards(pool: PgPool) {
    let repo = PgIngredientRepository::new(Arc::new(pool));
    repo.insert_many(vec![ingredient("salt", "g")])
        .await
        .unwrap();

    assert!(repo.search("%", 10).await.unwrap().is_empty());
    assert!(repo.search("_alt", 10).await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_missing(pool: PgPool) {
    let known = common::create_pg_ingredient(&pool, "flour", "g").await;
    let repo = PgIngredientRepository::new(Arc::new(pool));

    let mut missing = repo.find_missing(&[known, 404, 405]).await.unwrap();
    missing.sort_unstable();

    assert_eq!(missing, vec![404, 405]);
}
