mod common;

use recipe_share::infrastructure::persistence::InMemoryStore;
use recipe_share::utils::csv_export::UTF8_BOM;
use recipe_share::utils::extract_user::USER_ID_HEADER;
use std::sync::Arc;

#[tokio::test]
async fn test_add_to_cart() {
    let store = Arc::new(InMemoryStore::new());
    let recipe = common::seed_recipe(&store, 1, &[]).await;
    let server = common::create_test_server(store);

    let response = server
        .post(&format!("/api/recipes/{}/shopping_cart", recipe.id))
        .add_header(USER_ID_HEADER, "7")
        .await;

    assert_eq!(response.status_code(), 201);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["recipe_id"], recipe.id);
}

#[tokio::test]
async fn test_add_to_cart_twice_conflicts() {
    let store = Arc::new(InMemoryStore::new());
    let recipe = common::seed_recipe(&store, 1, &[]).await;
    let server = common::create_test_server(store);
    let path = format!("/api/recipes/{}/shopping_cart", recipe.id);

    server.post(&path).add_header(USER_ID_HEADER, "7").await;
    let response = server.post(&path).add_header(USER_ID_HEADER, "7").await;

    assert_eq!(response.status_code(), 409);
}

#[tokio::test]
async fn test_add_unknown_recipe() {
    let server = common::create_test_server(Arc::new(InMemoryStore::new()));

    let response = server
        .post("/api/recipes/999/shopping_cart")
        .add_header(USER_ID_HEADER, "7")
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_remove_from_cart() {
    let store = Arc::new(InMemoryStore::new());
    let recipe = common::seed_recipe(&store, 1, &[]).await;
    let server = common::create_test_server(store);
    let path = format!("/api/recipes/{}/shopping_cart", recipe.id);

    server.post(&path).add_header(USER_ID_HEADER, "7").await;
    let response = server.delete(&path).add_header(USER_ID_HEADER, "7").await;

    assert_eq!(response.status_code(), 204);
}

#[tokio::test]
async fn test_remove_recipe_not_in_cart() {
    let store = Arc::new(InMemoryStore::new());
    let recipe = common::seed_recipe(&store, 1, &[]).await;
    let server = common::create_test_server(store);

    let response = server
        .delete(&format!("/api/recipes/{}/shopping_cart", recipe.id))
        .add_header(USER_ID_HEADER, "7")
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_cart_requires_user() {
    let server = common::create_test_server(Arc::new(InMemoryStore::new()));

    let response = server.get("/api/recipes/download_shopping_cart").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_download_aggregates_cart() {
    let store = Arc::new(InMemoryStore::new());
    let flour = common::seed_ingredient(&store, "мука", "г").await;
    let milk = common::seed_ingredient(&store, "молоко", "мл").await;
    let pancakes = common::seed_recipe(&store, 1, &[(flour, 200), (milk, 300)]).await;
    let bread = common::seed_recipe(&store, 2, &[(flour, 500)]).await;
    let server = common::create_test_server(store);

    for recipe_id in [pancakes.id, bread.id] {
        server
            .post(&format!("/api/recipes/{recipe_id}/shopping_cart"))
            .add_header(USER_ID_HEADER, "7")
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let response = server
        .get("/api/recipes/download_shopping_cart")
        .add_header(USER_ID_HEADER, "7")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "text/csv; charset=utf-8");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"exported_data.csv\""
    );

    let body = response.as_bytes();
    assert!(body.starts_with(UTF8_BOM));
    let text = std::str::from_utf8(&body[UTF8_BOM.len()..]).unwrap();
    assert_eq!(text, "\"мука, г\",700\r\n\"молоко, мл\",300\r\n");
}

#[tokio::test]
async fn test_download_is_per_user() {
    let store = Arc::new(InMemoryStore::new());
    let flour = common::seed_ingredient(&store, "flour", "g").await;
    let recipe = common::seed_recipe(&store, 1, &[(flour, 200)]).await;
    let server = common::create_test_server(store);

    server
        .post(&format!("/api/recipes/{}/shopping_cart", recipe.id))
        .add_header(USER_ID_HEADER, "7")
        .await;

    let response = server
        .get("/api/recipes/download_shopping_cart")
        .add_header(USER_ID_HEADER, "8")
        .await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), UTF8_BOM);
}

#[tokio::test]
async fn test_download_empty_cart() {
    let server = common::create_test_server(Arc::new(InMemoryStore::new()));

    let response = server
        .get("/api/recipes/download_shopping_cart")
        .add_header(USER_ID_HEADER, "7")
        .await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), UTF8_BOM);
}
