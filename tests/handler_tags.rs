mod common;

use recipe_share::infrastructure::persistence::InMemoryStore;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_list_tags() {
    let store = Arc::new(InMemoryStore::new());
    let breakfast = common::seed_tag(&store, "breakfast").await;
    let lunch = common::seed_tag(&store, "lunch").await;
    let server = common::create_test_server(store);

    let response = server.get("/api/tags").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!([
            { "id": breakfast, "name": "BREAKFAST", "slug": "breakfast" },
            { "id": lunch, "name": "LUNCH", "slug": "lunch" },
        ])
    );
}

#[tokio::test]
async fn test_get_tag() {
    let store = Arc::new(InMemoryStore::new());
    let lunch = common::seed_tag(&store, "lunch").await;
    let server = common::create_test_server(store);

    let response = server.get(&format!("/api/tags/{lunch}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["slug"], "lunch");
}

#[tokio::test]
async fn test_get_unknown_tag() {
    let server = common::create_test_server(Arc::new(InMemoryStore::new()));

    let response = server.get("/api/tags/42").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<serde_json::Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_tags_are_read_only() {
    let server = common::create_test_server(Arc::new(InMemoryStore::new()));

    let response = server
        .post("/api/tags")
        .json(&json!({ "name": "Lunch", "slug": "lunch" }))
        .await;

    assert_eq!(response.status_code(), 405);
}
