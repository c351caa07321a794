mod common;

use recipe_share::application::services::ShortLinkService;
use recipe_share::infrastructure::cache::NullCache;
use recipe_share::infrastructure::persistence::InMemoryStore;
use recipe_share::utils::token_generator::ShortLinkConfig;
use std::collections::HashSet;
use std::sync::Arc;

const LINKS: usize = 10_000;

/// 4^7 = 16384 possible tokens, so collisions are frequent near the end.
fn crowded_config() -> ShortLinkConfig {
    ShortLinkConfig::new("abcd", 7, 200).unwrap()
}

async fn seed_recipes(store: &InMemoryStore, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        ids.push(common::seed_recipe(store, 1, &[]).await.id);
    }
    ids
}

fn assert_unique(store: &InMemoryStore) {
    let tokens = store.tokens();
    assert_eq!(tokens.len(), LINKS);

    let unique: HashSet<&String> = tokens.iter().collect();
    assert_eq!(unique.len(), LINKS);
    assert!(tokens.iter().all(|t| t.len() == 7));
    assert!(
        tokens
            .iter()
            .all(|t| t.chars().all(|c| "abcd".contains(c)))
    );
}

#[tokio::test]
async fn test_crowded_token_space_stays_unique() {
    let store = Arc::new(InMemoryStore::new());
    let recipe_ids = seed_recipes(&store, LINKS).await;
    let service = ShortLinkService::new(store.clone(), Arc::new(NullCache::new()), crowded_config());

    for recipe_id in &recipe_ids {
        let link = service.generate(*recipe_id).await.unwrap();
        assert_eq!(link.recipe_id, *recipe_id);
    }

    assert_unique(&store);
    assert!(
        store.token_lookups() > LINKS,
        "expected retries after collisions, saw {} lookups",
        store.token_lookups()
    );

    for recipe_id in recipe_ids.iter().step_by(997) {
        let token = service.link_for_recipe(*recipe_id).await.unwrap().token;
        assert_eq!(service.resolve(&token).await.unwrap(), *recipe_id);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_generation_stays_unique() {
    let store = Arc::new(InMemoryStore::new());
    let recipe_ids = seed_recipes(&store, LINKS).await;
    let service = Arc::new(ShortLinkService::new(
        store.clone(),
        Arc::new(NullCache::new()),
        crowded_config(),
    ));

    let mut handles = Vec::new();
    for chunk in recipe_ids.chunks(LINKS / 8) {
        let service = service.clone();
        let chunk = chunk.to_vec();
        handles.push(tokio::spawn(async move {
            for recipe_id in chunk {
                service.generate(recipe_id).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_unique(&store);
    assert!(store.token_lookups() + store.rejected_link_inserts() > LINKS);
}

#[tokio::test]
async fn test_second_link_for_recipe_conflicts() {
    let store = Arc::new(InMemoryStore::new());
    let recipe = common::seed_recipe(&store, 1, &[]).await;
    let service = ShortLinkService::new(store.clone(), Arc::new(NullCache::new()), crowded_config());

    service.generate(recipe.id).await.unwrap();
    let second = service.generate(recipe.id).await;

    assert!(matches!(
        second,
        Err(recipe_share::AppError::Conflict { .. })
    ));
    assert_eq!(store.tokens().len(), 1);
}
