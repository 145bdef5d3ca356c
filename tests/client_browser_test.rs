//! End-to-end: the client load controller driving a live server instance

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use breed_proxy::client::{BreedApi, BreedBrowser, BrowserConfig, HttpBreedApi, ScrollMetrics};
use breed_proxy::errors::{AppError, AppResult};
use breed_proxy::services::{BreedCacheService, FavoritesService};
use breed_proxy::upstream::{BreedMap, DogApiClient};
use breed_proxy::web::{create_router, AppState};

struct FixtureUpstream;

#[async_trait]
impl DogApiClient for FixtureUpstream {
    async fn fetch_breed_map(&self) -> AppResult<BreedMap> {
        let mut map = BreedMap::new();
        map.insert(
            "bulldog".to_string(),
            vec!["boston".to_string(), "english".to_string()],
        );
        map.insert("retriever".to_string(), vec![]);
        Ok(map)
    }

    async fn fetch_breed_images(&self, breed_path: &str, count: u32) -> AppResult<Vec<String>> {
        Ok((1..=count)
            .map(|n| format!("https://images.dog.ceo/{breed_path}/{n}.jpg"))
            .collect())
    }

    async fn fetch_random_breed_image(&self, breed_path: &str) -> AppResult<String> {
        Ok(format!("https://images.dog.ceo/{breed_path}/random.jpg"))
    }
}

async fn spawn_server() -> String {
    let cache = BreedCacheService::new(Arc::new(FixtureUpstream), Duration::from_secs(300));
    let favorites = FavoritesService::new(cache.clone());
    let app = create_router(AppState::new(cache, favorites));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn test_browser(base_url: &str) -> BreedBrowser {
    let api = Arc::new(HttpBreedApi::new(base_url).unwrap());
    BreedBrowser::with_config(
        api,
        BrowserConfig {
            page_size: 2,
            ..BrowserConfig::default()
        },
    )
}

#[tokio::test]
async fn browser_loads_first_page_over_http() {
    let base_url = spawn_server().await;
    let browser = test_browser(&base_url);

    browser.start().await;

    let snapshot = browser.snapshot().await;
    assert_eq!(snapshot.breeds, vec!["bulldog", "bulldog-boston"]);
    assert!(snapshot.has_more);
    assert_eq!(snapshot.total_breeds, 4);
    assert_eq!(
        snapshot.image_map.get("bulldog").unwrap(),
        "https://images.dog.ceo/bulldog/1.jpg"
    );
    assert_eq!(
        snapshot.image_map.get("bulldog-boston").unwrap(),
        "https://images.dog.ceo/bulldog/boston/1.jpg"
    );
    assert_eq!(snapshot.suggestions.len(), 4);
}

#[tokio::test]
async fn scroll_drives_pagination_over_http() {
    let base_url = spawn_server().await;
    let browser = test_browser(&base_url);

    browser.start().await;
    browser
        .handle_scroll(ScrollMetrics {
            scroll_top: 1600.0,
            viewport_height: 800.0,
            document_height: 2500.0,
        })
        .await;

    let snapshot = browser.snapshot().await;
    assert_eq!(
        snapshot.breeds,
        vec!["bulldog", "bulldog-boston", "bulldog-english", "retriever"]
    );
    assert_eq!(snapshot.current_page, 2);
    assert!(!snapshot.has_more);
}

#[tokio::test]
async fn favorites_round_trip_over_http() {
    let base_url = spawn_server().await;
    let browser = test_browser(&base_url);

    browser.start().await;
    browser.toggle_favorite("bulldog").await;
    assert_eq!(browser.snapshot().await.favorites, vec!["bulldog"]);

    browser.toggle_favorite("bulldog").await;
    assert!(browser.snapshot().await.favorites.is_empty());
}

#[tokio::test]
async fn duplicate_add_surfaces_conflict() {
    let base_url = spawn_server().await;
    let api = HttpBreedApi::new(&base_url).unwrap();

    api.add_favorite("bulldog").await.unwrap();
    let err = api.add_favorite("bulldog").await.unwrap_err();
    assert!(matches!(err, AppError::Duplicate { .. }));
}

#[tokio::test]
async fn search_results_come_back_filtered() {
    let base_url = spawn_server().await;
    let browser = test_browser(&base_url);

    browser.start().await;
    browser.search("retriever").await;

    let snapshot = browser.snapshot().await;
    assert_eq!(snapshot.breeds, vec!["retriever"]);
    assert_eq!(snapshot.total_breeds, 1);
}
