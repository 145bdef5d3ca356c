use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use async_trait::async_trait;
use breed_proxy::errors::{AppError, AppResult};
use breed_proxy::services::{BreedCacheService, FavoritesService};
use breed_proxy::upstream::{BreedMap, DogApiClient};
use breed_proxy::web::{create_router, AppState};

/// Upstream double serving a small fixed catalog
struct FixtureUpstream {
    fail: bool,
}

impl FixtureUpstream {
    fn healthy() -> Self {
        Self { fail: false }
    }

    fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl DogApiClient for FixtureUpstream {
    async fn fetch_breed_map(&self) -> AppResult<BreedMap> {
        if self.fail {
            return Err(AppError::upstream("upstream unreachable"));
        }
        let mut map = BreedMap::new();
        map.insert(
            "bulldog".to_string(),
            vec!["boston".to_string(), "english".to_string()],
        );
        map.insert("retriever".to_string(), vec![]);
        Ok(map)
    }

    async fn fetch_breed_images(&self, breed_path: &str, count: u32) -> AppResult<Vec<String>> {
        if self.fail {
            return Err(AppError::upstream("upstream unreachable"));
        }
        Ok((1..=count)
            .map(|n| format!("https://images.dog.ceo/{breed_path}/{n}.jpg"))
            .collect())
    }

    async fn fetch_random_breed_image(&self, breed_path: &str) -> AppResult<String> {
        Ok(format!("https://images.dog.ceo/{breed_path}/random.jpg"))
    }
}

fn test_app(upstream: FixtureUpstream) -> Router {
    let cache = BreedCacheService::new(Arc::new(upstream), Duration::from_secs(300));
    let favorites = FavoritesService::new(cache.clone());
    create_router(AppState::new(cache, favorites))
}

// Helper function to send requests to the app
async fn send_request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request_builder = Request::builder().method(method).uri(uri);

    let request = if let Some(body) = body {
        request_builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    } else {
        request_builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!({}))
    };

    (status, json)
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) = send_request(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timeStamp"].is_string());
    assert!(body["uptime"].is_number());
}

#[tokio::test]
async fn breeds_default_pagination() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) = send_request(&app, Method::GET, "/breeds", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["breeds"],
        json!(["bulldog", "bulldog-boston", "bulldog-english", "retriever"])
    );
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 1,
            "totalPages": 1,
            "totalBreeds": 4,
            "limit": 30,
            "hasNextPage": false,
            "hasPrevPage": false,
        })
    );
}

#[tokio::test]
async fn breeds_custom_page_and_limit() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) =
        send_request(&app, Method::GET, "/breeds?page=2&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["breeds"], json!(["bulldog-english", "retriever"]));
    assert_eq!(body["pagination"]["currentPage"], 2);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["hasNextPage"], false);
    assert_eq!(body["pagination"]["hasPrevPage"], true);
}

#[tokio::test]
async fn breeds_invalid_parameters_fall_back_to_defaults() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) =
        send_request(&app, Method::GET, "/breeds?page=invalid&limit=invalid", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["limit"], 30);
    assert_eq!(body["breeds"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn breeds_search_is_case_insensitive() {
    let app = test_app(FixtureUpstream::healthy());

    let (_, upper) = send_request(&app, Method::GET, "/breeds?search=BULLDOG", None).await;
    let (_, lower) = send_request(&app, Method::GET, "/breeds?search=bulldog", None).await;

    assert_eq!(upper, lower);
    assert_eq!(
        upper["breeds"],
        json!(["bulldog", "bulldog-boston", "bulldog-english"])
    );
    assert_eq!(upper["pagination"]["totalBreeds"], 3);
}

#[tokio::test]
async fn breeds_upstream_failure_maps_to_500() {
    let app = test_app(FixtureUpstream::failing());

    let (status, body) = send_request(&app, Method::GET, "/breeds", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch dog breeds");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn breed_images_returns_urls() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) =
        send_request(&app, Method::GET, "/breeds/bulldog/images?count=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            "https://images.dog.ceo/bulldog/1.jpg",
            "https://images.dog.ceo/bulldog/2.jpg",
            "https://images.dog.ceo/bulldog/3.jpg",
        ])
    );
}

#[tokio::test]
async fn breed_images_translates_sub_breed_path() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) =
        send_request(&app, Method::GET, "/breeds/bulldog-boston/images?count=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["https://images.dog.ceo/bulldog/boston/1.jpg"]));
}

#[tokio::test]
async fn breed_images_blank_breed_is_rejected() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) = send_request(&app, Method::GET, "/breeds/%20/images", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Breed parameter is required");
}

#[tokio::test]
async fn breed_images_upstream_failure_maps_to_500() {
    let app = test_app(FixtureUpstream::failing());

    let (status, body) = send_request(&app, Method::GET, "/breeds/bulldog/images", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch breed images");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn favorites_lifecycle() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) = send_request(&app, Method::GET, "/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send_request(
        &app,
        Method::POST,
        "/favorites",
        Some(json!({"breed": "bulldog"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Breed added to favorites");
    assert_eq!(body["breed"], "bulldog");

    let (status, body) = send_request(&app, Method::GET, "/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["breed"], "bulldog");
    assert!(records[0]["addedAt"].is_string());

    let (status, body) =
        send_request(&app, Method::DELETE, "/favorites/bulldog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Breed removed from favorites");
    assert_eq!(body["breed"], "bulldog");

    let (status, _) = send_request(&app, Method::GET, "/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_favorite_returns_409() {
    let app = test_app(FixtureUpstream::healthy());

    let (first, _) = send_request(
        &app,
        Method::POST,
        "/favorites",
        Some(json!({"breed": "bulldog"})),
    )
    .await;
    let (second, body) = send_request(
        &app,
        Method::POST,
        "/favorites",
        Some(json!({"breed": "bulldog"})),
    )
    .await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already in favorites"));
}

#[tokio::test]
async fn unknown_breed_favorite_returns_400() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) = send_request(
        &app,
        Method::POST,
        "/favorites",
        Some(json!({"breed": "dragon"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("dragon"));
}

#[tokio::test]
async fn missing_breed_field_returns_400() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) = send_request(&app, Method::POST, "/favorites", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Breed is required and must be a string");
}

#[tokio::test]
async fn removing_missing_favorite_returns_404() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) =
        send_request(&app, Method::DELETE, "/favorites/bulldog", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn unmatched_routes_return_json_404() {
    let app = test_app(FixtureUpstream::healthy());

    let (status, body) = send_request(&app, Method::GET, "/no/such/route", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}
