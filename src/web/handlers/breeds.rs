//! Breed listing and image HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::models::{BreedQueryParams, ImageQueryParams};
use crate::web::{
    responses::{json_error, map_app_error},
    AppState,
};

/// `GET /breeds?page&limit&search`
///
/// Invalid `page`/`limit` values silently fall back to defaults rather than
/// erroring; the query engine handles the normalization.
pub async fn list_breeds(
    State(state): State<AppState>,
    Query(params): Query<BreedQueryParams>,
) -> Response {
    match state.cache.breed_names().await {
        Ok(names) => Json(state.query_engine.query(&names, &params)).into_response(),
        Err(e) => {
            error!("Error listing breeds: {e}");
            map_app_error(&e, "Failed to fetch dog breeds")
        }
    }
}

/// `GET /breeds/:breed/images?count`
pub async fn breed_images(
    State(state): State<AppState>,
    Path(breed): Path<String>,
    Query(params): Query<ImageQueryParams>,
) -> Response {
    let breed = breed.trim();
    if breed.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Breed parameter is required");
    }

    match state.cache.breed_images(breed, params.count()).await {
        Ok(urls) => Json(urls).into_response(),
        Err(e) => {
            error!("Error fetching images for breed '{breed}': {e}");
            map_app_error(&e, "Failed to fetch breed images")
        }
    }
}
