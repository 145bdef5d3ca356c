//! Favorites HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::models::AddFavoriteRequest;
use crate::web::{
    responses::{json_error, map_app_error},
    AppState,
};

/// `GET /favorites`
pub async fn list_favorites(State(state): State<AppState>) -> Response {
    Json(state.favorites.list().await).into_response()
}

/// `POST /favorites` with body `{breed}`
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(body): Json<AddFavoriteRequest>,
) -> Response {
    let Some(breed) = body.breed else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "Breed is required and must be a string",
        );
    };

    match state.favorites.add(&breed).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Breed added to favorites",
                "breed": record.breed,
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Error adding favorite '{breed}': {e}");
            map_app_error(&e, "Failed to add breed to favorites")
        }
    }
}

/// `DELETE /favorites/:breed`
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(breed): Path<String>,
) -> Response {
    match state.favorites.remove(&breed).await {
        Ok(record) => Json(json!({
            "message": "Breed removed from favorites",
            "breed": record.breed,
        }))
        .into_response(),
        Err(e) => {
            error!("Error removing favorite '{breed}': {e}");
            map_app_error(&e, "Failed to remove breed from favorites")
        }
    }
}
