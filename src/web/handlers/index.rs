//! Root index and fallback handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::web::responses::json_error;

/// `GET /`, a small index message for people poking at the API root
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Breed proxy API. Use /breeds or /favorites",
    }))
}

/// JSON 404 for unmatched routes
pub async fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "Route not found")
}
