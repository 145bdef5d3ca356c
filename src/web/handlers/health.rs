//! Health check HTTP handler

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;

use crate::web::{responses::HealthResponse, AppState};

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK".to_string(),
        time_stamp: Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}
