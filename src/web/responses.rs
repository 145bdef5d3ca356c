//! HTTP response types and error mapping
//!
//! Error bodies follow the `{error}` / `{error, message}` contract: client
//! errors carry only the `error` field, server-side failures also carry the
//! underlying `message`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(rename = "timeStamp")]
    pub time_stamp: DateTime<Utc>,
    /// Seconds since process start
    pub uptime: f64,
}

pub fn json_error(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            message: None,
        }),
    )
        .into_response()
}

pub fn json_error_with_message(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            message: Some(message.to_string()),
        }),
    )
        .into_response()
}

/// Map an application error onto the wire contract
///
/// `context` becomes the `error` field for server-side failures, mirroring
/// how each handler reports what it was doing when the upstream fell over.
pub fn map_app_error(error: &AppError, context: &str) -> Response {
    match error {
        AppError::Validation { message } => json_error(StatusCode::BAD_REQUEST, message),
        AppError::InvalidBreed { .. } => json_error(StatusCode::BAD_REQUEST, &error.to_string()),
        AppError::Duplicate { .. } => json_error(StatusCode::CONFLICT, &error.to_string()),
        AppError::NotFound { .. } => json_error(StatusCode::NOT_FOUND, &error.to_string()),
        AppError::Upstream { .. }
        | AppError::Http(_)
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => {
            json_error_with_message(StatusCode::INTERNAL_SERVER_ERROR, context, &error.to_string())
        }
    }
}
