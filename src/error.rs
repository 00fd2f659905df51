use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::ConfigError;
use crate::db::DbError;
use crate::http::ServerError;

/// Errors that stop the process before or while serving.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Error returned to HTTP clients as a JSON body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody<'a> {
    status: &'static str,
    message: &'a str,
    timestamp: DateTime<Utc>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            status: "error",
            message: &self.message,
            timestamp: Utc::now(),
        };
        (self.status, Json(body)).into_response()
    }
}
