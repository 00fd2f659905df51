//! Readiness endpoint.
//!
//! Reports the flag set by the startup gate. Purely observational: no
//! other route is gated on it.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub ready: bool,
}

/// Returns 200 once the users table is known to exist, 503 before that.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    if state.readiness.is_ready() {
        (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "success",
                ready: true,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                status: "error",
                ready: false,
            }),
        )
    }
}
