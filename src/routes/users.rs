//! User creation.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::db::User;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub status: &'static str,
    pub data: User,
    pub timestamp: DateTime<Utc>,
}

/// Insert a user and echo it back with 201, or report the database error with 400.
#[instrument(name = "users::create", skip_all, fields(username = %user.username))]
pub async fn create(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    if let Err(e) = state.db.insert_user(&user).await {
        tracing::error!(error = %e, "failed to create user");
        return Err(ApiError::bad_request(format!("failed to create user: {}", e)));
    }

    tracing::info!("User created successfully");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            status: "success",
            data: user,
            timestamp: Utc::now(),
        }),
    ))
}
