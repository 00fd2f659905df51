//! Root liveness endpoint.
//!
//! Returns a fixed payload without touching the database, so it answers
//! 200 whatever the database state is.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn index() -> Json<HomeResponse> {
    Json(HomeResponse {
        status: "success",
        message: "Hello world",
    })
}
