//! HTTP route handlers.
//!
//! Every response is marked `Cache-Control: no-store`. Request tracing is
//! enabled via middleware that generates a unique request ID for each
//! incoming request, allowing correlation of all logs within a request.

pub mod home;
pub mod ready;
pub mod users;

use axum::{
    http::header::{HeaderValue, CACHE_CONTROL},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/ready", get(ready::ready))
        .route("/users/create", post(users::create))
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
