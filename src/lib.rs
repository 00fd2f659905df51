//! Userbase: a small HTTP service that creates users in a relational database.
//!
//! At startup a readiness gate waits for the database and creates the
//! `users` table; the server then exposes a liveness root, a readiness
//! probe and `POST /users/create`.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod startup;
pub mod state;

pub use error::{ApiError, AppError};
