//! HTTP server module.
//!
//! Binds the configured address, serves the router and drains open
//! connections on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
