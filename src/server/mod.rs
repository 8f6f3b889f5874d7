//! Axum-based HTTP server for the translation service.
//!
//! # Components
//!
//! - `handlers`: root info, health check, metrics and translate endpoints.
//! - `middleware`: CORS policy, rate limiting, API-key auth, request IDs and
//!   request metrics.
//! - `routes`: the router and shared state that tie everything together.
//!
//! `POST /translate` runs CORS → rate limit → auth → validation → engine;
//! each stage short-circuits with its own status code.

mod handlers;
mod middleware;
mod routes;

pub use handlers::SERVICE_NAME;
pub use middleware::cors_layer;
pub use routes::{create_router, AppState};
