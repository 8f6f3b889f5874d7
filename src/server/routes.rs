// HTTP routes configuration

use super::handlers::{
    health_handler, metrics_handler, root_handler, translate_handler, MAX_BODY_BYTES,
};
use super::middleware::{
    auth_middleware, cors_layer, rate_limit_middleware, request_id_layers, track_metrics,
};
use crate::auth::Authenticator;
use crate::config::AppConfig;
use crate::engine::Translator;
use crate::error::Result;
use crate::rate_limit::RateLimiter;
use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub translator: Arc<dyn Translator>,
    pub authenticator: Authenticator,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Build the shared state with a wall-clock rate limiter.
    pub fn new(config: AppConfig, translator: Arc<dyn Translator>) -> Result<Self> {
        let rate_limiter = RateLimiter::new(config.rate_limit.quota()?);
        Ok(Self {
            authenticator: Authenticator::new(&config.auth),
            config: Arc::new(config),
            translator,
            rate_limiter: Arc::new(rate_limiter),
        })
    }

    /// Replace the rate limiter, e.g. with one driven by a manual clock.
    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = Arc::new(rate_limiter);
        self
    }
}

pub fn create_router(state: AppState) -> Result<Router> {
    let cors = cors_layer(&state.config.cors)?;
    let (set_request_id, propagate_request_id) = request_id_layers();

    // route_layer order: the last layer added runs first, so requests are
    // rate limited before their key is checked. The body is only read (and
    // size checked) by the handler, after both.
    let translate = Router::new()
        .route("/translate", post(translate_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
        .route_layer(from_fn_with_state(state.clone(), rate_limit_middleware));

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .merge(translate)
        .layer(from_fn(track_metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
