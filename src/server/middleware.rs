// HTTP middleware

use super::routes::AppState;
use crate::auth::API_KEY_HEADER;
use crate::config::CorsConfig;
use crate::error::{Result, TranslatorError};
use crate::metrics;
use crate::rate_limit::client_id;
use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::warn;

/// Create request ID layers for the application
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}

/// Build the CORS policy. A `*` entry in any list allows everything for
/// that list.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let wildcard = |list: &[String]| list.iter().any(|v| v.trim() == "*");

    let origins = if wildcard(&config.allowed_origins) {
        AllowOrigin::any()
    } else {
        let list = config
            .allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o.trim())
                    .map_err(|_| TranslatorError::Config(format!("Invalid CORS origin: {}", o)))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(list)
    };

    let methods = if wildcard(&config.allowed_methods) {
        AllowMethods::any()
    } else {
        let list = config
            .allowed_methods
            .iter()
            .map(|m| {
                Method::from_bytes(m.trim().to_ascii_uppercase().as_bytes())
                    .map_err(|_| TranslatorError::Config(format!("Invalid CORS method: {}", m)))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowMethods::list(list)
    };

    let headers = if wildcard(&config.allowed_headers) {
        AllowHeaders::any()
    } else {
        let list = config
            .allowed_headers
            .iter()
            .map(|h| {
                HeaderName::from_bytes(h.trim().as_bytes())
                    .map_err(|_| TranslatorError::Config(format!("Invalid CORS header: {}", h)))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowHeaders::list(list)
    };

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers))
}

/// Per-client quota check. Runs before authentication.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_id(
        peer,
        request.headers(),
        state.config.rate_limit.trust_forwarded_headers,
    );

    if let Err(e) = state.rate_limiter.check(&client) {
        warn!(client = %client, "Rate limit exceeded");
        metrics::record_rejection(e.kind());
        return e.into_response();
    }

    next.run(request).await
}

/// Rejects requests whose `x-api-key` does not match the configured key.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Err(e) = state.authenticator.verify(provided) {
        warn!(
            key_present = provided.is_some(),
            "Rejected request with invalid API key"
        );
        metrics::record_rejection(e.kind());
        return e.into_response();
    }

    next.run(request).await
}

/// Count every response by method, route and status.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    metrics::record_request(&method, &endpoint, response.status().as_u16());
    response
}
