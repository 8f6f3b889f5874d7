// HTTP request handlers

use super::routes::AppState;
use crate::config::supported_codes;
use crate::error::{FieldError, Result, TranslatorError};
use crate::metrics;
use crate::models::{HealthResponse, ServiceInfo, TranslateRequest, TranslateResponse};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::time::{Duration, Instant};
use tracing::{error, info};

pub const SERVICE_NAME: &str = "Translator GN<->ES";

/// Translate payloads are short texts; anything larger is refused.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        supported_languages: supported_codes().into_iter().map(String::from).collect(),
    })
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

pub async fn metrics_handler() -> Result<Response> {
    let body = metrics::gather_metrics()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response())
}

/// Handler for /translate. Auth and rate limiting already ran as middleware.
pub async fn translate_handler(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<TranslateResponse>> {
    let req = body
        .map_err(body_error)
        .and_then(|body| TranslateRequest::from_json(&body))
        .inspect_err(|e| {
            metrics::record_rejection(e.kind());
        })?;

    info!(
        source = %req.source_lang,
        target = %req.target_lang,
        chars = req.text.chars().count(),
        "Received translate request"
    );

    let translator = state.translator.clone();
    let (source, target) = (req.source_lang, req.target_lang);

    // Inference is CPU bound; keep it off the async workers.
    let task = tokio::task::spawn_blocking(move || {
        let started = Instant::now();
        let result = translator.translate(&req.text, source, target);
        (result, started.elapsed())
    });

    let timeout_secs = state.config.model.inference_timeout_seconds;
    let joined = if timeout_secs == 0 {
        task.await
    } else {
        match tokio::time::timeout(Duration::from_secs(timeout_secs), task).await {
            Ok(joined) => joined,
            Err(_) => {
                error!(timeout_secs, "Translation timed out");
                let err = TranslatorError::InferenceTimeout(timeout_secs);
                metrics::record_translation_error(err.kind());
                return Err(err);
            }
        }
    };

    let (result, elapsed) =
        joined.map_err(|e| TranslatorError::Internal(format!("Translation task failed: {}", e)))?;

    match result {
        Ok(translated_text) => {
            metrics::record_translation(source, target, elapsed.as_secs_f64());
            info!(elapsed_ms = elapsed.as_millis() as u64, "Translation complete");
            Ok(Json(TranslateResponse { translated_text }))
        }
        Err(e) => {
            error!(error = %e, "Translation failed");
            metrics::record_translation_error(e.kind());
            Err(e)
        }
    }
}

fn body_error(rejection: BytesRejection) -> TranslatorError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        TranslatorError::PayloadTooLarge(MAX_BODY_BYTES)
    } else {
        TranslatorError::Validation(vec![FieldError::new("body", rejection.body_text())])
    }
}
