// Error types for the translation service

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Message returned for every authentication failure.
pub const INVALID_API_KEY: &str = "Invalid API Key";

/// One rejected field of a translate payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("{}", INVALID_API_KEY)]
    Unauthorized,

    #[error("Validation failed: {}", describe_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Rate limit exceeded: {limit} per {window_secs}s")]
    RateLimited {
        limit: u32,
        window_secs: u64,
        retry_after_secs: u64,
    },

    #[error("Model error: {0}")]
    Model(String),

    #[error("Translation timed out after {0}s")]
    InferenceTimeout(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl TranslatorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TranslatorError::Unauthorized => StatusCode::UNAUTHORIZED,
            TranslatorError::Validation(_) | TranslatorError::UnsupportedLanguage(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            TranslatorError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            TranslatorError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            TranslatorError::InferenceTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TranslatorError::Unauthorized => "auth_error",
            TranslatorError::Validation(_) | TranslatorError::UnsupportedLanguage(_) => {
                "validation_error"
            }
            TranslatorError::PayloadTooLarge(_) => "payload_too_large",
            TranslatorError::RateLimited { .. } => "rate_limit_error",
            TranslatorError::Model(_) => "model_error",
            TranslatorError::InferenceTimeout(_) => "timeout_error",
            _ => "internal_error",
        }
    }
}

// Convert TranslatorError to HTTP responses for Axum
impl IntoResponse for TranslatorError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details stay in the logs, not in the response.
        let detail = match &self {
            TranslatorError::Model(_)
            | TranslatorError::Config(_)
            | TranslatorError::Io(_)
            | TranslatorError::Json(_)
            | TranslatorError::ConfigParsing(_)
            | TranslatorError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                "Translation failed".to_string()
            }
            _ => self.to_string(),
        };

        let body = match &self {
            TranslatorError::Validation(fields) => json!({ "detail": detail, "errors": fields }),
            _ => json!({ "detail": detail }),
        };

        match self {
            TranslatorError::RateLimited {
                retry_after_secs, ..
            } => (
                status,
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                axum::Json(body),
            )
                .into_response(),
            _ => (status, axum::Json(body)).into_response(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslatorError>;
