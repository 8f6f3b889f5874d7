// Error handling tests

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use nllb_translator::error::{FieldError, TranslatorError};
use serde_json::Value;

async fn body_json(error: TranslatorError) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = error.into_response();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_error_display_messages() {
    let errors = vec![
        TranslatorError::Unauthorized,
        TranslatorError::Validation(vec![FieldError::new("text", "field required")]),
        TranslatorError::UnsupportedLanguage("fra_Latn".to_string()),
        TranslatorError::RateLimited {
            limit: 10,
            window_secs: 60,
            retry_after_secs: 12,
        },
        TranslatorError::Model("session failed".to_string()),
        TranslatorError::InferenceTimeout(60),
        TranslatorError::Internal("join error".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_validation_message_lists_fields() {
    let error = TranslatorError::Validation(vec![
        FieldError::new("text", "field required"),
        FieldError::new("source_lang", "'en' is not one of: gn, es"),
    ]);
    let display = error.to_string();
    assert!(display.contains("text: field required"));
    assert!(display.contains("source_lang: 'en' is not one of: gn, es"));
}

#[test]
fn test_status_codes() {
    assert_eq!(TranslatorError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        TranslatorError::Validation(vec![]).status_code(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        TranslatorError::UnsupportedLanguage("x".into()).status_code(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        TranslatorError::RateLimited {
            limit: 1,
            window_secs: 1,
            retry_after_secs: 1
        }
        .status_code(),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        TranslatorError::PayloadTooLarge(65_536).status_code(),
        StatusCode::PAYLOAD_TOO_LARGE
    );
    assert_eq!(
        TranslatorError::InferenceTimeout(5).status_code(),
        StatusCode::GATEWAY_TIMEOUT
    );
    assert_eq!(
        TranslatorError::Model("x".into()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        TranslatorError::Config("x".into()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_error_kinds() {
    assert_eq!(TranslatorError::Unauthorized.kind(), "auth_error");
    assert_eq!(TranslatorError::Validation(vec![]).kind(), "validation_error");
    assert_eq!(TranslatorError::Model("x".into()).kind(), "model_error");
    assert_eq!(TranslatorError::InferenceTimeout(1).kind(), "timeout_error");
    assert_eq!(TranslatorError::Internal("x".into()).kind(), "internal_error");
}

#[tokio::test]
async fn test_unauthorized_response_body() {
    let (status, _, body) = body_json(TranslatorError::Unauthorized).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid API Key");
}

#[tokio::test]
async fn test_validation_response_lists_errors() {
    let error = TranslatorError::Validation(vec![FieldError::new("target_lang", "field required")]);
    let (status, _, body) = body_json(error).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "target_lang");
    assert_eq!(body["errors"][0]["message"], "field required");
}

#[tokio::test]
async fn test_rate_limited_sets_retry_after() {
    let error = TranslatorError::RateLimited {
        limit: 10,
        window_secs: 60,
        retry_after_secs: 17,
    };
    let (status, headers, body) = body_json(error).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(headers["retry-after"], "17");
    assert!(body["detail"].as_str().unwrap().contains("10 per 60s"));
}

#[tokio::test]
async fn test_internal_errors_are_masked() {
    for error in [
        TranslatorError::Model("onnxruntime: bad shape [1, 7]".to_string()),
        TranslatorError::Internal("task panicked".to_string()),
        TranslatorError::Config("missing model_dir".to_string()),
    ] {
        let (status, _, body) = body_json(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Translation failed");
        assert!(body.get("errors").is_none());
    }
}
