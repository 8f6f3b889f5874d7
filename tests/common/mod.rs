// Shared fixtures for integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use nllb_translator::config::{AppConfig, LanguageCode, RateQuota};
use nllb_translator::engine::Translator;
use nllb_translator::error::{Result, TranslatorError};
use nllb_translator::rate_limit::{ManualClock, RateLimiter};
use nllb_translator::server::{create_router, AppState};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const API_KEY: &str = "test-key";

/// Returns `[src>tgt] text` and counts calls.
#[derive(Default)]
pub struct EchoTranslator {
    calls: AtomicUsize,
}

impl EchoTranslator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Translator for EchoTranslator {
    fn translate(&self, text: &str, source: LanguageCode, target: LanguageCode) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{}>{}] {}", source, target, text))
    }
}

pub struct FailingTranslator;

impl Translator for FailingTranslator {
    fn translate(&self, _: &str, _: LanguageCode, _: LanguageCode) -> Result<String> {
        Err(TranslatorError::Model("CUDA out of memory".to_string()))
    }
}

pub struct SlowTranslator(pub Duration);

impl Translator for SlowTranslator {
    fn translate(&self, text: &str, _: LanguageCode, _: LanguageCode) -> Result<String> {
        std::thread::sleep(self.0);
        Ok(text.to_string())
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.api_key = API_KEY.to_string();
    config
}

/// Router with a manual-clock rate limiter so tests control the window.
pub fn test_app(
    config: AppConfig,
    translator: Arc<dyn Translator>,
    quota: RateQuota,
) -> (Router, ManualClock) {
    let clock = ManualClock::new();
    let limiter = RateLimiter::with_clock(quota, Arc::new(clock.clone()));
    let state = AppState::new(config, translator)
        .unwrap()
        .with_rate_limiter(limiter);
    (create_router(state).unwrap(), clock)
}

pub fn translate_request(body: Value, key: Option<&str>, peer: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    let mut req = builder.body(Body::from(body.to_string())).unwrap();
    let addr: SocketAddr = format!("{}:40000", peer).parse().unwrap();
    req.extensions_mut().insert(ConnectInfo(addr));
    req
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}
