// Prometheus metrics registry and collectors

use crate::error::{Result, TranslatorError};
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Total number of API requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of API requests"),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).expect("requests_total registers once");

    /// Requests rejected before reaching the engine
    pub static ref REJECTIONS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("rejections_total", "Requests rejected before translation"),
        &["reason"], // reason: auth_error, rate_limit_error, validation_error
        REGISTRY
    ).expect("rejections_total registers once");

    // ============================================================================
    // TRANSLATION METRICS
    // ============================================================================

    /// Model inference duration
    pub static ref TRANSLATION_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("translation_duration_seconds", "Model inference duration in seconds")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["source_lang", "target_lang"],
        REGISTRY
    ).expect("translation_duration_seconds registers once");

    /// Failed translations
    pub static ref TRANSLATION_ERRORS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("translation_errors_total", "Total failed translations"),
        &["error_type"], // error_type: model_error, timeout_error, internal_error
        REGISTRY
    ).expect("translation_errors_total registers once");
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TranslatorError::Internal(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| TranslatorError::Internal(format!("Metrics are not UTF-8: {}", e)))
}
