// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics, REJECTIONS_TOTAL, REQUESTS_TOTAL, TRANSLATION_DURATION, TRANSLATION_ERRORS,
};

use crate::config::LanguageCode;

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16) {
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status_code.to_string()])
        .inc();
}

/// Helper to record a request stopped by auth, rate limiting or validation
pub fn record_rejection(reason: &str) {
    REJECTIONS_TOTAL.with_label_values(&[reason]).inc();
}

/// Helper to record a finished inference call
pub fn record_translation(source: LanguageCode, target: LanguageCode, duration_secs: f64) {
    TRANSLATION_DURATION
        .with_label_values(&[source.as_str(), target.as_str()])
        .observe(duration_secs);
}

pub fn record_translation_error(error_type: &str) {
    TRANSLATION_ERRORS.with_label_values(&[error_type]).inc();
}
