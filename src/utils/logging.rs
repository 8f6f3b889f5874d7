//! Structured logging setup.
//!
//! Configures the `tracing` ecosystem for the service with either
//! human-readable or JSON output.

use crate::config::LoggingConfig;
use crate::error::{Result, TranslatorError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// `RUST_LOG` takes precedence over `LoggingConfig::level`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| TranslatorError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    result.map_err(|e| TranslatorError::Internal(format!("Logging already initialized: {}", e)))
}
