//! Configuration data structures for the translation service.
//!
//! This module defines the schema for the application settings: HTTP server
//! binding, API-key authentication, the NLLB model runtime, rate limiting,
//! CORS policy and logging.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// API-key authentication for `/translate`.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Translation model and inference settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Per-client request quota.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Cross-origin policy.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8000`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// API-key settings. The key is wiped from memory when the config is dropped.
#[derive(Clone, Serialize, Deserialize, Default, Zeroize, ZeroizeOnDrop)]
pub struct AuthConfig {
    /// Shared secret expected in the `x-api-key` header.
    /// Usually supplied through `TRANSLATOR_API_KEY`. Empty means unset.
    #[serde(default)]
    pub api_key: String,
}

impl AuthConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &if self.is_configured() { "[REDACTED]" } else { "<unset>" })
            .finish()
    }
}

/// Settings for the NLLB model runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hugging Face repository holding `tokenizer.json` and the ONNX export.
    /// Default: `Xenova/nllb-200-distilled-600M`
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Local directory with the same layout as the repository. When set,
    /// nothing is downloaded.
    #[serde(default)]
    pub model_dir: Option<String>,

    /// Encoder graph, relative to the repository or `model_dir`.
    /// Default: `onnx/encoder_model.onnx`
    #[serde(default = "default_encoder_file")]
    pub encoder_file: String,

    /// Decoder graph (no past key/values), relative to the repository or
    /// `model_dir`.
    /// Default: `onnx/decoder_model.onnx`
    #[serde(default = "default_decoder_file")]
    pub decoder_file: String,

    /// Maximum generated sequence length, forced tokens included.
    /// Default: `200` (the model's generation config)
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Upper bound for a single translation. `0` disables the timeout.
    /// Default: `60`
    #[serde(default = "default_inference_timeout")]
    pub inference_timeout_seconds: u64,

    /// Threads used inside each ONNX Runtime session.
    /// Default: number of logical CPU cores.
    #[serde(default = "default_intra_threads")]
    pub intra_threads: usize,
}

/// Settings for the per-client rate limiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Quota as `<N>/<second|minute|hour|day>`.
    /// Default: `10/minute`
    #[serde(default = "default_quota")]
    pub quota: String,

    /// Key clients by `X-Forwarded-For` / `X-Real-IP` instead of the peer
    /// address. Only enable behind a trusted reverse proxy.
    /// Default: `false`
    #[serde(default)]
    pub trust_forwarded_headers: bool,
}

/// Cross-origin resource sharing policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API. `*` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Methods allowed in cross-origin requests.
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,

    /// Request headers allowed in cross-origin requests. `*` allows any.
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            model_dir: None,
            encoder_file: default_encoder_file(),
            decoder_file: default_decoder_file(),
            max_length: default_max_length(),
            inference_timeout_seconds: default_inference_timeout(),
            intra_threads: default_intra_threads(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            quota: default_quota(),
            trust_forwarded_headers: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_model_id() -> String {
    "Xenova/nllb-200-distilled-600M".to_string()
}

fn default_encoder_file() -> String {
    "onnx/encoder_model.onnx".to_string()
}

fn default_decoder_file() -> String {
    "onnx/decoder_model.onnx".to_string()
}

fn default_max_length() -> usize {
    200
}

fn default_inference_timeout() -> u64 {
    60
}

fn default_intra_threads() -> usize {
    num_cpus::get()
}

fn default_quota() -> String {
    "10/minute".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["https://your-vercel.app".to_string()]
}

fn default_allowed_methods() -> Vec<String> {
    vec!["POST".to_string()]
}

fn default_allowed_headers() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
