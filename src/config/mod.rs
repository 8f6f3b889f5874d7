// Configuration module

mod languages;
mod models;
mod quota;

pub use languages::{model_tag, supported_codes, LanguageCode};
pub use models::*;
pub use quota::RateQuota;

use crate::error::{Result, TranslatorError};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

/// Environment variable carrying the API key secret.
pub const API_KEY_ENV: &str = "TRANSLATOR_API_KEY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. `TRANSLATOR_API_KEY` (highest)
    /// 2. Environment variables (`TRANSLATOR_<SECTION>__<KEY>`)
    /// 3. Config file (`path`, or the default location if it exists)
    /// 4. Defaults (lowest)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p.to_path_buf()).required(true),
            None => File::with_name(&Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("TRANSLATOR")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .with_list_parse_key("cors.allowed_methods")
                    .with_list_parse_key("cors.allowed_headers")
                    .try_parsing(true),
            )
            .set_override_option("auth.api_key", std::env::var(API_KEY_ENV).ok())?
            .build()
            .map_err(|e| TranslatorError::Config(e.to_string()))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| TranslatorError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail later, at request time.
    pub fn validate(&self) -> Result<()> {
        self.rate_limit.quota()?;

        if self.cors.allowed_origins.is_empty() {
            return Err(TranslatorError::Config(
                "cors.allowed_origins must list at least one origin".to_string(),
            ));
        }
        if self.model.max_length < 2 {
            return Err(TranslatorError::Config(
                "model.max_length must leave room for the forced language token".to_string(),
            ));
        }
        Ok(())
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".nllb-translator")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

impl RateLimitConfig {
    pub fn quota(&self) -> Result<RateQuota> {
        self.quota.parse()
    }
}
