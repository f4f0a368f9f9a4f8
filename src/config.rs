use crate::api::endpoints::DEFAULT_BASE_URL;
use crate::error::AppError;
use std::env;

const DEFAULT_LOCALE: &str = "fr_FR";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub locale: String,
    /// Pinned data version; when unset the latest published version is used.
    pub version: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("DDRAGON_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let locale = env::var("DDRAGON_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());
        let version = env::var("DDRAGON_VERSION").ok().filter(|v| !v.trim().is_empty());

        let config = Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            locale,
            version,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AppError::ConfigError(format!(
                "DDRAGON_BASE_URL must start with http:// or https:// (got \"{}\")",
                self.base_url
            )));
        }

        if self.locale.trim().is_empty() {
            return Err(AppError::ConfigError("locale must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            version: None,
        }
    }
}
