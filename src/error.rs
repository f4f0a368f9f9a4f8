use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unable to load champion data: {0}")]
    CatalogLoad(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl AppError {
    /// Any failure on the way to a catalog is reported as a single load failure.
    pub fn into_catalog_load(self) -> AppError {
        match self {
            AppError::CatalogLoad(_) => self,
            other => AppError::CatalogLoad(other.to_string()),
        }
    }
}
