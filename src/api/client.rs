use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::error::AppError;
use crate::game::image::{ImageLoad, ImageLoader};
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints;
use super::models::*;

const USER_AGENT: &str = "smash_or_pass/0.1.0";
const MAX_RETRIES: u32 = 3;
const IMAGE_PROBES_PER_SECOND: u32 = 20;

pub struct DataDragonClient {
    config: Config,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl DataDragonClient {
    pub fn new(config: Config) -> Self {
        let per_second = NonZeroU32::new(IMAGE_PROBES_PER_SECOND).unwrap_or(NonZeroU32::MIN);
        DataDragonClient {
            config,
            rate_limiter: RateLimiter::direct(Quota::per_second(per_second)),
            clock: DefaultClock::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        let mut retry_count = 0;

        loop {
            let response = ureq::get(url).set("User-Agent", USER_AGENT).call();

            match response {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    tracing::warn!(url, wait_ms, "rate limited, retrying");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    /// Latest data version, or the pinned one when configured.
    pub fn get_latest_version(&self) -> Result<String, AppError> {
        if let Some(version) = &self.config.version {
            tracing::debug!(version = %version, "using pinned data version");
            return Ok(version.clone());
        }

        let body = self.execute_request(&endpoints::versions_url(&self.config.base_url))?;
        let versions: Vec<String> =
            serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))?;

        versions
            .into_iter()
            .next()
            .ok_or_else(|| AppError::CatalogLoad("version list is empty".to_string()))
    }

    pub fn get_champions(&self, version: &str) -> Result<ChampionCatalogDto, AppError> {
        let url = endpoints::champions_url(&self.config.base_url, version, &self.config.locale);
        tracing::debug!(url = %url, "fetching champion catalog");

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    fn wait_for_probe_slot(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }
}

impl CatalogSource for DataDragonClient {
    fn latest_version(&self) -> Result<String, AppError> {
        self.get_latest_version()
    }

    fn champions(&self, version: &str) -> Result<ChampionCatalogDto, AppError> {
        self.get_champions(version)
    }
}

impl ImageLoader for DataDragonClient {
    fn load(&self, url: &str) -> ImageLoad {
        self.wait_for_probe_slot();

        match ureq::head(url).set("User-Agent", USER_AGENT).call() {
            Ok(_) => ImageLoad::Loaded(url.to_string()),
            Err(ureq::Error::Status(code, _)) => {
                tracing::warn!(url, status = code, "image not available");
                ImageLoad::Failed
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "image request failed");
                ImageLoad::Failed
            }
        }
    }
}
