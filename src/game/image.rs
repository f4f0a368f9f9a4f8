use crate::api::endpoints::{splash_url, DEFAULT_SKIN_NUM};
use crate::catalog::ChampionRecord;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLoad {
    Loaded(String),
    Failed,
}

/// Blocking image fetch. One call per candidate URL.
pub trait ImageLoader {
    fn load(&self, url: &str) -> ImageLoad;
}

/// Accepts every URL without touching the network.
pub struct UncheckedImages;

impl ImageLoader for UncheckedImages {
    fn load(&self, url: &str) -> ImageLoad {
        ImageLoad::Loaded(url.to_string())
    }
}

/// Splash URLs to try for `record`: a random skin first, then the default skin.
pub fn image_candidates<R: Rng + ?Sized>(base_url: &str, record: &ChampionRecord, rng: &mut R) -> Vec<String> {
    let default_url = splash_url(base_url, &record.id, DEFAULT_SKIN_NUM);

    let first = match record.skins.choose(rng) {
        Some(skin) => splash_url(base_url, &record.id, skin.num),
        None => default_url.clone(),
    };

    if first == default_url {
        vec![first]
    } else {
        vec![first, default_url]
    }
}

/// First candidate that loads, trying them strictly in order.
pub fn resolve_image(loader: &dyn ImageLoader, candidates: &[String]) -> Option<String> {
    for (attempt, url) in candidates.iter().enumerate() {
        match loader.load(url) {
            ImageLoad::Loaded(loaded) => return Some(loaded),
            ImageLoad::Failed => {
                if attempt + 1 < candidates.len() {
                    tracing::warn!(url = %url, "image failed, falling back to default skin");
                }
            }
        }
    }
    None
}
