// Data Dragon URL builders

pub const DEFAULT_BASE_URL: &str = "https://ddragon.leagueoflegends.com";

/// Skin number of the base splash art every champion has.
pub const DEFAULT_SKIN_NUM: u32 = 0;

pub fn versions_url(base_url: &str) -> String {
    format!("{}/api/versions.json", base_url)
}

pub fn champions_url(base_url: &str, version: &str, locale: &str) -> String {
    format!("{}/cdn/{}/data/{}/champion.json", base_url, version, locale)
}

pub fn splash_url(base_url: &str, champion_id: &str, skin_num: u32) -> String {
    format!("{}/cdn/img/champion/splash/{}_{}.jpg", base_url, champion_id, skin_num)
}
