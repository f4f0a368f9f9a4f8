use serde::Deserialize;
use std::collections::BTreeMap;

// Data Dragon champion.json response
#[derive(Debug, Deserialize)]
pub struct ChampionCatalogDto {
    #[serde(default)]
    pub version: String,
    pub data: BTreeMap<String, ChampionDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChampionDto {
    pub name: String,
    pub title: String,
    pub tags: Vec<String>,
    // Only present in the per-champion and championFull documents
    #[serde(default)]
    pub skins: Vec<SkinDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SkinDto {
    pub num: u32,
}
