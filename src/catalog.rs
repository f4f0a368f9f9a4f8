use crate::api::models::ChampionCatalogDto;
use crate::error::AppError;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skin {
    pub num: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub tags: Vec<String>,
    pub skins: Vec<Skin>,
}

impl ChampionRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The two fetches a catalog load needs.
pub trait CatalogSource {
    fn latest_version(&self) -> Result<String, AppError>;
    fn champions(&self, version: &str) -> Result<ChampionCatalogDto, AppError>;
}

/// Champion records keyed by identifier. Built once, read-only afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    version: String,
    champions: BTreeMap<String, Rc<ChampionRecord>>,
}

impl Catalog {
    pub fn from_dto(dto: ChampionCatalogDto) -> Self {
        let champions = dto
            .data
            .into_iter()
            .filter(|(key, champ)| {
                if champ.tags.is_empty() {
                    tracing::warn!(champion = %key, "champion has no tags, leaving it out");
                }
                !champ.tags.is_empty()
            })
            .map(|(key, champ)| {
                let mut tags: Vec<String> = Vec::with_capacity(champ.tags.len());
                for tag in champ.tags {
                    if !tags.contains(&tag) {
                        tags.push(tag);
                    }
                }

                let record = ChampionRecord {
                    id: key.clone(),
                    name: champ.name,
                    title: champ.title,
                    tags,
                    skins: champ
                        .skins
                        .into_iter()
                        .map(|s| Skin { num: s.num })
                        .collect(),
                };
                (key, Rc::new(record))
            })
            .collect();

        Catalog {
            version: dto.version,
            champions,
        }
    }

    /// Fetches the latest version and its champion catalog.
    pub fn load(source: &dyn CatalogSource) -> Result<Self, AppError> {
        let version = source
            .latest_version()
            .map_err(AppError::into_catalog_load)?;
        let mut dto = source
            .champions(&version)
            .map_err(AppError::into_catalog_load)?;

        if dto.version.is_empty() {
            dto.version = version;
        }

        let catalog = Catalog::from_dto(dto);
        if catalog.champions.is_empty() {
            return Err(AppError::CatalogLoad(format!(
                "champion catalog for {} is empty",
                catalog.version
            )));
        }

        Ok(catalog)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn get(&self, id: &str) -> Option<&Rc<ChampionRecord>> {
        self.champions.get(id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.champions.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &Rc<ChampionRecord>> {
        self.champions.values()
    }

    /// Distinct tags in first-seen order, with the number of champions carrying each.
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in self.records() {
            for tag in &record.tags {
                match counts.iter_mut().find(|(t, _)| t == tag) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((tag.clone(), 1)),
                }
            }
        }
        counts
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.records().any(|r| r.has_tag(tag))
    }
}
