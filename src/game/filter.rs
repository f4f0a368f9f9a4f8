use crate::catalog::Catalog;
use rand::seq::SliceRandom;
use rand::Rng;

/// Category selecting the whole roster.
pub const ALL_CATEGORIES: &str = "all";

/// Identifiers of every champion in `category`, in random order.
///
/// Tag matching is exact and case-sensitive. An empty result is not an error:
/// the session simply finishes straight away.
pub fn filter_champions<R: Rng + ?Sized>(catalog: &Catalog, category: &str, rng: &mut R) -> Vec<String> {
    let mut ids: Vec<String> = if category == ALL_CATEGORIES {
        catalog.keys().cloned().collect()
    } else {
        catalog
            .records()
            .filter(|record| record.has_tag(category))
            .map(|record| record.id.clone())
            .collect()
    };

    ids.shuffle(rng);
    ids
}
