//! Detail record DTOs
//!
//! Mirrors the JSON body returned by the remote detail lookup, so fetched
//! records can be decoded and cached as-is.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{Key, RecencyCache};
use crate::config::DEFAULT_CAPACITY;

/// Cache of detail records keyed by their id.
pub type DetailCache = RecencyCache<DigimonDetail>;

/// Full detail record for one Digimon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DigimonDetail {
    pub id: i64,
    pub name: String,
    pub x_antibody: bool,
    pub images: Vec<Image>,
    pub levels: Vec<Level>,
    pub types: Vec<Type>,
    pub attributes: Vec<Attribute>,
    pub fields: Vec<Field>,
    pub release_date: String,
    pub descriptions: Vec<Description>,
    pub skills: Vec<Skill>,
    pub prior_evolutions: Vec<Evolution>,
    pub next_evolutions: Vec<Evolution>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub href: String,
    pub transparent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level {
    pub id: i64,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Type {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    pub id: i64,
    pub attribute: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub id: i64,
    pub field: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
    pub origin: String,
    pub language: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub id: i64,
    pub skill: String,
    pub translation: String,
    pub description: String,
}

/// Link to a prior or next evolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Evolution {
    pub id: i64,
    pub digimon: String,
    pub condition: String,
    pub image: String,
    pub url: String,
}

impl DigimonDetail {
    /// Key this record is cached under. Records without a positive id
    /// (e.g. a failed name lookup decoded into defaults) have none.
    pub fn cache_key(&self) -> Option<Key> {
        (self.id > 0).then_some(self.id)
    }
}

/// Builds a detail cache with the default capacity.
pub fn new_detail_cache() -> DetailCache {
    DetailCache::with_capacity(DEFAULT_CAPACITY)
}

/// Stores a freshly fetched record under its own id.
///
/// Use this when the record came from a lookup by name, where the id is only
/// known from the body. Returns false, leaving the cache untouched, when the
/// record has no usable id.
pub fn cache_detail(cache: &DetailCache, detail: DigimonDetail) -> bool {
    match detail.cache_key() {
        Some(key) => {
            cache.put(key, detail);
            true
        }
        None => false,
    }
}

/// Stores a record fetched by id under the id that was requested.
///
/// A by-id lookup is cached under the requested key even if the body carries
/// a different or missing id, so the next `get` for that key hits.
pub fn cache_detail_as(cache: &DetailCache, requested: Key, detail: DigimonDetail) {
    if detail.id != requested {
        debug!(
            "Caching record with id {} under requested key {}",
            detail.id, requested
        );
    }
    cache.put(requested, detail);
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREYMON: &str = r#"{
        "id": 1009,
        "name": "Greymon",
        "xAntibody": false,
        "images": [{"href": "https://digi-api.com/images/digimon/w/Greymon.png", "transparent": false}],
        "levels": [{"id": 4, "level": "Adult"}],
        "types": [{"id": 31, "type": "Dinosaur"}],
        "attributes": [{"id": 2, "attribute": "Vaccine"}],
        "fields": [{"id": 6, "field": "Nature Spirits", "image": "https://digi-api.com/images/etc/fields/Nature_Spirits.png"}],
        "releaseDate": "1997",
        "descriptions": [{"origin": "reference_book", "language": "en_us", "description": "A Dinosaur Digimon."}],
        "skills": [{"id": 11, "skill": "Mega Flame", "translation": "", "description": "Spits fire."}],
        "priorEvolutions": [{"id": 50, "digimon": "Agumon", "condition": "", "image": "", "url": ""}],
        "nextEvolutions": []
    }"#;

    #[test]
    fn test_detail_deserialize() {
        let detail: DigimonDetail = serde_json::from_str(GREYMON).unwrap();

        assert_eq!(detail.id, 1009);
        assert_eq!(detail.name, "Greymon");
        assert_eq!(detail.types[0].kind, "Dinosaur");
        assert_eq!(detail.release_date, "1997");
        assert_eq!(detail.prior_evolutions[0].digimon, "Agumon");
        assert!(detail.next_evolutions.is_empty());
    }

    #[test]
    fn test_detail_missing_fields_default() {
        let detail: DigimonDetail = serde_json::from_str(r#"{"id": 3, "name": "Koromon"}"#).unwrap();

        assert_eq!(detail.cache_key(), Some(3));
        assert!(detail.skills.is_empty());
        assert!(!detail.x_antibody);
    }

    #[test]
    fn test_detail_serializes_camel_case() {
        let detail = DigimonDetail {
            id: 1,
            x_antibody: true,
            release_date: "2001".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["xAntibody"], true);
        assert_eq!(json["releaseDate"], "2001");
    }

    #[test]
    fn test_cache_key_requires_positive_id() {
        assert_eq!(DigimonDetail::default().cache_key(), None);

        let detail = DigimonDetail {
            id: -4,
            ..Default::default()
        };
        assert_eq!(detail.cache_key(), None);
    }

    #[test]
    fn test_new_detail_cache_capacity() {
        let cache = new_detail_cache();
        assert_eq!(cache.capacity(), DEFAULT_CAPACITY.get());
    }

    #[test]
    fn test_cache_detail() {
        let cache = new_detail_cache();
        let detail: DigimonDetail = serde_json::from_str(GREYMON).unwrap();

        assert!(cache_detail(&cache, detail.clone()));
        assert!(!cache_detail(&cache, DigimonDetail::default()));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(1009), Some(detail));
    }

    #[test]
    fn test_cache_detail_as_uses_requested_key() {
        let cache = new_detail_cache();
        let detail: DigimonDetail = serde_json::from_str(GREYMON).unwrap();

        // Body id differs from the id that was asked for
        cache_detail_as(&cache, 42, detail.clone());
        // Body carries no id at all
        cache_detail_as(&cache, 7, DigimonDetail::default());

        assert_eq!(cache.get(42), Some(detail));
        assert!(cache.get(1009).is_none());
        assert_eq!(cache.get(7), Some(DigimonDetail::default()));
        assert_eq!(cache.recent_keys(), vec![42, 7]);
    }
}
