//! # Data Model
//!
//! Value types shared by every layer. None of these carry behavior beyond
//! normalization and small derived accessors.
//!
//! - [`CatalogEntry`]: one creature in the session catalog (name + numeric id).
//! - [`FilterCriteria`]: the name/type pair driving a query.
//! - [`HistoryEntry`]: a persisted record of a past search submission.
//! - [`CreatureDetail`]: the full record behind `dex show <id>`.

use serde::{Deserialize, Serialize};

/// Sentinel type tag meaning "no type filter".
pub const ALL_TYPES: &str = "all";

/// Type tags offered to users, in display order. `all` comes first.
pub const KNOWN_TYPES: [&str; 19] = [
    ALL_TYPES, "normal", "fire", "water", "grass", "electric", "ice", "fighting", "poison",
    "ground", "flying", "psychic", "bug", "rock", "ghost", "dark", "dragon", "steel", "fairy",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub reference_id: Option<u32>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, reference_id: Option<u32>) -> Self {
        Self {
            name: name.into(),
            reference_id,
        }
    }

    /// Builds an entry from a listing item, deriving the id from its locator.
    pub fn from_locator(name: impl Into<String>, locator: &str) -> Self {
        Self::new(name, reference_id_from_locator(locator))
    }

    /// Sprite image location for this entry, if it has an id.
    pub fn sprite_url(&self, sprite_base: &str) -> Option<String> {
        self.reference_id
            .map(|id| format!("{}/{}.png", sprite_base.trim_end_matches('/'), id))
    }
}

/// Extracts the numeric id encoded as the second-to-last path segment.
///
/// `https://pokeapi.co/api/v2/pokemon/25/` → `Some(25)`. Locators are
/// expected to carry a trailing slash, so the last segment is empty.
pub fn reference_id_from_locator(locator: &str) -> Option<u32> {
    let parts: Vec<&str> = locator.split('/').collect();
    if parts.len() < 2 {
        return None;
    }
    parts[parts.len() - 2].parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub name_term: String,
    pub type_tag: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            name_term: String::new(),
            type_tag: ALL_TYPES.to_string(),
        }
    }
}

impl FilterCriteria {
    /// Builds normalized criteria. The name term is trimmed, the type tag is
    /// trimmed and lowercased. An empty type tag is kept empty: it only
    /// matters to the history store, the filter treats it like `all`.
    pub fn new(name_term: impl AsRef<str>, type_tag: impl AsRef<str>) -> Self {
        Self {
            name_term: name_term.as_ref().trim().to_string(),
            type_tag: type_tag.as_ref().trim().to_lowercase(),
        }
    }

    pub fn by_name(name_term: impl AsRef<str>) -> Self {
        Self::new(name_term, ALL_TYPES)
    }

    pub fn by_type(type_tag: impl AsRef<str>) -> Self {
        Self::new("", type_tag)
    }

    /// True when a concrete type filter is active.
    pub fn has_type_filter(&self) -> bool {
        !self.type_tag.is_empty() && self.type_tag != ALL_TYPES
    }

    pub fn has_name_filter(&self) -> bool {
        !self.name_term.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub term: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn matches(&self, criteria: &FilterCriteria) -> bool {
        self.term == criteria.name_term && self.type_tag == criteria.type_tag
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(&self.term, &self.type_tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatValue {
    pub name: String,
    pub base_stat: u32,
    pub effort: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatureDetail {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<String>,
    pub stats: Vec<StatValue>,
    pub abilities: Vec<Ability>,
    pub artwork_url: Option<String>,
}
