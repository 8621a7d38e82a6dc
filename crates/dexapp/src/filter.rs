//! # Filter Pipeline
//!
//! Narrows the session catalog down to the entries matching a
//! [`FilterCriteria`]. Source order is always preserved.
//!
//! ## Stages
//!
//! 1. **Type membership**: when a concrete type is selected, the membership
//!    set for that type is fetched from the source and only catalog entries
//!    whose name is in the set survive.
//! 2. **Name substring**: when a name term is given, only entries whose name
//!    contains it (case-insensitive) survive.
//!
//! Stage 2 runs on the output of stage 1, never independently: the two
//! filters are AND-ed. With neither active the catalog passes through as is.
//!
//! ## Membership Caching
//!
//! By default the membership set is fetched on *every* application. A
//! [`MembershipCache`] can be switched on (`cache_type_members = true`) to
//! keep one set per tag for the rest of the session. Both modes produce the
//! same results; the cache only saves requests.

use crate::error::Result;
use crate::model::{CatalogEntry, FilterCriteria};
use crate::source::CatalogSource;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

type MemberSet = Arc<HashSet<String>>;

/// Per-tag membership sets, filled on first use.
#[derive(Default)]
pub struct MembershipCache {
    sets: Mutex<HashMap<String, MemberSet>>,
}

impl MembershipCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, type_tag: &str) -> Option<MemberSet> {
        self.lock().get(type_tag).cloned()
    }

    fn insert(&self, type_tag: &str, members: MemberSet) {
        self.lock().insert(type_tag.to_string(), members);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, MemberSet>> {
        self.sets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Default)]
pub struct FilterPipeline {
    members: Option<MembershipCache>,
}

impl FilterPipeline {
    /// Pipeline that fetches membership on every application.
    pub fn new() -> Self {
        Self { members: None }
    }

    /// Pipeline that remembers membership sets per tag.
    pub fn with_membership_cache() -> Self {
        Self {
            members: Some(MembershipCache::new()),
        }
    }

    /// Forget cached membership sets, if any.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.members {
            cache.clear();
        }
    }

    /// Applies `criteria` to `catalog`. Membership fetch failures propagate.
    pub async fn apply<S>(
        &self,
        source: &S,
        catalog: &[CatalogEntry],
        criteria: &FilterCriteria,
    ) -> Result<Vec<CatalogEntry>>
    where
        S: CatalogSource + ?Sized,
    {
        let mut entries = catalog.to_vec();

        if criteria.has_type_filter() {
            let members = self.membership(source, &criteria.type_tag).await?;
            entries = filter_by_members(entries, &members);
        }

        if criteria.has_name_filter() {
            entries = filter_by_name(entries, &criteria.name_term);
        }

        debug!(
            name = %criteria.name_term,
            type_tag = %criteria.type_tag,
            matched = entries.len(),
            "filtered catalog"
        );
        Ok(entries)
    }

    async fn membership<S>(&self, source: &S, type_tag: &str) -> Result<MemberSet>
    where
        S: CatalogSource + ?Sized,
    {
        if let Some(hit) = self.members.as_ref().and_then(|c| c.get(type_tag)) {
            debug!(type_tag, "membership cache hit");
            return Ok(hit);
        }

        let names = source.fetch_type_members(type_tag).await?;
        let set: MemberSet = Arc::new(names.into_iter().collect());

        if let Some(cache) = &self.members {
            cache.insert(type_tag, Arc::clone(&set));
        }
        Ok(set)
    }
}

/// Keeps entries whose name is in `members`.
pub fn filter_by_members(entries: Vec<CatalogEntry>, members: &HashSet<String>) -> Vec<CatalogEntry> {
    entries
        .into_iter()
        .filter(|entry| members.contains(&entry.name))
        .collect()
}

/// Keeps entries whose name contains `term`, ignoring case and surrounding
/// whitespace in the term.
pub fn filter_by_name(entries: Vec<CatalogEntry>, term: &str) -> Vec<CatalogEntry> {
    let term_lower = term.trim().to_lowercase();
    if term_lower.is_empty() {
        return entries;
    }
    entries
        .into_iter()
        .filter(|entry| entry.name.to_lowercase().contains(&term_lower))
        .collect()
}
