//! # Search History
//!
//! A bounded, deduplicated, most-recent-first log of past search submissions,
//! persisted whole into a single key-value slot.
//!
//! ## Rules
//!
//! - **Qualifying submissions**: a submission is recorded unless both the name
//!   term and the type tag are empty. Note that the default type tag is `all`,
//!   so a bare "show everything" search *is* recorded.
//! - **Dedup by pair**: `(term, type)` identifies an entry. Re-submitting the
//!   same pair removes the old entry and prepends a fresh one with the new
//!   timestamp.
//! - **Bounded**: the list is truncated to the configured limit after every
//!   insert; the oldest entries fall off the end.
//! - **Single writer**: this store is the only writer of its slot. Every
//!   mutation rewrites the full list; [`HistoryStore::clear`] removes the slot.
//!
//! ## Fail-soft Loading
//!
//! A slot that does not parse is treated as `MalformedPersistedState`: it is
//! removed, a warning is logged and the history starts empty. Callers never
//! see the parse error.

use crate::error::{DexError, Result};
use crate::model::{FilterCriteria, HistoryEntry};
use crate::store::KeyValueStore;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

/// Name of the key-value slot holding the serialized history.
pub const HISTORY_SLOT: &str = "searchHistory";

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

pub struct HistoryStore<K: KeyValueStore> {
    store: K,
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl<K: KeyValueStore> HistoryStore<K> {
    /// Opens the history, loading the persisted slot if it is present and
    /// parseable.
    pub fn open(store: K, limit: usize) -> Self {
        let limit = limit.max(1);
        let mut entries = match load_entries(&store) {
            Ok(entries) => entries,
            Err(DexError::MalformedPersistedState(reason)) => {
                warn!(%reason, "discarding corrupt search history");
                if let Err(e) = store.remove(HISTORY_SLOT) {
                    warn!(error = %e, "failed to remove corrupt search history");
                }
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "failed to read search history, starting empty");
                Vec::new()
            }
        };
        entries.truncate(limit);

        Self {
            store,
            entries,
            limit,
        }
    }

    /// Entries, most recent first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Entry at a 1-based position, as shown to users.
    pub fn find(&self, position: usize) -> Option<&HistoryEntry> {
        position
            .checked_sub(1)
            .and_then(|idx| self.entries.get(idx))
    }

    /// Records a submission stamped with the current time.
    pub fn add_entry(&mut self, criteria: &FilterCriteria) -> Result<()> {
        self.add_entry_at(criteria, Utc::now())
    }

    /// Records a submission with an explicit timestamp.
    ///
    /// Returns `Ok(())` without touching anything when the submission does
    /// not qualify.
    pub fn add_entry_at(&mut self, criteria: &FilterCriteria, now: DateTime<Utc>) -> Result<()> {
        if criteria.name_term.is_empty() && criteria.type_tag.is_empty() {
            return Ok(());
        }

        let entry = HistoryEntry {
            term: criteria.name_term.clone(),
            type_tag: criteria.type_tag.clone(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        self.entries.retain(|existing| !existing.matches(criteria));
        self.entries.insert(0, entry);
        self.entries.truncate(self.limit);

        debug!(
            term = %criteria.name_term,
            type_tag = %criteria.type_tag,
            len = self.entries.len(),
            "recorded search"
        );
        self.persist()
    }

    /// Empties the history and removes the persisted slot entirely.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.store.remove(HISTORY_SLOT)
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(HISTORY_SLOT, &json)
    }
}

fn load_entries<K: KeyValueStore>(store: &K) -> Result<Vec<HistoryEntry>> {
    match store.get(HISTORY_SLOT)? {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| DexError::MalformedPersistedState(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemStore;
    use chrono::TimeZone;

    fn open_empty() -> HistoryStore<MemStore> {
        HistoryStore::open(MemStore::new(), DEFAULT_HISTORY_LIMIT)
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_starts_empty_without_slot() {
        let history = open_empty();
        assert!(history.is_empty());
        assert!(!history.store().contains(HISTORY_SLOT));
    }

    #[test]
    fn test_loads_persisted_entries() {
        let raw = r#"[{"term":"pikachu","type":"electric","timestamp":"2023-03-15T10:30:00Z"}]"#;
        let history = HistoryStore::open(
            MemStore::new().with_slot(HISTORY_SLOT, raw),
            DEFAULT_HISTORY_LIMIT,
        );

        assert_eq!(history.len(), 1);
        assert_eq!(history.list()[0].term, "pikachu");
        assert_eq!(history.list()[0].type_tag, "electric");
        assert_eq!(history.list()[0].timestamp, "2023-03-15T10:30:00Z");
    }

    #[test]
    fn test_corrupt_slot_is_discarded() {
        let history = HistoryStore::open(
            MemStore::new().with_slot(HISTORY_SLOT, "{not json"),
            DEFAULT_HISTORY_LIMIT,
        );

        assert!(history.is_empty());
        assert!(!history.store().contains(HISTORY_SLOT));
    }

    #[test]
    fn test_add_entry_prepends_and_persists() {
        let mut history = open_empty();
        history
            .add_entry_at(&FilterCriteria::new("charizard", "fire"), at(0))
            .unwrap();
        history
            .add_entry_at(&FilterCriteria::new("squirtle", "water"), at(1))
            .unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.list()[0].term, "squirtle");
        assert_eq!(history.list()[1].term, "charizard");

        let raw = history.store().raw(HISTORY_SLOT).unwrap();
        let persisted: Vec<HistoryEntry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, history.list());
    }

    #[test]
    fn test_empty_submission_is_ignored() {
        let mut history = open_empty();
        history.add_entry_at(&FilterCriteria::new("", ""), at(0)).unwrap();

        assert!(history.is_empty());
        assert!(!history.store().contains(HISTORY_SLOT));
    }

    #[test]
    fn test_default_criteria_is_recorded() {
        // type "all" is non-empty, so a bare search qualifies
        let mut history = open_empty();
        history.add_entry_at(&FilterCriteria::default(), at(0)).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.list()[0].type_tag, "all");
    }

    #[test]
    fn test_duplicate_pair_moves_to_front_with_new_timestamp() {
        let mut history = open_empty();
        let pikachu = FilterCriteria::new("pikachu", "electric");

        history.add_entry_at(&pikachu, at(0)).unwrap();
        history
            .add_entry_at(&FilterCriteria::new("eevee", "normal"), at(1))
            .unwrap();
        history.add_entry_at(&pikachu, at(2)).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.list()[0].term, "pikachu");
        assert_eq!(
            history.list()[0].timestamp,
            at(2).to_rfc3339_opts(SecondsFormat::Millis, true)
        );
        assert_eq!(history.list()[1].term, "eevee");
    }

    #[test]
    fn test_resubmission_keeps_single_entry() {
        let mut history = open_empty();
        let pikachu = FilterCriteria::new("pikachu", "electric");

        history.add_entry_at(&pikachu, at(0)).unwrap();
        history.add_entry_at(&pikachu, at(5)).unwrap();

        assert_eq!(history.len(), 1);
        assert!(history.list()[0].timestamp.starts_with("2023-11-14T22:13:25"));
    }

    #[test]
    fn test_same_term_different_type_are_distinct() {
        let mut history = open_empty();
        history
            .add_entry_at(&FilterCriteria::new("char", "fire"), at(0))
            .unwrap();
        history
            .add_entry_at(&FilterCriteria::new("char", "all"), at(1))
            .unwrap();

        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = open_empty();
        for i in 0..11 {
            history
                .add_entry_at(&FilterCriteria::new(format!("pokemon-{}", i), ""), at(i))
                .unwrap();
        }

        assert_eq!(history.len(), 10);
        assert_eq!(history.list()[0].term, "pokemon-10");
        assert_eq!(history.list()[9].term, "pokemon-1");
        assert!(history.list().iter().all(|e| e.term != "pokemon-0"));
    }

    #[test]
    fn test_many_additions_never_exceed_limit() {
        let mut history = open_empty();
        for i in 0..20 {
            history
                .add_entry_at(&FilterCriteria::new(format!("pokemon-{}", i), ""), at(i))
                .unwrap();
            assert!(history.len() <= 10);
        }
        assert_eq!(history.list()[0].term, "pokemon-19");
    }

    #[test]
    fn test_clear_removes_slot() {
        let mut history = open_empty();
        history
            .add_entry_at(&FilterCriteria::new("pikachu", "electric"), at(0))
            .unwrap();
        assert!(history.store().contains(HISTORY_SLOT));

        history.clear().unwrap();

        assert!(history.is_empty());
        assert!(!history.store().contains(HISTORY_SLOT));
    }

    #[test]
    fn test_find_is_one_based() {
        let mut history = open_empty();
        history.add_entry_at(&FilterCriteria::by_name("a"), at(0)).unwrap();
        history.add_entry_at(&FilterCriteria::by_name("b"), at(1)).unwrap();

        assert_eq!(history.find(1).unwrap().term, "b");
        assert_eq!(history.find(2).unwrap().term, "a");
        assert!(history.find(0).is_none());
        assert!(history.find(3).is_none());
    }

    #[test]
    fn test_write_error_propagates() {
        let mut history = open_empty();
        history.store().set_simulate_write_error(true);

        let result = history.add_entry_at(&FilterCriteria::by_name("mew"), at(0));
        assert!(matches!(result, Err(DexError::Io(_))));
    }

    #[test]
    fn test_persisted_list_is_truncated_to_limit_on_open() {
        let entries: Vec<HistoryEntry> = (0..5)
            .map(|i| HistoryEntry {
                term: format!("t{}", i),
                type_tag: "all".into(),
                timestamp: "2023-03-15T10:30:00Z".into(),
            })
            .collect();
        let raw = serde_json::to_string(&entries).unwrap();
        let history = HistoryStore::open(MemStore::new().with_slot(HISTORY_SLOT, &raw), 3);

        assert_eq!(history.len(), 3);
        assert_eq!(history.list()[0].term, "t0");
    }
}
