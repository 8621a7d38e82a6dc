use super::CatalogSource;
use crate::error::{DexError, Result};
use crate::model::{CatalogEntry, CreatureDetail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;

/// In-memory catalog source for testing.
///
/// Serves canned data and records how often each endpoint was hit. Failures
/// can be switched on per endpoint, and a type membership response can be
/// held open until the test releases it, which is how out-of-order
/// completions are staged.
#[derive(Default)]
pub struct MemorySource {
    catalog: Vec<CatalogEntry>,
    types: HashMap<String, Vec<String>>,
    details: HashMap<u32, CreatureDetail>,
    listing_calls: AtomicUsize,
    type_calls: AtomicUsize,
    fail_listing: AtomicBool,
    fail_types: AtomicBool,
    type_gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog from bare names; ids are assigned 1, 2, 3... in order.
    pub fn with_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let catalog = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| CatalogEntry::new(name, Some(i as u32 + 1)))
            .collect();
        Self {
            catalog,
            ..Default::default()
        }
    }

    pub fn with_type<I, N>(mut self, type_tag: &str, members: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.types.insert(
            type_tag.to_string(),
            members.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_detail(mut self, detail: CreatureDetail) -> Self {
        self.details.insert(detail.id, detail);
        self
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    pub fn type_calls(&self) -> usize {
        self.type_calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_types(&self, fail: bool) {
        self.fail_types.store(fail, Ordering::SeqCst);
    }

    /// Holds the next membership fetch for `type_tag` until the returned
    /// handle is notified. The gate applies to one fetch only.
    pub fn hold_type_members(&self, type_tag: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.type_gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(type_tag.to_string(), Arc::clone(&gate));
        gate
    }

    fn take_gate(&self, type_tag: &str) -> Option<Arc<Notify>> {
        self.type_gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(type_tag)
    }
}

#[async_trait]
impl CatalogSource for MemorySource {
    async fn fetch_listing(&self, limit: usize) -> Result<Vec<CatalogEntry>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(DexError::SourceUnavailable(
                "Failed to fetch catalog listing (simulated)".to_string(),
            ));
        }
        Ok(self.catalog.iter().take(limit).cloned().collect())
    }

    async fn fetch_type_members(&self, type_tag: &str) -> Result<Vec<String>> {
        self.type_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = self.take_gate(type_tag) {
            gate.notified().await;
        }

        if self.fail_types.load(Ordering::SeqCst) {
            return Err(DexError::SourceUnavailable(format!(
                "Failed to fetch members of type '{}' (simulated)",
                type_tag
            )));
        }
        self.types.get(type_tag).cloned().ok_or_else(|| {
            DexError::SourceUnavailable(format!(
                "Failed to fetch members of type '{}' (404 Not Found)",
                type_tag
            ))
        })
    }

    async fn fetch_detail(&self, id: u32) -> Result<CreatureDetail> {
        self.details.get(&id).cloned().ok_or_else(|| {
            DexError::SourceUnavailable(format!("Failed to fetch details for #{} (404 Not Found)", id))
        })
    }
}
