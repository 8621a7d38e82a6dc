//! # Catalog Cache
//!
//! The full catalog is fetched once per session, on first demand, and then
//! served from memory no matter how the criteria change.
//!
//! - **One fetch**: the first successful [`CatalogCache::get_catalog`] call
//!   pays for a single listing request asking for the entire catalog.
//!   Concurrent first callers wait on that same request.
//! - **No partial state**: a failed fetch caches nothing. The next call tries
//!   again.
//! - **Explicit reset only**: [`CatalogCache::reset`] starts a new session.
//!   A fetch that was in flight when the reset happened fills the old
//!   session's cell, which nobody reads anymore.

use crate::error::{DexError, Result};
use crate::model::CatalogEntry;
use crate::source::CatalogSource;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, info};

pub const DEFAULT_CATALOG_LIMIT: usize = 1302;

type Catalog = Arc<[CatalogEntry]>;

pub struct CatalogCache {
    limit: usize,
    session: Mutex<Arc<OnceCell<Catalog>>>,
}

impl CatalogCache {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            session: Mutex::new(Arc::new(OnceCell::new())),
        }
    }

    /// Returns the session catalog, fetching it from `source` on first use.
    pub async fn get_catalog<S>(&self, source: &S) -> Result<Catalog>
    where
        S: CatalogSource + ?Sized,
    {
        let cell = self.current_session();
        let catalog = cell
            .get_or_try_init(|| async {
                debug!(limit = self.limit, "fetching catalog");
                let entries = source.fetch_listing(self.limit).await?;
                info!(count = entries.len(), "catalog loaded");
                Ok::<Catalog, DexError>(entries.into())
            })
            .await?;
        Ok(Arc::clone(catalog))
    }

    /// True once the current session's catalog has been fetched.
    pub fn is_loaded(&self) -> bool {
        self.current_session().initialized()
    }

    /// Drops the memoized catalog; the next access fetches again.
    pub fn reset(&self) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Arc::new(OnceCell::new());
    }

    fn current_session(&self) -> Arc<OnceCell<Catalog>> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_LIMIT)
    }
}
