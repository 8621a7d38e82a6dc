//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all dex operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the session: query engine, history store and config
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (trimmed terms, lowercased type tags)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over Source and Store
//!
//! `DexApi<S: CatalogSource, K: KeyValueStore>` is generic over both seams:
//! - Production: `DexApi<HttpSource, FsStore>`
//! - Testing: `DexApi<MemorySource, MemStore>`
//!
//! This enables testing the API layer without network or filesystem.
//!
//! ## Testing Strategy
//!
//! API tests should verify:
//! - Correct command is called for each method
//! - Arguments are passed/transformed correctly
//!
//! API tests should **not** verify command logic (tested in command modules).

use crate::catalog::CatalogCache;
use crate::commands::{self, CmdResult};
use crate::config::DexConfig;
use crate::error::Result;
use crate::filter::FilterPipeline;
use crate::history::HistoryStore;
use crate::model::{CatalogEntry, FilterCriteria};
use crate::query::{QueryEngine, QueryView};
use crate::source::CatalogSource;
use crate::store::KeyValueStore;
use std::sync::Arc;

/// The main API facade for dex operations.
///
/// All UI clients (CLI, REPL, etc.) should interact through this API.
pub struct DexApi<S: CatalogSource, K: KeyValueStore> {
    engine: QueryEngine<S>,
    history: HistoryStore<K>,
    config: DexConfig,
}

impl<S: CatalogSource, K: KeyValueStore> DexApi<S, K> {
    pub fn new(source: S, store: K, config: DexConfig) -> Self {
        let pipeline = if config.cache_type_members {
            FilterPipeline::with_membership_cache()
        } else {
            FilterPipeline::new()
        };
        let engine = QueryEngine::new(
            Arc::new(source),
            CatalogCache::new(config.catalog_limit),
            pipeline,
            config.page_size,
        );
        let history = HistoryStore::open(store, config.history_limit);

        Self {
            engine,
            history,
            config,
        }
    }

    pub fn config(&self) -> &DexConfig {
        &self.config
    }

    pub fn history_store(&self) -> &HistoryStore<K> {
        &self.history
    }

    /// Current view without triggering any recomputation.
    pub fn view(&self) -> QueryView {
        self.engine.view()
    }

    pub async fn search(&mut self, name: &str, type_tag: &str) -> Result<CmdResult> {
        self.search_criteria(FilterCriteria::new(name, type_tag)).await
    }

    pub async fn search_criteria(&mut self, criteria: FilterCriteria) -> Result<CmdResult> {
        commands::search::run(&self.engine, &mut self.history, criteria).await
    }

    pub async fn next_page(&self) -> Result<CmdResult> {
        commands::page::next(&self.engine).await
    }

    pub async fn prev_page(&self) -> Result<CmdResult> {
        commands::page::prev(&self.engine).await
    }

    pub async fn go_to_page(&self, page: usize) -> Result<CmdResult> {
        commands::page::go_to(&self.engine, page).await
    }

    pub async fn reload(&self) -> Result<CmdResult> {
        commands::reload::run(&self.engine).await
    }

    /// Drops the session catalog and membership cache, then recomputes.
    pub async fn reset_session(&self) -> Result<CmdResult> {
        Ok(CmdResult::default().with_view(self.engine.reset_session().await))
    }

    pub fn history(&self) -> Result<CmdResult> {
        commands::history::list(&self.history)
    }

    pub fn clear_history(&mut self) -> Result<CmdResult> {
        commands::history::clear(&mut self.history)
    }

    pub async fn replay(&self, position: usize) -> Result<CmdResult> {
        commands::history::replay(&self.engine, &self.history, position).await
    }

    pub async fn detail(&self, id: u32) -> Result<CmdResult> {
        commands::detail::run(self.engine.source(), id).await
    }

    pub fn types(&self) -> Result<CmdResult> {
        commands::types::run()
    }

    /// Sprite image URL for a list entry.
    pub fn sprite_url(&self, entry: &CatalogEntry) -> Option<String> {
        entry.sprite_url(&self.config.sprite_base_url)
    }
}
