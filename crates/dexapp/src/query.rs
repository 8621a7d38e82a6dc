//! # Query Orchestrator
//!
//! [`QueryEngine`] is the state machine a UI drives. It owns the current page
//! and criteria, sequences catalog → filter → paginate on every transition,
//! and exposes the outcome as a single [`QueryView`].
//!
//! ## Transitions
//!
//! | Transition | Effect |
//! |------------|--------|
//! | [`set_criteria`](QueryEngine::set_criteria) | replace criteria, page = 1, drop old result, recompute |
//! | [`next_page`](QueryEngine::next_page) | page = min(page + 1, max(total_pages, 1)) |
//! | [`prev_page`](QueryEngine::prev_page) | page = max(page - 1, 1) |
//! | [`go_to_page`](QueryEngine::go_to_page) | page = clamp(n, 1, max(total_pages, 1)) |
//! | [`reload`](QueryEngine::reload) | recompute with unchanged state |
//! | [`reset_session`](QueryEngine::reset_session) | drop cached catalog, recompute |
//!
//! Page moves that would not change the page are no-ops: nothing is
//! recomputed and no error is raised.
//!
//! ## Last Request Wins
//!
//! Transitions can overlap while fetches are suspended. Every recomputation
//! takes a ticket from a monotonically increasing sequence before it starts.
//! When it finishes, its outcome is applied only if its ticket is still the
//! newest one issued; otherwise it is discarded. In-flight fetches are never
//! cancelled, only ignored.
//!
//! ## Errors
//!
//! A failed recomputation clears the result and records the failure message
//! in [`QueryView::error`]. The next successful recomputation clears it. The
//! engine stays usable after any failure.

use crate::catalog::CatalogCache;
use crate::error::{DexError, Result};
use crate::filter::FilterPipeline;
use crate::model::{CatalogEntry, FilterCriteria};
use crate::paginate::{self, Page};
use crate::source::CatalogSource;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Everything a presentation layer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryView {
    pub items: Vec<CatalogEntry>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub criteria: FilterCriteria,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl QueryView {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

struct QueryState {
    page: usize,
    criteria: FilterCriteria,
    result: Option<Page>,
    error: Option<String>,
    in_flight: usize,
}

impl QueryState {
    fn total_pages(&self) -> usize {
        self.result.as_ref().map_or(0, |r| r.total_pages)
    }

    fn last_page(&self) -> usize {
        self.total_pages().max(1)
    }

    fn view(&self) -> QueryView {
        let (items, total_pages, total_count) = match &self.result {
            Some(r) => (r.items.clone(), r.total_pages, r.total_count),
            None => (Vec::new(), 0, 0),
        };
        QueryView {
            items,
            page: self.page,
            total_pages,
            total_count,
            criteria: self.criteria.clone(),
            is_loading: self.in_flight > 0,
            error: self.error.clone(),
        }
    }
}

pub struct QueryEngine<S: CatalogSource> {
    source: Arc<S>,
    catalog: CatalogCache,
    pipeline: FilterPipeline,
    page_size: usize,
    state: Mutex<QueryState>,
    sequence: AtomicU64,
}

impl<S: CatalogSource> QueryEngine<S> {
    pub fn new(
        source: Arc<S>,
        catalog: CatalogCache,
        pipeline: FilterPipeline,
        page_size: usize,
    ) -> Self {
        Self {
            source,
            catalog,
            pipeline,
            page_size: page_size.max(1),
            state: Mutex::new(QueryState {
                page: 1,
                criteria: FilterCriteria::default(),
                result: None,
                error: None,
                in_flight: 0,
            }),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn catalog_loaded(&self) -> bool {
        self.catalog.is_loaded()
    }

    /// Snapshot of the latest applied state.
    pub fn view(&self) -> QueryView {
        self.lock_state().view()
    }

    pub async fn set_criteria(&self, criteria: FilterCriteria) -> QueryView {
        {
            let mut state = self.lock_state();
            state.criteria = criteria;
            state.page = 1;
            // Page moves must not clamp against the previous criteria's result
            state.result = None;
        }
        self.recompute().await
    }

    pub async fn next_page(&self) -> QueryView {
        self.move_page(|page, last| (page + 1).min(last)).await
    }

    pub async fn prev_page(&self) -> QueryView {
        self.move_page(|page, _| page.saturating_sub(1).max(1)).await
    }

    pub async fn go_to_page(&self, page: usize) -> QueryView {
        self.move_page(|_, last| page.clamp(1, last)).await
    }

    pub async fn reload(&self) -> QueryView {
        self.recompute().await
    }

    /// Starts a new session: the catalog (and any cached membership) is
    /// fetched again on the next recomputation, which runs immediately.
    pub async fn reset_session(&self) -> QueryView {
        tracing::info!("resetting catalog session");
        self.catalog.reset();
        self.pipeline.clear_cache();
        self.recompute().await
    }

    async fn move_page<F>(&self, target: F) -> QueryView
    where
        F: FnOnce(usize, usize) -> usize,
    {
        {
            let mut state = self.lock_state();
            let next = target(state.page, state.last_page());
            if next == state.page {
                return state.view();
            }
            state.page = next;
        }
        self.recompute().await
    }

    async fn recompute(&self) -> QueryView {
        let (ticket, criteria, page) = {
            let mut state = self.lock_state();
            state.in_flight += 1;
            let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
            (ticket, state.criteria.clone(), state.page)
        };

        let outcome = self.compute(&criteria, page).await;

        let mut state = self.lock_state();
        state.in_flight -= 1;

        if ticket != self.sequence.load(Ordering::SeqCst) {
            debug!(ticket, "discarding superseded recomputation");
            return state.view();
        }

        match outcome {
            Ok(result) => {
                state.result = Some(result);
                state.error = None;
            }
            Err(e) => {
                debug!(error = %e, "recomputation failed");
                state.result = None;
                state.error = Some(failure_message(e));
            }
        }
        state.view()
    }

    async fn compute(&self, criteria: &FilterCriteria, page: usize) -> Result<Page> {
        let catalog = self.catalog.get_catalog(self.source.as_ref()).await?;
        let filtered = self
            .pipeline
            .apply(self.source.as_ref(), &catalog, criteria)
            .await?;
        Ok(paginate::slice(&filtered, page, self.page_size))
    }

    fn lock_state(&self) -> MutexGuard<'_, QueryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn failure_message(err: DexError) -> String {
    match err {
        DexError::SourceUnavailable(message) => message,
        other => other.to_string(),
    }
}
