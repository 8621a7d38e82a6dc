//! # History Commands
//!
//! - [`list`]: Entries, most recent first
//! - [`clear`]: Forget everything and remove the persisted slot
//! - [`replay`]: Re-run a past search by its 1-based position
//!
//! Replaying does not record the search again, so the list order is left
//! untouched.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DexError, Result};
use crate::history::HistoryStore;
use crate::query::QueryEngine;
use crate::source::CatalogSource;
use crate::store::KeyValueStore;

pub fn list<K: KeyValueStore>(history: &HistoryStore<K>) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_history(history.list().to_vec());
    if history.is_empty() {
        result.add_message(CmdMessage::info("No search history."));
    }
    Ok(result)
}

pub fn clear<K: KeyValueStore>(history: &mut HistoryStore<K>) -> Result<CmdResult> {
    history.clear()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Search history cleared."));
    Ok(result)
}

pub async fn replay<S, K>(
    engine: &QueryEngine<S>,
    history: &HistoryStore<K>,
    position: usize,
) -> Result<CmdResult>
where
    S: CatalogSource,
    K: KeyValueStore,
{
    let criteria = history
        .find(position)
        .map(|entry| entry.criteria())
        .ok_or_else(|| {
            DexError::Api(format!(
                "No history entry at position {} (history has {})",
                position,
                history.len()
            ))
        })?;

    let view = engine.set_criteria(criteria).await;
    Ok(CmdResult::default().with_view(view))
}
