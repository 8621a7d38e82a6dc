//! # Search
//!
//! Submits new criteria. Submissions that narrow the catalog (a name term,
//! or a concrete type) are remembered in history before the engine runs;
//! a bare "everything" search is not.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::history::HistoryStore;
use crate::model::FilterCriteria;
use crate::query::QueryEngine;
use crate::source::CatalogSource;
use crate::store::KeyValueStore;
use tracing::warn;

pub async fn run<S, K>(
    engine: &QueryEngine<S>,
    history: &mut HistoryStore<K>,
    criteria: FilterCriteria,
) -> Result<CmdResult>
where
    S: CatalogSource,
    K: KeyValueStore,
{
    let mut result = CmdResult::default();

    if should_record(&criteria) {
        if let Err(e) = history.add_entry(&criteria) {
            warn!(error = %e, "failed to save search history");
            result.add_message(CmdMessage::warning(format!(
                "Could not save search history: {}",
                e
            )));
        }
    }

    let view = engine.set_criteria(criteria).await;
    Ok(result.with_view(view))
}

/// A submission is remembered when it filters by name or by a concrete type.
pub fn should_record(criteria: &FilterCriteria) -> bool {
    criteria.has_name_filter() || criteria.has_type_filter()
}
