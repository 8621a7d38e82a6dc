use crate::commands::CmdResult;
use crate::error::Result;
use crate::query::QueryEngine;
use crate::source::CatalogSource;

/// Re-runs the current query with unchanged criteria and page.
pub async fn run<S: CatalogSource>(engine: &QueryEngine<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_view(engine.reload().await))
}
