//! Page transitions. Moves that would not change the page leave the view
//! as it is.

use crate::commands::CmdResult;
use crate::error::Result;
use crate::query::QueryEngine;
use crate::source::CatalogSource;

pub async fn next<S: CatalogSource>(engine: &QueryEngine<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_view(engine.next_page().await))
}

pub async fn prev<S: CatalogSource>(engine: &QueryEngine<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_view(engine.prev_page().await))
}

/// Jumps to `page` (1-based), clamped to the available pages.
pub async fn go_to<S: CatalogSource>(engine: &QueryEngine<S>, page: usize) -> Result<CmdResult> {
    Ok(CmdResult::default().with_view(engine.go_to_page(page).await))
}
