//! Single-creature lookup. This bypasses the query engine entirely: the
//! record is fetched fresh on every call and never cached.

use crate::commands::CmdResult;
use crate::error::Result;
use crate::source::CatalogSource;

pub async fn run<S: CatalogSource + ?Sized>(source: &S, id: u32) -> Result<CmdResult> {
    let detail = source.fetch_detail(id).await?;
    Ok(CmdResult::default().with_detail(detail))
}
