//! # Catalog Source
//!
//! The remote creature database, seen through the three calls dex needs:
//!
//! | Call | Endpoint | Used by |
//! |------|----------|---------|
//! | [`CatalogSource::fetch_listing`] | `GET <base>/pokemon?limit=N` | catalog cache |
//! | [`CatalogSource::fetch_type_members`] | `GET <base>/type/<tag>` | filter pipeline |
//! | [`CatalogSource::fetch_detail`] | `GET <base>/pokemon/<id>` | detail command |
//!
//! The source is read-only and owned by someone else. Dex treats it as an
//! opaque data provider: any transport error, non-success status or
//! undecodable body is reported as [`DexError::SourceUnavailable`]. No retries
//! happen at this level.
//!
//! ## Implementations
//!
//! - [`http::HttpSource`]: production implementation over `reqwest`.
//! - [`memory::MemorySource`]: canned data for tests, with failure switches,
//!   call counters and gates for holding a response open.
//!
//! [`DexError::SourceUnavailable`]: crate::error::DexError::SourceUnavailable

use crate::error::Result;
use crate::model::{CatalogEntry, CreatureDetail};
use async_trait::async_trait;

pub mod http;
pub mod memory;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the whole catalog in one request, in source order.
    async fn fetch_listing(&self, limit: usize) -> Result<Vec<CatalogEntry>>;

    /// Fetch the names of every entity belonging to a type.
    async fn fetch_type_members(&self, type_tag: &str) -> Result<Vec<String>>;

    /// Fetch the full record of one entity.
    async fn fetch_detail(&self, id: u32) -> Result<CreatureDetail>;
}
