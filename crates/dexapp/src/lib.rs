//! # Dex Architecture
//!
//! Dex is a **UI-agnostic search engine over a remote creature database**. It is a
//! library that happens to have a CLI, not the other way around.
//!
//! The remote API only offers a bulk listing and per-type membership lookups, so all
//! name filtering, type intersection and pagination happen client-side over a catalog
//! fetched once per session.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (dex crate)                                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the session              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - search, page, history, detail, types, reload             │
//! │  - Returns structured CmdResult                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (query.rs → catalog.rs, filter.rs, paginate.rs)     │
//! │  History (history.rs)                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Seams                                                      │
//! │  - CatalogSource: HttpSource (production), MemorySource     │
//! │  - KeyValueStore: FsStore (production), MemStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//!
//! ## Testing Strategy
//!
//! 1. **Engine and commands**: Thorough unit tests against `MemorySource` and
//!    `MemStore`. This is where the lion's share of testing lives.
//! 2. **Seams**: `HttpSource` against `wiremock`, `FsStore` against `tempfile`.
//! 3. **API**: Dispatch and config wiring.
//! 4. **CLI**: End-to-end runs of the `dex` binary against a mock server.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per user operation
//! - [`query`]: Query orchestrator (criteria, page, last-request-wins)
//! - [`catalog`]: Session catalog cache
//! - [`filter`]: Type membership and name filter pipeline
//! - [`paginate`]: Page slicing
//! - [`history`]: Bounded, deduplicated search history
//! - [`source`]: Remote catalog access
//! - [`store`]: Key-value persistence
//! - [`model`]: Core data types
//! - [`config`]: Configuration management
//! - [`init`]: Context setup for UIs
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod history;
pub mod init;
pub mod model;
pub mod paginate;
pub mod query;
pub mod source;
pub mod store;

#[cfg(test)]
pub mod test_utils;
