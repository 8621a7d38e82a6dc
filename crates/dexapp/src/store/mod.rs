//! # Storage Layer
//!
//! Dex persists exactly one thing: the search history. It lives in a named
//! slot of a small key-value store, the same shape a browser's local storage
//! has. The [`KeyValueStore`] trait is that shape.
//!
//! ## Slot Semantics
//!
//! - **Whole-value writes**: a slot is written in full on every mutation.
//!   There are no partial updates or appends.
//! - **Absent vs empty**: removing a slot deletes it. A slot holding `[]` is
//!   still present. Callers that need "gone" must call [`KeyValueStore::remove`].
//! - **Raw strings**: the store does not interpret values. Parsing (and
//!   recovering from corrupt values) is the owner's job.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsStore`]: one file per slot under a data directory,
//!   written atomically (temp file then rename).
//! - [`mem_backend::MemStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── dex.toml              # Configuration (see config.rs)
//! └── searchHistory.json    # History slot
//! ```

use crate::error::Result;

pub mod fs_backend;
pub mod mem_backend;

/// Abstract interface for single-slot durable storage.
pub trait KeyValueStore {
    /// Read a slot. Returns `Ok(None)` if the slot does not exist.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace a slot's value. MUST be atomic to avoid partial writes.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a slot. Removing an absent slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
