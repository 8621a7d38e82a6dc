//! # CLI Behavior
//!
//! This is **one possible UI client** for dex, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Naked Execution (`dex`)
//!
//! Running `dex` with no arguments behaves like `dex search`: every creature,
//! first page. Browsing is 90% of usage, so it should be the path of least
//! resistance.
//!
//! ## One-shot vs Session
//!
//! Each one-shot subcommand (`search`, `history --replay`) starts a fresh
//! session and fetches the catalog again. `dex browse` keeps a single session
//! alive, so paging and refining a search costs no extra listing request.
//!
//! ## History
//!
//! Searches that filter by name or by a concrete type are remembered (10 by
//! default). Replaying one with `dex history --replay N` or `r N` in a session
//! does not record it again.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup, logging setup and per-command handlers
//! - `browse`: The interactive prompt loop
//! - `render`: Output formatting (lists, details, colors)
//! - `setup`: Argument parsing via clap

mod browse;
mod commands;
mod render;
pub mod setup;

pub use commands::run;
