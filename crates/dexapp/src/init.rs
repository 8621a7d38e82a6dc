//! # Context Initialization
//!
//! Builds a ready-to-use [`DexContext`] for a UI: resolves the data
//! directory, loads configuration from it and wires the production source
//! and store into a [`DexApi`].
//!
//! ## Data Directory Resolution
//!
//! 1. `data_override` (the CLI's `--data` flag), used as is.
//! 2. `DEX_DATA_DIR` environment variable (primarily for testing).
//! 3. The OS-appropriate data directory via the `directories` crate.
//!
//! The directory holds `dex.toml` and `searchHistory.json`. It is created
//! lazily on the first history write.

use crate::api::DexApi;
use crate::config::DexConfig;
use crate::error::{DexError, Result};
use crate::source::http::HttpSource;
use crate::store::fs_backend::FsStore;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "DEX_DATA_DIR";

pub struct DexContext {
    pub api: DexApi<HttpSource, FsStore>,
    pub config: DexConfig,
    pub data_dir: PathBuf,
}

/// Picks the data directory: override, then `DEX_DATA_DIR`, then the OS
/// default.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }

    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    ProjectDirs::from("com", "dex", "dex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DexError::Config("Could not determine data directory".to_string()))
}

/// Initializes the dex context against the remote API.
pub fn initialize(data_override: Option<PathBuf>) -> Result<DexContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = DexConfig::load(&data_dir)?;

    let source = HttpSource::from_config(&config)?;
    let store = FsStore::new(&data_dir);
    let api = DexApi::new(source, store, config.clone());

    Ok(DexContext {
        api,
        config,
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_path;
    use crate::test_utils::TestEnv;
    use std::fs;

    #[test]
    fn test_override_wins() {
        let env = TestEnv::new();
        let resolved = resolve_data_dir(Some(env.root.clone())).unwrap();
        assert_eq!(resolved, env.root);
    }

    #[test]
    fn test_initialize_reads_config_from_data_dir() {
        let env = TestEnv::new();
        fs::write(config_path(&env.root), "page_size = 7\n").unwrap();

        let ctx = initialize(Some(env.root.clone())).unwrap();
        assert_eq!(ctx.config.page_size, 7);
        assert_eq!(ctx.api.config().page_size, 7);
        assert_eq!(ctx.data_dir, env.root);
    }

    #[test]
    fn test_initialize_loads_existing_history() {
        let env = TestEnv::new();
        env.write_history(r#"[{"term":"pika","type":"all","timestamp":"2026-01-01T00:00:00.000Z"}]"#);

        let ctx = initialize(Some(env.root.clone())).unwrap();
        assert_eq!(ctx.api.history_store().len(), 1);
        assert_eq!(ctx.api.history_store().list()[0].term, "pika");
    }

    #[test]
    fn test_initialize_with_bad_config_fails() {
        let env = TestEnv::new();
        fs::write(config_path(&env.root), "history_limit = [").unwrap();

        assert!(matches!(
            initialize(Some(env.root.clone())),
            Err(DexError::Config(_))
        ));
    }
}
