//! # Configuration
//!
//! Dex configuration is managed by [`confique`], which layers a TOML file,
//! environment variables and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `DEX_BASE_URL`, `DEX_PAGE_SIZE`, etc.
//! 2. **Config file**: `dex.toml` in the data directory.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `base_url` | `https://pokeapi.co/api/v2` | Remote catalog API |
//! | `sprite_base_url` | PokeAPI sprites repo | Prefix for list sprite images |
//! | `catalog_limit` | `1302` | Entries requested by the one-shot listing |
//! | `page_size` | `24` | Entries per page |
//! | `history_limit` | `10` | Maximum remembered searches |
//! | `request_timeout_secs` | `30` | Per-request HTTP timeout |
//! | `cache_type_members` | `false` | Keep type membership sets for the session |
//!
//! ## CLI Usage
//!
//! - `dex config` shows the effective values and where they were read from.
//! - `dex config --template` prints a commented sample `dex.toml`.

use crate::catalog::DEFAULT_CATALOG_LIMIT;
use crate::error::Result;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::paginate::DEFAULT_PAGE_SIZE;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "dex.toml";
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration for dex, stored in `dex.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DexConfig {
    /// Base URL of the creature database API.
    #[config(env = "DEX_BASE_URL", default = "https://pokeapi.co/api/v2")]
    pub base_url: String,

    /// Base URL for list sprites; `<id>.png` is appended.
    #[config(
        env = "DEX_SPRITE_BASE_URL",
        default = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon"
    )]
    pub sprite_base_url: String,

    /// How many entries the catalog listing asks for.
    #[config(env = "DEX_CATALOG_LIMIT", default = 1302)]
    pub catalog_limit: usize,

    /// Entries shown per page.
    #[config(env = "DEX_PAGE_SIZE", default = 24)]
    pub page_size: usize,

    /// Number of past searches to remember.
    #[config(env = "DEX_HISTORY_LIMIT", default = 10)]
    pub history_limit: usize,

    /// Timeout applied to every HTTP request, in seconds.
    #[config(env = "DEX_REQUEST_TIMEOUT_SECS", default = 30)]
    pub request_timeout_secs: u64,

    /// Remember type membership sets for the rest of the session instead of
    /// fetching them on every filter application.
    #[config(env = "DEX_CACHE_TYPE_MEMBERS", default = false)]
    pub cache_type_members: bool,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sprite_base_url: DEFAULT_SPRITE_BASE_URL.to_string(),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cache_type_members: false,
        }
    }
}

impl DexConfig {
    /// Loads config for `data_dir`: env vars over `dex.toml` over defaults.
    /// A missing file is fine; a malformed one is a [`DexError::Config`].
    ///
    /// [`DexError::Config`]: crate::error::DexError::Config
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config = Self::builder()
            .env()
            .file(config_path(data_dir))
            .load()?;
        Ok(config.normalized())
    }

    /// Commented sample `dex.toml` listing every key with its default.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }

    /// Page size and limits of zero make no sense; fall back to defaults.
    fn normalized(mut self) -> Self {
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.history_limit == 0 {
            self.history_limit = DEFAULT_HISTORY_LIMIT;
        }
        if self.catalog_limit == 0 {
            self.catalog_limit = DEFAULT_CATALOG_LIMIT;
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self.sprite_base_url = self.sprite_base_url.trim_end_matches('/').to_string();
        self
    }
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}
