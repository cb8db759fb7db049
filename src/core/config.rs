//! Persistent configuration.
//!
//! Stored as pretty-printed JSON in `<config dir>/series-navigator/config.json` and
//! created with defaults on first run. A handful of environment variables override
//! the file so API keys never have to be written to disk.

use crate::core::dirs::{get_cache_directory, get_config_directory};
use crate::core::error::{Result, SeriesNavigatorError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";

pub const ENV_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_BASE_URL: &str = "TMDB_BASE_URL";
pub const ENV_IMAGE_BASE_URL: &str = "TMDB_IMAGE_BASE_URL";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub image_base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Region used when listing streaming providers
    pub region: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            api_key: None,
            timeout_secs: 10,
            region: "US".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub prefix: String,
    pub details_ttl_ms: u64,
    pub search_ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let ttl = CacheTtl::default();
        Self {
            prefix: crate::core::cache::DEFAULT_PREFIX.to_string(),
            details_ttl_ms: ttl.details.as_millis() as u64,
            search_ttl_ms: ttl.search.as_millis() as u64,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub min_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let settings = SearchSettings::default();
        Self {
            debounce_ms: settings.debounce.as_millis() as u64,
            min_length: settings.min_length,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub search: SearchConfig,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// TTL classes the orchestrator picks from per call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    /// Show details and season data: rarely change
    pub details: Duration,
    /// Search results: fresher, and cheap to redo
    pub search: Duration,
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            details: Duration::from_secs(24 * 60 * 60),
            search: Duration::from_secs(60 * 60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_length: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            min_length: 2,
        }
    }
}

impl AppConfig {
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_directory()?.join(CONFIG_FILE))
    }

    /// Load the user's config (creating it on first run) and apply env overrides
    pub fn load_or_create() -> Result<Self> {
        let mut config = Self::load_or_create_in(&get_config_directory()?)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_or_create_in(config_dir: &Path) -> Result<Self> {
        let config_file = config_dir.join(CONFIG_FILE);

        if config_file.exists() {
            log::debug!("Loading config from {}", config_file.display());
            let content = std::fs::read_to_string(&config_file)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            let config = Self {
                created_at: Some(chrono::Utc::now()),
                ..Self::default()
            };
            config.save_in(config_dir)?;
            log::debug!("Created default config at {}", config_file.display());
            Ok(config)
        }
    }

    pub fn save_in(&self, config_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(config_dir).map_err(|e| {
            SeriesNavigatorError::cache_directory_creation_failed(config_dir, e)
        })?;

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_dir.join(CONFIG_FILE), content)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api.api_key = Some(key);
        }
        if let Some(url) = non_empty(ENV_BASE_URL) {
            self.api.base_url = url;
        }
        if let Some(url) = non_empty(ENV_IMAGE_BASE_URL) {
            self.api.image_base_url = url;
        }
    }

    pub fn cache_ttl(&self) -> CacheTtl {
        CacheTtl {
            details: Duration::from_millis(self.cache.details_ttl_ms),
            search: Duration::from_millis(self.cache.search_ttl_ms),
        }
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.search.debounce_ms),
            min_length: self.search.min_length,
        }
    }

    /// Cache directory for the configured API endpoint.
    /// Different base URLs hash to different directories and never share entries.
    pub fn cache_directory(&self) -> Result<PathBuf> {
        let endpoint_hash = format!("{:x}", md5::compute(self.api.base_url.as_bytes()));
        Ok(get_cache_directory()?.join(endpoint_hash))
    }
}
