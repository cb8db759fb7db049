//! Centralized initialization for CLI commands.
//!
//! Every command needs the same setup: load the config, open the on-disk cache (and
//! sweep it once per process), and for commands that talk to TMDb, build the API client and the
//! [`AppState`] orchestrator.
//!
//! # Public API
//! - [`CommandInit`]: Static initializers
//! - [`CommandContext`]: Initialized config plus orchestrator
//!
//! # Cache Fallback
//! If the cache directory cannot be created the commands still work: the cache falls
//! back to an in-memory store for the lifetime of the process.

use crate::core::api::ShowApi;
use crate::core::app_state::AppState;
use crate::core::cache::TtlCache;
use crate::core::clock::SystemClock;
use crate::core::config::AppConfig;
use crate::core::error::{Result, SeriesNavigatorError};
use crate::core::output::print_warning;
use crate::core::store::{CacheStore, FileStore, MemoryStore};
use crate::core::tmdb::TmdbClient;
use std::sync::Arc;

/// Initialized context for commands that query TMDb
pub struct CommandContext {
    pub config: AppConfig,
    pub state: AppState,
}

pub struct CommandInit;

impl CommandInit {
    /// Load config, open the cache and build the TMDb-backed orchestrator
    ///
    /// # Returns
    /// * `Err(MissingApiKey)` - No key in the config file or `TMDB_API_KEY`
    pub fn initialize() -> Result<CommandContext> {
        let config = AppConfig::load_or_create()?;
        let api_key = match config.api.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => {
                return Err(SeriesNavigatorError::MissingApiKey {
                    path: AppConfig::config_file_path()?,
                })
            }
        };

        let api = TmdbClient::new(&config.api, api_key)?;
        Ok(Self::initialize_with(config, Arc::new(api)))
    }

    /// Build the orchestrator around an already constructed API client
    pub fn initialize_with(config: AppConfig, api: Arc<dyn ShowApi>) -> CommandContext {
        let cache = Self::open_cache(&config);
        let state = AppState::new(api, cache, config.cache_ttl(), config.search_settings());

        let removed = state.sweep_cache();
        if removed > 0 {
            log::debug!("Removed {removed} expired cache entries on startup");
        }
        CommandContext { config, state }
    }

    /// Open the persistent cache for the configured endpoint
    pub fn open_cache(config: &AppConfig) -> TtlCache {
        let store: Box<dyn CacheStore> = match config
            .cache_directory()
            .and_then(FileStore::open)
        {
            Ok(store) => {
                log::debug!("Using cache directory {}", store.dir().display());
                Box::new(store)
            }
            Err(e) => {
                log::warn!("Falling back to in-memory cache: {e}");
                print_warning(&format!("Cache unavailable, results will not be kept ({e})"));
                Box::new(MemoryStore::new())
            }
        };

        TtlCache::with_prefix(store, Arc::new(SystemClock), &config.cache.prefix)
    }
}
