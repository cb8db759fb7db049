//! Temporary config and cache homes for CLI tests
//!
//! The binary resolves its directories through `XDG_CONFIG_HOME` and `XDG_CACHE_HOME`,
//! so each test gets a private pair under one [`TempDir`].

#![allow(dead_code)]

use assert_cmd::Command;
use series_navigator::core::cache::{CacheKey, TtlCache};
use series_navigator::core::clock::SystemClock;
use series_navigator::core::config::AppConfig;
use series_navigator::core::store::FileStore;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestHome {
    pub root: TempDir,
}

impl TestHome {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            root: TempDir::new()?,
        })
    }

    pub fn config_home(&self) -> PathBuf {
        self.root.path().join("config")
    }

    pub fn cache_home(&self) -> PathBuf {
        self.root.path().join("cache")
    }

    /// Directory the binary uses for the default TMDb endpoint
    pub fn endpoint_cache_dir(&self) -> PathBuf {
        let endpoint = AppConfig::default().api.base_url;
        self.cache_home()
            .join("series-navigator")
            .join(format!("{:x}", md5::compute(endpoint.as_bytes())))
    }

    /// Cache over the same files the binary will read
    pub fn open_cache(&self) -> anyhow::Result<TtlCache> {
        let store = FileStore::open(self.endpoint_cache_dir())?;
        Ok(TtlCache::new(Box::new(store), Arc::new(SystemClock)))
    }

    pub fn seed_show(&self, show_id: u64) -> anyhow::Result<()> {
        let mut cache = self.open_cache()?;
        cache.set(
            &CacheKey::show(show_id),
            &serde_json::json!({ "id": show_id, "name": "Seeded" }),
            std::time::Duration::from_secs(3600),
        );
        Ok(())
    }

    /// Binary command isolated to this home, with no API key in the environment
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("series-navigator")?;
        cmd.env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_CACHE_HOME", self.cache_home())
            .env_remove("TMDB_API_KEY")
            .env_remove("TMDB_BASE_URL")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        Ok(cmd)
    }
}
