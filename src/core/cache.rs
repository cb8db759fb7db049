//! Namespaced, expiring cache in front of the remote metadata API.
//!
//! [`TtlCache`] stores serializable payloads in a [`CacheStore`] wrapped in a small
//! envelope `{ "data": ..., "timestamp": <ms>, "ttl": <ms> }` under the key
//! `"<prefix><namespace>_<id>"`. Caching is an optimization, not a correctness
//! dependency: nothing in this module ever returns an error to its caller.
//!
//! # Public API
//! - [`TtlCache`]: get/set/remove plus bulk maintenance (clear, sweep)
//! - [`CacheKey`]: namespaced key builder for shows, seasons and searches
//! - [`Namespace`]: the three entity kinds
//!
//! # Expiry
//! An entry is valid while `now - timestamp <= ttl`. Expired and corrupt entries are
//! deleted as a side effect of the read that discovers them.

use crate::core::clock::Clock;
use crate::core::error::{Result, SeriesNavigatorError};
use crate::core::store::CacheStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_PREFIX: &str = "tmdb_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Show,
    Season,
    Search,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [Namespace::Show, Namespace::Season, Namespace::Search];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Show => "show",
            Namespace::Season => "season",
            Namespace::Search => "search",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = SeriesNavigatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "show" | "shows" => Ok(Namespace::Show),
            "season" | "seasons" => Ok(Namespace::Season),
            "search" | "searches" => Ok(Namespace::Search),
            other => Err(SeriesNavigatorError::invalid_argument(format!(
                "unknown cache namespace '{other}' (expected show, season or search)"
            ))),
        }
    }
}

/// Namespaced cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    namespace: Namespace,
    id: String,
}

impl CacheKey {
    pub fn new(namespace: Namespace, id: impl Into<String>) -> Self {
        Self {
            namespace,
            id: id.into(),
        }
    }

    pub fn show(show_id: u64) -> Self {
        Self::new(Namespace::Show, show_id.to_string())
    }

    pub fn season(show_id: u64, season_number: u32) -> Self {
        Self::new(Namespace::Season, format!("{show_id}_{season_number}"))
    }

    /// Searches are case-insensitive: "Breaking Bad" and "breaking bad" share an entry
    pub fn search(query: &str) -> Self {
        Self::new(Namespace::Search, query.trim().to_lowercase())
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn storage_key(&self, prefix: &str) -> String {
        format!("{prefix}{}_{}", self.namespace, self.id)
    }
}

/// Persisted envelope around a cached payload
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    timestamp: i64,
    ttl: i64,
}

/// Envelope without the payload, used by sweeps
#[derive(Debug, Deserialize)]
struct EntryHeader {
    timestamp: i64,
    ttl: i64,
}

fn is_expired(now: i64, timestamp: i64, ttl: i64) -> bool {
    now.saturating_sub(timestamp) > ttl
}

fn ttl_millis(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)
}

pub struct TtlCache {
    store: Box<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    prefix: String,
}

impl TtlCache {
    pub fn new(store: Box<dyn CacheStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_prefix(store, clock, DEFAULT_PREFIX)
    }

    pub fn with_prefix(
        store: Box<dyn CacheStore>,
        clock: Arc<dyn Clock>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            clock,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Fetch a live entry, purging it if it turns out to be stale or unreadable
    pub fn get<T: DeserializeOwned>(&mut self, key: &CacheKey) -> Option<T> {
        let storage_key = key.storage_key(&self.prefix);

        let raw = match self.store.read(&storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("Cache miss: {storage_key}");
                return None;
            }
            Err(e) => {
                log::error!("Error getting cache entry '{storage_key}': {e}");
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Discarding corrupt cache entry '{storage_key}': {e}");
                self.delete_quietly(&storage_key);
                return None;
            }
        };

        if is_expired(self.clock.now_ms(), entry.timestamp, entry.ttl) {
            log::debug!("Cache entry expired: {storage_key}");
            self.delete_quietly(&storage_key);
            return None;
        }

        log::debug!("Cache hit: {storage_key}");
        Some(entry.data)
    }

    /// Store `value` for `ttl`, replacing whatever was there. Failures are logged only.
    pub fn set<T: Serialize>(&mut self, key: &CacheKey, value: &T, ttl: Duration) {
        let storage_key = key.storage_key(&self.prefix);
        let entry = CacheEntry {
            data: value,
            timestamp: self.clock.now_ms(),
            ttl: ttl_millis(ttl),
        };

        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Error serializing cache entry '{storage_key}': {e}");
                return;
            }
        };

        if let Err(e) = self.store.write(&storage_key, &json) {
            log::error!("Error setting cache entry '{storage_key}': {e}");
        }
    }

    pub fn remove(&mut self, key: &CacheKey) {
        let storage_key = key.storage_key(&self.prefix);
        self.delete_quietly(&storage_key);
    }

    /// Remove every entry of one namespace, returns how many were removed
    pub fn clear_namespace(&mut self, namespace: Namespace) -> usize {
        let namespace_prefix = format!("{}{}_", self.prefix, namespace);
        self.remove_matching(|key| key.starts_with(&namespace_prefix))
    }

    /// Remove every entry under this cache's prefix
    pub fn clear_all(&mut self) -> usize {
        let prefix = self.prefix.clone();
        self.remove_matching(|key| key.starts_with(&prefix))
    }

    /// Delete every expired or unreadable entry, leaving live ones untouched
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let keys = self.owned_keys();
        let mut removed = 0;

        for key in keys {
            let stale = match self.store.read(&key) {
                Ok(Some(raw)) => match serde_json::from_str::<EntryHeader>(&raw) {
                    Ok(header) => is_expired(now, header.timestamp, header.ttl),
                    Err(_) => true,
                },
                Ok(None) => false,
                Err(e) => {
                    log::error!("Error reading cache entry '{key}' during sweep: {e}");
                    false
                }
            };

            if stale && self.delete_quietly(&key) {
                removed += 1;
            }
        }

        log::debug!("Cache sweep removed {removed} entries");
        removed
    }

    /// Number of entries currently stored under this cache's prefix, live or not
    pub fn len(&self) -> usize {
        self.owned_keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn owned_keys(&self) -> Vec<String> {
        match self.store.keys() {
            Ok(keys) => keys
                .into_iter()
                .filter(|key| key.starts_with(&self.prefix))
                .collect(),
            Err(e) => {
                log::error!("Error listing cache entries: {e}");
                Vec::new()
            }
        }
    }

    fn remove_matching(&mut self, matches: impl Fn(&str) -> bool) -> usize {
        let keys = self.owned_keys();
        let mut removed = 0;
        for key in keys.iter().filter(|key| matches(key)) {
            if self.delete_quietly(key) {
                removed += 1;
            }
        }
        removed
    }

    fn delete_quietly(&mut self, storage_key: &str) -> bool {
        match self.store.delete(storage_key) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error removing cache entry '{storage_key}': {e}");
                false
            }
        }
    }
}
