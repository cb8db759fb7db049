//! Backing stores for the TTL cache.
//!
//! A [`CacheStore`] is a dumb string key → string value map. It knows nothing about
//! expiry or payload shapes; [`crate::core::cache::TtlCache`] layers those on top.
//!
//! # Implementations
//! - [`MemoryStore`]: in-process map, used by tests and ephemeral sessions
//! - [`FileStore`]: one JSON file per key inside a directory, survives restarts
//!
//! # File layout
//! File names are the percent-encoded key followed by `.json`, so the original key can
//! always be recovered from the directory listing. Writes go through a temporary file
//! and a rename so a crash never leaves a half-written entry behind.

use crate::core::error::{Result, SeriesNavigatorError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const ENTRY_EXTENSION: &str = ".json";

/// Persistent key/value storage used by the cache
pub trait CacheStore: Send {
    /// Raw value stored under `key`, `None` when absent
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn delete(&mut self, key: &str) -> Result<()>;

    /// Every key currently in the store
    fn keys(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Directory of JSON files, one per cache key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            log::warn!(
                "Failed to create cache directory '{}': {}",
                dir.display(),
                e
            );
            return Err(SeriesNavigatorError::cache_directory_creation_failed(
                &dir, e,
            ));
        }
        log::debug!("Using cache directory: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}", encode_file_name(key), ENTRY_EXTENSION))
    }
}

impl CacheStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SeriesNavigatorError::cache_read(key, e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| SeriesNavigatorError::cache_write(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| SeriesNavigatorError::cache_write(key, e))
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SeriesNavigatorError::cache_write(key, e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let file_name = entry?.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some(stem) = name.strip_suffix(ENTRY_EXTENSION) {
                match decode_file_name(stem) {
                    Some(key) => keys.push(key),
                    None => log::debug!("Ignoring foreign file in cache directory: {name}"),
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Percent-encode everything outside `[A-Za-z0-9_-]`
fn encode_file_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'-' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode_file_name(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
