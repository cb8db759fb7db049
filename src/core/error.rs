//! Error type shared by the state core, the TMDb client and the CLI.
//!
//! This module defines [`SeriesNavigatorError`] which covers every failure mode of
//! series-navigator. It uses `thiserror` for ergonomic error definitions and includes
//! constructors for the common failure scenarios.
//!
//! # Public API
//! - [`SeriesNavigatorError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, SeriesNavigatorError>`
//!
//! # Error Categories
//! - **Remote failures**: Invalid API key, rate limiting, network and API errors.
//!   These are the only errors that cross the state core's boundary.
//! - **Cache operations**: Store reads/writes and serialization. Always absorbed by
//!   the TTL cache and logged, never surfaced to callers of the cache.
//! - **CLI usage**: Invalid arguments, missing selections

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for series-navigator
#[derive(Error, Debug)]
pub enum SeriesNavigatorError {
    // Remote API errors
    #[error("No TMDb API key configured. Set TMDB_API_KEY or add it to {path}")]
    MissingApiKey { path: PathBuf },

    #[error("Invalid API key. Please check your configuration.")]
    InvalidApiKey,

    #[error("Too many requests. Please wait a moment.")]
    RateLimited,

    #[error("{resource} not found.")]
    NotFound { resource: String },

    #[error("Network error. Please check your connection. ({message})")]
    Network { message: String },

    #[error("Failed to fetch data from TMDb: {message}")]
    Api { message: String },

    // Cache store errors
    #[error("Failed to create cache directory '{path}': {source}")]
    CacheDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read cache entry '{key}': {source}")]
    CacheRead { key: String, source: std::io::Error },

    #[error("Failed to write cache entry '{key}': {source}")]
    CacheWrite { key: String, source: std::io::Error },

    #[error("Cache store unavailable: {message}")]
    CacheUnavailable { message: String },

    // CLI errors
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("No show selected. Open a show first.")]
    NoShowSelected,

    #[error("Episode S{season:02}E{episode:02} not found")]
    EpisodeNotFound { season: u32, episode: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using SeriesNavigatorError
pub type Result<T> = std::result::Result<T, SeriesNavigatorError>;

impl SeriesNavigatorError {
    /// True for failures that originate from the remote metadata API.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey { .. }
                | Self::InvalidApiKey
                | Self::RateLimited
                | Self::NotFound { .. }
                | Self::Network { .. }
                | Self::Api { .. }
        )
    }

    /// Create a not found error for a named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a generic API error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a cache directory creation failed error
    pub fn cache_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CacheDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache read failed error
    pub fn cache_read(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::CacheRead {
            key: key.into(),
            source,
        }
    }

    /// Create a cache write failed error
    pub fn cache_write(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::CacheWrite {
            key: key.into(),
            source,
        }
    }

    pub fn cache_unavailable(message: impl Into<String>) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for SeriesNavigatorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::api(format!("unexpected response body: {err}"))
        } else {
            Self::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SeriesNavigatorError::InvalidApiKey;
        assert_eq!(
            err.to_string(),
            "Invalid API key. Please check your configuration."
        );
    }

    #[test]
    fn test_not_found_error() {
        let err = SeriesNavigatorError::not_found("TV show");
        assert_eq!(err.to_string(), "TV show not found.");
    }

    #[test]
    fn test_episode_not_found_is_zero_padded() {
        let err = SeriesNavigatorError::EpisodeNotFound {
            season: 2,
            episode: 7,
        };
        assert_eq!(err.to_string(), "Episode S02E07 not found");
    }

    #[test]
    fn test_remote_classification() {
        assert!(SeriesNavigatorError::RateLimited.is_remote());
        assert!(SeriesNavigatorError::network("timed out").is_remote());
        assert!(SeriesNavigatorError::api("boom").is_remote());
        assert!(!SeriesNavigatorError::NoShowSelected.is_remote());
        assert!(!SeriesNavigatorError::invalid_argument("x").is_remote());
    }

    #[test]
    fn test_cache_errors_name_the_entry() {
        let disk_full = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let message = SeriesNavigatorError::cache_write("tmdb_show_1", disk_full).to_string();
        assert!(message.starts_with("Failed to write cache entry 'tmdb_show_1'"));
        assert!(message.ends_with("disk full"));
    }

    #[test]
    fn test_cache_directory_error_names_the_path() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SeriesNavigatorError::cache_directory_creation_failed(
            std::path::Path::new("/var/cache/series-navigator"),
            denied,
        );
        assert_eq!(
            err.to_string(),
            "Failed to create cache directory '/var/cache/series-navigator': denied"
        );
    }
}
