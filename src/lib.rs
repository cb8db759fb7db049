//! Series Navigator - explore TV series episode ratings as a season-by-episode heatmap.
//!
//! This library provides the client state core behind the `series-navigator` CLI:
//! a TTL cache in front of the TMDb API, the rating aggregator that turns raw season
//! data into a heatmap model, a branching navigation history, and the orchestrator
//! that coordinates them.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The application state orchestrator and its API boundary
//! - TTL caching over file or in-memory stores
//! - Rating aggregation and color buckets
//! - Error handling and result types
//! - UI templates and color system

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    aggregate,
    // Orchestration
    AppConfig,
    AppSnapshot,
    AppState,
    BrowseSource,
    // Caching
    CacheKey,
    CacheStore,
    CacheTtl,
    Clock,
    // Aggregation
    ColorBucket,
    CurrentView,
    FileStore,
    HeatmapModel,
    ManualClock,
    MemoryStore,
    Namespace,
    NavigationStack,
    Result,
    SearchSettings,
    SeriesNavigatorError,
    ShowApi,
    SystemClock,
    TmdbClient,
    TrendingWindow,
    TtlCache,
    ViewState,
};
