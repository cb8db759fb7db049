//! Core functionality for series-navigator.
//!
//! This module provides the client state core (TTL cache, rating aggregator,
//! navigation history and the orchestrator tying them together), the TMDb API
//! client, configuration, and the terminal rendering helpers.

pub mod aggregator;
pub mod api;
pub mod app_state;
pub mod cache;
pub mod clock;
pub mod colors;
pub mod command_init;
pub mod config;
pub mod debounce;
pub mod dirs;
pub mod error;
pub mod models;
pub mod navigation;
pub mod output;
pub mod rating;
pub mod state;
pub mod store;
pub mod templates;
pub mod tmdb;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{Result, SeriesNavigatorError};

// === TTL cache ===
// Namespaced expiring cache over a pluggable store and clock
pub use cache::{CacheKey, Namespace, TtlCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CacheStore, FileStore, MemoryStore};

// === Rating aggregation ===
// Raw season records to heatmap model with summary statistics
pub use aggregator::{aggregate, Episode, HeatmapModel, HeatmapStats, RatedEpisode, Season};
pub use rating::ColorBucket;

// === Navigation and visible state ===
pub use navigation::NavigationStack;
pub use state::{AppSnapshot, CurrentView, SearchState, SelectedEpisode, ShowState, ViewState};

// === Orchestration ===
// The application state core and its remote API boundary
pub use api::{ShowApi, TrendingWindow};
pub use app_state::{AppState, BrowseSource};
pub use debounce::Debouncer;
pub use tmdb::TmdbClient;

// === Configuration ===
pub use config::{AppConfig, CacheTtl, SearchSettings};

// === Command initialization ===
// Shared setup for commands: config, cache and orchestrator
pub use command_init::{CommandContext, CommandInit};

// === Remote data models ===
pub use models::{
    RawEpisode, RawSeason, SearchPage, ShowDetails, ShowSummary, WatchProviders,
};

// === UI templates ===
// Template system for consistent output formatting with colors
pub use templates::{
    format_rating, format_season_episode, format_vote_count, render_template,
    render_template_plain, strip_ansi_codes, truncate_text, TemplateContext, Templates, TEMPLATES,
};

// === Color system ===
// Rating bucket colors shared by the heatmap, legend and listings
pub use colors::{
    get_bucket_color_style, get_bucket_text_style, get_colored_rating, get_legend_entry,
    get_rating_cell,
};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{
    print_error, print_error_with_usage, print_info, print_section_header, print_success,
    print_warning,
};
