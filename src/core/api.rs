//! Boundary to the remote TV metadata API.
//!
//! The orchestrator only ever talks to a [`ShowApi`]. Production code plugs in
//! [`crate::core::tmdb::TmdbClient`]; tests plug in scripted fakes.

use crate::core::error::Result;
use crate::core::models::{RawSeason, SearchPage, ShowDetails, WatchProviders};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// Time window for trending listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendingWindow {
    Day,
    #[default]
    Week,
}

impl TrendingWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }

    /// Listing label shown as the browse "query"
    pub fn label(&self) -> &'static str {
        match self {
            TrendingWindow::Day => "Trending Today",
            TrendingWindow::Week => "Trending This Week",
        }
    }
}

impl fmt::Display for TrendingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrendingWindow {
    type Err = crate::core::error::SeriesNavigatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "today" => Ok(TrendingWindow::Day),
            "week" => Ok(TrendingWindow::Week),
            other => Err(crate::core::error::SeriesNavigatorError::invalid_argument(
                format!("unknown trending window '{other}' (expected day or week)"),
            )),
        }
    }
}

/// Remote metadata operations the state core depends on
#[async_trait]
pub trait ShowApi: Send + Sync {
    async fn search_shows(&self, query: &str, page: u32) -> Result<SearchPage>;

    async fn show_details(&self, show_id: u64) -> Result<ShowDetails>;

    async fn season_details(&self, show_id: u64, season_number: u32) -> Result<RawSeason>;

    /// Streaming availability; `Ok(None)` when the API has nothing for this show
    async fn watch_providers(&self, show_id: u64) -> Result<Option<WatchProviders>>;

    async fn top_rated(&self, page: u32) -> Result<SearchPage>;

    async fn popular(&self, page: u32) -> Result<SearchPage>;

    async fn trending(&self, window: TrendingWindow) -> Result<SearchPage>;
}
