//! Visible application state and navigation snapshots.
//!
//! This module defines the data the orchestrator exposes to rendering, plus the
//! [`ViewState`] snapshots it records on the navigation stack.
//!
//! # Public API
//! - [`ViewState`]: Immutable history entry (browse listing or show detail)
//! - [`CurrentView`]: Which screen is live right now
//! - [`SearchState`], [`ShowState`]: Per-screen visible state
//! - [`AppSnapshot`]: Owned copy of everything a renderer needs
//!
//! # Snapshot Strategy
//! - **Browse** entries keep the full result list: a listing is a point-in-time
//!   answer and re-querying would waste quota.
//! - **Detail** entries keep only the show identity: restoring one re-runs the
//!   fetch-or-cache path so refreshed data is never hidden behind a stale snapshot.

use crate::core::aggregator::{Episode, HeatmapModel};
use crate::core::models::{RawSeason, ShowDetails, ShowSummary, WatchProviders};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ViewState {
    Browse {
        query: String,
        results: Vec<ShowSummary>,
    },
    Detail {
        show: ShowSummary,
    },
}

impl ViewState {
    pub fn kind(&self) -> CurrentView {
        match self {
            ViewState::Browse { .. } => CurrentView::Browse,
            ViewState::Detail { .. } => CurrentView::Detail,
        }
    }

    /// Short human-readable description, used by the session history listing
    pub fn label(&self) -> String {
        match self {
            ViewState::Browse { query, results } => {
                format!("browse \"{query}\" ({} results)", results.len())
            }
            ViewState::Detail { show } => format!("show {} ({})", show.name, show.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrentView {
    /// Landing state; never recorded in history
    #[default]
    Home,
    Browse,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<ShowSummary>,
    pub is_searching: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ShowState {
    pub selected: Option<ShowSummary>,
    pub details: Option<ShowDetails>,
    pub watch_providers: Option<WatchProviders>,
    pub seasons: Vec<RawSeason>,
    pub heatmap: Option<HeatmapModel>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Episode opened in the detail modal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedEpisode {
    pub season_number: u32,
    pub episode: Episode,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppSnapshot {
    pub view: CurrentView,
    pub search: SearchState,
    pub show: ShowState,
    pub selected_episode: Option<SelectedEpisode>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_state_serializes_with_kind_tag() {
        let state = ViewState::Detail {
            show: ShowSummary {
                id: 1396,
                name: "Breaking Bad".to_string(),
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["kind"], "detail");
        assert_eq!(json["show"]["id"], 1396);
    }

    #[test]
    fn test_view_state_labels() {
        let browse = ViewState::Browse {
            query: "lost".to_string(),
            results: vec![ShowSummary::default(), ShowSummary::default()],
        };
        assert_eq!(browse.label(), "browse \"lost\" (2 results)");
        assert_eq!(browse.kind(), CurrentView::Browse);
    }
}
