//! Test data builders for shows, seasons and a wired-up orchestrator

#![allow(dead_code)]

use super::fake_api::FakeApi;
use series_navigator::core::{
    app_state::AppState,
    cache::TtlCache,
    clock::ManualClock,
    config::{CacheTtl, SearchSettings},
    models::{RawEpisode, RawSeason, ShowDetails, ShowSummary},
    store::MemoryStore,
};
use std::sync::Arc;
use std::time::Duration;

pub const DEBOUNCE: Duration = Duration::from_millis(500);

pub fn show_summary(id: u64, name: &str) -> ShowSummary {
    ShowSummary {
        id,
        name: name.to_string(),
        first_air_date: Some("2008-01-20".to_string()),
        vote_average: Some(8.9),
        vote_count: Some(1000),
        ..Default::default()
    }
}

pub fn show_details(id: u64, name: &str, number_of_seasons: u32) -> ShowDetails {
    ShowDetails {
        id,
        name: name.to_string(),
        number_of_seasons,
        status: Some("Ended".to_string()),
        ..Default::default()
    }
}

pub fn raw_episode(episode_number: u32, rating: f64, vote_count: u64) -> RawEpisode {
    RawEpisode {
        episode_number: Some(episode_number),
        name: Some(format!("Episode {episode_number}")),
        air_date: Some("2010-03-21".to_string()),
        vote_average: Some(rating),
        vote_count: Some(vote_count),
        ..Default::default()
    }
}

/// Season whose episodes carry the given `(rating, votes)` pairs in order
pub fn raw_season(season_number: u32, ratings: &[(f64, u64)]) -> RawSeason {
    RawSeason {
        season_number,
        name: Some(format!("Season {season_number}")),
        air_date: None,
        episodes: ratings
            .iter()
            .enumerate()
            .map(|(i, &(rating, votes))| raw_episode(i as u32 + 1, rating, votes))
            .collect(),
    }
}

/// Season of `episode_count` episodes all rated 8.0 with 100 votes
pub fn uniform_season(season_number: u32, episode_count: usize) -> RawSeason {
    raw_season(season_number, &vec![(8.0, 100); episode_count])
}

/// FakeApi with a two-season show (ids 1396, 10 + 8 episodes) and a second show 1399
pub fn standard_api() -> FakeApi {
    FakeApi::new()
        .with_show(
            show_details(1396, "Breaking Bad", 2),
            vec![uniform_season(1, 10), uniform_season(2, 8)],
        )
        .with_show(
            show_details(1399, "Game of Thrones", 1),
            vec![uniform_season(1, 6)],
        )
        .with_search(
            "breaking",
            vec![show_summary(1396, "Breaking Bad"), show_summary(1399, "Game of Thrones")],
        )
        .with_search("lost", vec![show_summary(4607, "Lost")])
        .with_listing(vec![show_summary(1396, "Breaking Bad")])
}

pub fn memory_cache() -> (TtlCache, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let cache = TtlCache::new(Box::new(MemoryStore::new()), clock.clone());
    (cache, clock)
}

/// Orchestrator over `api` with an in-memory cache and default settings
pub fn app_state(api: Arc<FakeApi>) -> AppState {
    let (cache, _) = memory_cache();
    AppState::new(
        api,
        cache,
        CacheTtl::default(),
        SearchSettings {
            debounce: DEBOUNCE,
            min_length: 2,
        },
    )
}
