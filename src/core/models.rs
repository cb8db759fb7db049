//! Raw records returned by the TV metadata API.
//!
//! Every field is optional or defaulted: the API omits fields freely and a missing
//! value must never fail a whole response. These types are also what the cache
//! persists, so they round-trip through serde unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Compact show record, as found in search and browse listings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShowSummary {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

impl ShowSummary {
    /// Year part of the first air date, if there is one
    pub fn year(&self) -> Option<&str> {
        self.first_air_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Network {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Season stub embedded in show details (no episodes)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeasonStub {
    pub season_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub air_date: Option<String>,
}

/// Full show record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShowDetails {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub number_of_seasons: u32,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub seasons: Vec<SeasonStub>,
}

impl ShowDetails {
    pub fn summary(&self) -> ShowSummary {
        ShowSummary {
            id: self.id,
            name: self.name.clone(),
            original_name: self.original_name.clone(),
            overview: self.overview.clone(),
            first_air_date: self.first_air_date.clone(),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            popularity: self.popularity,
        }
    }
}

/// One page of a listing (search, top rated, popular, trending)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<ShowSummary>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawEpisode {
    #[serde(default)]
    pub episode_number: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub still_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSeason {
    #[serde(default)]
    pub season_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub episodes: Vec<RawEpisode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: u64,
    #[serde(default)]
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionProviders {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<Provider>,
    #[serde(default)]
    pub rent: Vec<Provider>,
    #[serde(default)]
    pub buy: Vec<Provider>,
}

/// Streaming availability keyed by ISO 3166-1 region code
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WatchProviders {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub results: BTreeMap<String, RegionProviders>,
}

impl WatchProviders {
    pub fn for_region(&self, region: &str) -> Option<&RegionProviders> {
        self.results.get(&region.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_summary_tolerates_missing_fields() {
        let show: ShowSummary = serde_json::from_str(r#"{"id": 1396}"#).unwrap();
        assert_eq!(show.id, 1396);
        assert_eq!(show.name, "");
        assert_eq!(show.year(), None);
    }

    #[test]
    fn test_show_summary_year() {
        let show = ShowSummary {
            id: 1,
            first_air_date: Some("2008-01-20".to_string()),
            ..Default::default()
        };
        assert_eq!(show.year(), Some("2008"));

        let empty = ShowSummary {
            id: 2,
            first_air_date: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(empty.year(), None);
    }

    #[test]
    fn test_raw_season_parses_null_ratings() {
        let json = r#"{
            "season_number": 1,
            "episodes": [
                {"episode_number": 1, "name": "Pilot", "vote_average": null, "vote_count": 0},
                {"episode_number": 2}
            ]
        }"#;
        let season: RawSeason = serde_json::from_str(json).unwrap();
        assert_eq!(season.episodes.len(), 2);
        assert_eq!(season.episodes[0].vote_average, None);
        assert_eq!(season.episodes[1].name, None);
    }

    #[test]
    fn test_watch_providers_region_lookup_is_case_insensitive() {
        let json = r#"{"id": 1, "results": {"US": {"flatrate": [{"provider_id": 8, "provider_name": "Netflix"}]}}}"#;
        let providers: WatchProviders = serde_json::from_str(json).unwrap();
        let us = providers.for_region("us").unwrap();
        assert_eq!(us.flatrate[0].provider_name, "Netflix");
        assert!(providers.for_region("DE").is_none());
    }
}
