//! Rating aggregation: raw season records → renderable heatmap model.
//!
//! [`aggregate`] is pure and deterministic. It never fails; malformed fields fall back
//! to defaults at the field level so one bad episode cannot spoil a whole show.
//!
//! # Public API
//! - [`aggregate`]: build a [`HeatmapModel`] from the complete, ordered season list
//! - [`HeatmapModel`], [`Season`], [`Episode`]: immutable derived values
//! - [`HeatmapStats`], [`RatedEpisode`]: summary statistics over rated episodes
//!
//! # Statistics
//! Only *rated* episodes (`rating > 0 && vote_count > 0`) count toward the average and
//! the extremes; every episode counts toward the total. When several episodes share
//! the extreme rating the first one in season-then-episode order is kept.

use crate::core::models::{RawEpisode, RawSeason};
use crate::core::rating::ColorBucket;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Episode {
    pub episode_number: u32,
    pub name: String,
    pub air_date: Option<NaiveDate>,
    pub rating: f64,
    pub vote_count: u64,
    pub overview: String,
    pub still_path: Option<String>,
    pub color_bucket: ColorBucket,
}

impl Episode {
    pub fn is_rated(&self) -> bool {
        self.rating > 0.0 && self.vote_count > 0
    }

    fn from_raw(raw: &RawEpisode, position: usize) -> Self {
        let rating = sanitize_rating(raw.vote_average);
        let vote_count = raw.vote_count.unwrap_or(0);

        Self {
            episode_number: raw
                .episode_number
                .filter(|n| *n > 0)
                .unwrap_or(position as u32 + 1),
            name: raw.name.clone().unwrap_or_default(),
            air_date: raw.air_date.as_deref().and_then(parse_air_date),
            rating,
            vote_count,
            overview: raw.overview.clone().unwrap_or_default(),
            still_path: raw.still_path.clone().filter(|path| !path.is_empty()),
            color_bucket: ColorBucket::from_rating(rating, vote_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Season {
    pub season_number: u32,
    pub name: Option<String>,
    pub air_date: Option<NaiveDate>,
    pub episodes: Vec<Episode>,
}

impl Season {
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    pub fn episode(&self, episode_number: u32) -> Option<&Episode> {
        self.episodes
            .iter()
            .find(|ep| ep.episode_number == episode_number)
    }
}

/// A rated episode together with the season it belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedEpisode {
    pub season_number: u32,
    pub episode: Episode,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HeatmapStats {
    pub total_episode_count: usize,
    pub average_rating: f64,
    pub highest_rated_episode: Option<RatedEpisode>,
    pub lowest_rated_episode: Option<RatedEpisode>,
    pub rated_episode_count: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HeatmapModel {
    pub max_episodes_per_season: usize,
    pub seasons: Vec<Season>,
    pub stats: HeatmapStats,
}

impl HeatmapModel {
    /// Look up one cell of the grid
    pub fn episode(&self, season_number: u32, episode_number: u32) -> Option<&Episode> {
        self.seasons
            .iter()
            .find(|season| season.season_number == season_number)
            .and_then(|season| season.episode(episode_number))
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }
}

/// Build the heatmap model for one show from its complete, ordered season list
pub fn aggregate(raw_seasons: &[RawSeason]) -> HeatmapModel {
    let seasons: Vec<Season> = raw_seasons
        .iter()
        .map(|raw| Season {
            season_number: raw.season_number,
            name: raw.name.clone(),
            air_date: raw.air_date.as_deref().and_then(parse_air_date),
            episodes: raw
                .episodes
                .iter()
                .enumerate()
                .map(|(position, ep)| Episode::from_raw(ep, position))
                .collect(),
        })
        .collect();

    let total_episode_count: usize = seasons.iter().map(Season::episode_count).sum();
    if total_episode_count == 0 {
        return HeatmapModel::default();
    }

    let max_episodes_per_season = seasons
        .iter()
        .map(Season::episode_count)
        .max()
        .unwrap_or(0);

    let rated: Vec<(u32, &Episode)> = seasons
        .iter()
        .flat_map(|season| {
            season
                .episodes
                .iter()
                .map(move |ep| (season.season_number, ep))
        })
        .filter(|(_, ep)| ep.is_rated())
        .collect();

    let average_rating = if rated.is_empty() {
        0.0
    } else {
        let sum: f64 = rated.iter().map(|(_, ep)| ep.rating).sum();
        round_to_hundredths(sum / rated.len() as f64)
    };

    // Strict comparisons: the first episode seen keeps an extreme on ties
    let mut highest: Option<(u32, &Episode)> = None;
    let mut lowest: Option<(u32, &Episode)> = None;
    for &(season_number, ep) in &rated {
        if highest.map_or(true, |(_, best)| ep.rating > best.rating) {
            highest = Some((season_number, ep));
        }
        if lowest.map_or(true, |(_, worst)| ep.rating < worst.rating) {
            lowest = Some((season_number, ep));
        }
    }

    let to_rated = |(season_number, ep): (u32, &Episode)| RatedEpisode {
        season_number,
        episode: ep.clone(),
    };

    let stats = HeatmapStats {
        total_episode_count,
        average_rating,
        highest_rated_episode: highest.map(to_rated),
        lowest_rated_episode: lowest.map(to_rated),
        rated_episode_count: rated.len(),
    };

    HeatmapModel {
        max_episodes_per_season,
        seasons,
        stats,
    }
}

/// Non-finite and non-positive ratings mean "unrated". Anything else is kept as reported;
/// out-of-scale values only affect which bucket the episode lands in.
fn sanitize_rating(raw: Option<f64>) -> f64 {
    match raw {
        Some(r) if r.is_finite() && r > 0.0 => r,
        _ => 0.0,
    }
}

fn parse_air_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_episode(number: u32, rating: Option<f64>, votes: Option<u64>) -> RawEpisode {
        RawEpisode {
            episode_number: Some(number),
            name: Some(format!("Episode {number}")),
            vote_average: rating,
            vote_count: votes,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let season = RawSeason {
            season_number: 1,
            episodes: vec![RawEpisode::default()],
            ..Default::default()
        };
        let model = aggregate(&[season]);
        let ep = &model.seasons[0].episodes[0];

        assert_eq!(ep.episode_number, 1);
        assert_eq!(ep.name, "");
        assert_eq!(ep.overview, "");
        assert_eq!(ep.rating, 0.0);
        assert_eq!(ep.vote_count, 0);
        assert_eq!(ep.air_date, None);
        assert_eq!(ep.color_bucket, ColorBucket::NoRating);
        assert_eq!(model.stats.total_episode_count, 1);
        assert_eq!(model.stats.rated_episode_count, 0);
        assert_eq!(model.stats.average_rating, 0.0);
        assert!(model.stats.highest_rated_episode.is_none());
    }

    #[test]
    fn test_malformed_values_degrade_gracefully() {
        let season = RawSeason {
            season_number: 1,
            episodes: vec![
                RawEpisode {
                    air_date: Some("not a date".to_string()),
                    vote_average: Some(-3.0),
                    vote_count: Some(40),
                    ..Default::default()
                },
                RawEpisode {
                    air_date: Some("2013-09-29".to_string()),
                    vote_average: Some(12.0),
                    vote_count: Some(40),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let model = aggregate(&[season]);
        let eps = &model.seasons[0].episodes;

        assert_eq!(eps[0].rating, 0.0);
        assert_eq!(eps[0].air_date, None);
        assert_eq!(eps[1].episode_number, 2);
        assert_eq!(eps[1].air_date, NaiveDate::from_ymd_opt(2013, 9, 29));
    }

    #[test]
    fn test_out_of_scale_rating_is_kept_as_reported() {
        let season = RawSeason {
            season_number: 1,
            episodes: vec![
                RawEpisode {
                    vote_average: Some(12.0),
                    vote_count: Some(40),
                    ..Default::default()
                },
                RawEpisode {
                    vote_average: Some(8.0),
                    vote_count: Some(40),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let model = aggregate(&[season]);

        let episode = model.episode(1, 1).unwrap();
        assert_eq!(episode.rating, 12.0);
        assert_eq!(episode.color_bucket, ColorBucket::Awesome);
        assert_eq!(model.stats.average_rating, 10.0);
        assert_eq!(
            model.stats.highest_rated_episode.as_ref().map(|r| r.episode.rating),
            Some(12.0)
        );
    }

    #[test]
    fn test_seasons_without_episodes_yield_empty_model() {
        let seasons = vec![
            RawSeason {
                season_number: 1,
                ..Default::default()
            },
            RawSeason {
                season_number: 2,
                ..Default::default()
            },
        ];
        let model = aggregate(&seasons);
        assert_eq!(model, HeatmapModel::default());
    }

    #[test]
    fn test_lowest_rated_keeps_first_on_ties() {
        let season = RawSeason {
            season_number: 3,
            episodes: vec![
                raw_episode(1, Some(6.0), Some(10)),
                raw_episode(2, Some(5.5), Some(10)),
                raw_episode(3, Some(5.5), Some(999)),
            ],
            ..Default::default()
        };
        let model = aggregate(&[season]);
        let lowest = model.stats.lowest_rated_episode.unwrap();
        assert_eq!(lowest.season_number, 3);
        assert_eq!(lowest.episode.episode_number, 2);
    }

    #[test]
    fn test_episode_lookup() {
        let season = RawSeason {
            season_number: 2,
            episodes: vec![raw_episode(1, Some(8.0), Some(5)), raw_episode(4, Some(7.0), Some(5))],
            ..Default::default()
        };
        let model = aggregate(&[season]);
        assert_eq!(model.episode(2, 4).map(|ep| ep.rating), Some(7.0));
        assert!(model.episode(2, 2).is_none());
        assert!(model.episode(1, 1).is_none());
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        assert_eq!(round_to_hundredths(25.0 / 3.0), 8.33);
        assert_eq!(round_to_hundredths(7.456), 7.46);
        assert_eq!(round_to_hundredths(9.0), 9.0);
    }
}
