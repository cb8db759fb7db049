mod common;

use common::fixtures::{raw_episode, raw_season, uniform_season};

#[cfg(test)]
mod aggregator_tests {
    use super::*;
    use series_navigator::core::{aggregate, models::RawSeason, ColorBucket};

    #[test]
    fn test_no_seasons_gives_empty_model() {
        let model = aggregate(&[]);
        assert!(model.is_empty());
        assert_eq!(model.max_episodes_per_season, 0);
        assert_eq!(model.stats.total_episode_count, 0);
        assert_eq!(model.stats.average_rating, 0.0);
        assert!(model.stats.highest_rated_episode.is_none());
    }

    #[test]
    fn test_seasons_without_episodes_give_empty_model() {
        let empty = RawSeason {
            season_number: 1,
            ..Default::default()
        };
        let model = aggregate(&[empty]);
        assert!(model.is_empty());
    }

    #[test]
    fn test_widest_season_sets_grid_width() {
        let model = aggregate(&[uniform_season(1, 10), uniform_season(2, 8)]);
        assert_eq!(model.max_episodes_per_season, 10);
        assert_eq!(model.seasons.len(), 2);
        assert_eq!(model.stats.total_episode_count, 18);
        assert!(model.episode(2, 9).is_none());
        assert!(model.episode(1, 10).is_some());
    }

    #[test]
    fn test_ties_keep_the_first_episode_seen() {
        let model = aggregate(&[raw_season(1, &[(7.0, 500), (9.0, 10), (9.0, 5000)])]);
        let stats = &model.stats;

        let best = stats.highest_rated_episode.as_ref().unwrap();
        assert_eq!(best.season_number, 1);
        assert_eq!(best.episode.episode_number, 2);
        assert_eq!(best.episode.vote_count, 10);

        let worst = stats.lowest_rated_episode.as_ref().unwrap();
        assert_eq!(worst.episode.episode_number, 1);

        assert_eq!(stats.average_rating, 8.33);
        assert_eq!(stats.rated_episode_count, 3);
    }

    #[test]
    fn test_episodes_without_votes_are_unrated() {
        let model = aggregate(&[raw_season(1, &[(6.5, 0), (8.0, 120)])]);
        let unrated = model.episode(1, 1).unwrap();

        assert!(!unrated.is_rated());
        assert_eq!(unrated.color_bucket, ColorBucket::NoRating);
        assert_eq!(model.stats.rated_episode_count, 1);
        assert_eq!(model.stats.average_rating, 8.0);
        assert_eq!(model.stats.total_episode_count, 2);
    }

    #[test]
    fn test_extremes_span_seasons() {
        let model = aggregate(&[
            raw_season(1, &[(8.1, 100), (7.5, 100)]),
            raw_season(2, &[(9.6, 100), (5.2, 100)]),
        ]);
        let best = model.stats.highest_rated_episode.as_ref().unwrap();
        let worst = model.stats.lowest_rated_episode.as_ref().unwrap();
        assert_eq!((best.season_number, best.episode.episode_number), (2, 1));
        assert_eq!((worst.season_number, worst.episode.episode_number), (2, 2));
    }

    #[test]
    fn test_buckets_follow_ratings() {
        let model = aggregate(&[raw_season(1, &[(7.0, 10), (9.6, 10), (2.0, 10)])]);
        assert_eq!(model.episode(1, 1).unwrap().color_bucket, ColorBucket::Good);
        assert_eq!(model.episode(1, 2).unwrap().color_bucket, ColorBucket::Awesome);
        assert_eq!(model.episode(1, 3).unwrap().color_bucket, ColorBucket::Garbage);
    }

    #[test]
    fn test_missing_episode_numbers_use_position() {
        let mut season = raw_season(1, &[(8.0, 10), (8.0, 10)]);
        season.episodes[1].episode_number = None;
        season.episodes.push(raw_episode(3, 8.0, 10));

        let model = aggregate(&[season]);
        let numbers: Vec<u32> = model.seasons[0]
            .episodes
            .iter()
            .map(|e| e.episode_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
