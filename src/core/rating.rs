//! Type-safe rating color buckets.
//!
//! This module defines [`ColorBucket`], the fixed partition of the 0–10 rating scale
//! that drives heatmap colors. Bucket lower bounds are inclusive: exactly `7.0` is
//! [`ColorBucket::Good`], not [`ColorBucket::Regular`].
//!
//! # Public API
//! - [`ColorBucket`]: Enumeration of all buckets, including "no rating"
//!
//! # Partition
//! | Bucket   | Range      |
//! |----------|------------|
//! | Awesome  | 9.0 – 10   |
//! | Great    | 8.0 – 8.9  |
//! | Good     | 7.0 – 7.9  |
//! | Regular  | 6.0 – 6.9  |
//! | Mediocre | 5.0 – 5.9  |
//! | Bad      | 4.0 – 4.9  |
//! | Poor     | 3.0 – 3.9  |
//! | Garbage  | 0.0 – 2.9  |
//! | NoRating | rating 0 or no votes |

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBucket {
    Awesome,
    Great,
    Good,
    Regular,
    Mediocre,
    Bad,
    Poor,
    Garbage,
    NoRating,
}

impl ColorBucket {
    /// Bucket for a rating/vote-count pair. Unrated or unvoted episodes get `NoRating`.
    pub fn from_rating(rating: f64, vote_count: u64) -> Self {
        if rating <= 0.0 || rating.is_nan() || vote_count == 0 {
            return ColorBucket::NoRating;
        }

        match rating {
            r if r >= 9.0 => ColorBucket::Awesome,
            r if r >= 8.0 => ColorBucket::Great,
            r if r >= 7.0 => ColorBucket::Good,
            r if r >= 6.0 => ColorBucket::Regular,
            r if r >= 5.0 => ColorBucket::Mediocre,
            r if r >= 4.0 => ColorBucket::Bad,
            r if r >= 3.0 => ColorBucket::Poor,
            _ => ColorBucket::Garbage,
        }
    }

    /// Accessible label for the bucket
    pub fn label(&self) -> &'static str {
        match self {
            ColorBucket::Awesome => "Awesome",
            ColorBucket::Great => "Great",
            ColorBucket::Good => "Good",
            ColorBucket::Regular => "Regular",
            ColorBucket::Mediocre => "Mediocre",
            ColorBucket::Bad => "Bad",
            ColorBucket::Poor => "Poor",
            ColorBucket::Garbage => "Garbage",
            ColorBucket::NoRating => "No rating",
        }
    }

    /// Rating range covered, as shown in the legend
    pub fn range(&self) -> &'static str {
        match self {
            ColorBucket::Awesome => "9.0 - 10",
            ColorBucket::Great => "8.0 - 8.9",
            ColorBucket::Good => "7.0 - 7.9",
            ColorBucket::Regular => "6.0 - 6.9",
            ColorBucket::Mediocre => "5.0 - 5.9",
            ColorBucket::Bad => "4.0 - 4.9",
            ColorBucket::Poor => "3.0 - 3.9",
            ColorBucket::Garbage => "0.0 - 2.9",
            ColorBucket::NoRating => "-",
        }
    }

    /// All buckets in legend order, best first
    pub fn legend() -> [ColorBucket; 9] {
        [
            ColorBucket::Awesome,
            ColorBucket::Great,
            ColorBucket::Good,
            ColorBucket::Regular,
            ColorBucket::Mediocre,
            ColorBucket::Bad,
            ColorBucket::Poor,
            ColorBucket::Garbage,
            ColorBucket::NoRating,
        ]
    }

    pub fn is_rated(&self) -> bool {
        !matches!(self, ColorBucket::NoRating)
    }
}

impl fmt::Display for ColorBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
