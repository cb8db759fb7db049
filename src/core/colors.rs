//! Unified color system for rating visualization.
//!
//! Every place that colors a rating (heatmap cells, legend swatches, inline ratings in
//! listings) goes through [`get_bucket_color_style`] so a bucket always renders the
//! same way.
//!
//! # Public API
//! - [`get_bucket_color_style`]: Color function for a bucket's heatmap cell
//! - [`get_bucket_text_style`]: Foreground-only variant for inline text
//! - [`get_rating_cell`]: Fixed-width heatmap cell for an episode (or a gap)
//! - [`get_legend_entry`]: Swatch plus label and range
//! - [`get_colored_rating`]: Inline rating like `8.7` or `N/A`
//!
//! # Color Scheme
//! Greens for 8+, yellow for 7s, oranges for 5-6, reds for 3-4, purple below 3,
//! grey when there is no rating.

use crate::core::aggregator::Episode;
use crate::core::rating::ColorBucket;
use colored::*;

/// Width of one heatmap cell in terminal columns
pub const CELL_WIDTH: usize = 5;

fn bucket_rgb(bucket: ColorBucket) -> (u8, u8, u8) {
    match bucket {
        ColorBucket::Awesome => (34, 197, 94),
        ColorBucket::Great => (74, 222, 128),
        ColorBucket::Good => (250, 204, 21),
        ColorBucket::Regular => (251, 146, 60),
        ColorBucket::Mediocre => (249, 115, 22),
        ColorBucket::Bad => (239, 68, 68),
        ColorBucket::Poor => (220, 38, 38),
        ColorBucket::Garbage => (147, 51, 234),
        ColorBucket::NoRating => (209, 213, 219),
    }
}

/// Cell style: bucket color as background, dark text on top
pub fn get_bucket_color_style(bucket: ColorBucket) -> Box<dyn Fn(&str) -> ColoredString> {
    let (r, g, b) = bucket_rgb(bucket);
    Box::new(move |text: &str| text.black().on_truecolor(r, g, b))
}

pub fn get_bucket_text_style(bucket: ColorBucket) -> Box<dyn Fn(&str) -> ColoredString> {
    match bucket {
        ColorBucket::NoRating => Box::new(|text: &str| text.bright_black()),
        other => {
            let (r, g, b) = bucket_rgb(other);
            Box::new(move |text: &str| text.truecolor(r, g, b).bold())
        }
    }
}

/// Heatmap cell for one grid position. `None` means the season has no episode there.
pub fn get_rating_cell(episode: Option<&Episode>) -> ColoredString {
    match episode {
        Some(episode) => {
            let label = if episode.is_rated() {
                format!("{:.1}", episode.rating)
            } else {
                "--".to_string()
            };
            let color_fn = get_bucket_color_style(episode.color_bucket);
            color_fn(&format!("{label:^width$}", width = CELL_WIDTH))
        }
        None => " ".repeat(CELL_WIDTH).normal(),
    }
}

pub fn get_legend_entry(bucket: ColorBucket) -> String {
    let swatch = get_bucket_color_style(bucket)("   ");
    format!(
        "{swatch} {} {}",
        bucket.label().white(),
        format!("({})", bucket.range()).bright_black()
    )
}

pub fn get_colored_rating(rating: Option<f64>, vote_count: Option<u64>) -> ColoredString {
    let rating = rating.unwrap_or(0.0);
    let bucket = ColorBucket::from_rating(rating, vote_count.unwrap_or(1));
    let color_fn = get_bucket_text_style(bucket);
    if bucket.is_rated() {
        color_fn(&format!("{rating:.1}"))
    } else {
        color_fn("N/A")
    }
}
