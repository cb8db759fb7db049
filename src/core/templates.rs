//! Output line templates for listings, show headers and heatmap statistics.
//!
//! Each template is a `{placeholder}` string. Rendering substitutes the placeholders
//! and then colors the line according to which template it came from. Commands build a
//! [`TemplateContext`] and never assemble colored strings by hand.
//!
//! # Public API
//! - [`Templates`] / [`TEMPLATES`]: Template definitions for every output line
//! - [`TemplateContext`]: Values a template may reference
//! - [`render_template`] / [`render_template_plain`]: Colored and uncolored rendering
//! - [`strip_ansi_codes`]: Drop escape sequences from a colored line
//! - [`format_season_episode`], [`format_rating`], [`format_vote_count`],
//!   [`truncate_text`]: Field formatters shared by the templates and the heatmap
//!
//! # Template Categories
//! - **Headers**: Show title and metadata
//! - **Statistics**: Average, best and worst episode
//! - **Listing lines**: Numbered search/browse results

use crate::core::colors::get_colored_rating;
use colored::*;
use std::fmt::Write;

pub struct Templates {
    // Header templates
    pub header_show: &'static str,
    pub header_meta: &'static str,

    // Statistics templates
    pub stats_average: &'static str,
    pub stats_best: &'static str,
    pub stats_worst: &'static str,

    // Listing templates
    pub section_listing: &'static str,
    pub result_line: &'static str,

    // Episode detail
    pub episode_header: &'static str,
    pub episode_rating: &'static str,
}

pub static TEMPLATES: Templates = Templates {
    header_show: "▶ {show_name} {year}",
    header_meta: "   {count} seasons · {status}",
    stats_average: "   Average: {rating} over {rated} rated episodes",
    stats_best: "   Best:    {episode_code} {episode_name} {rating}",
    stats_worst: "   Worst:   {episode_code} {episode_name} {rating}",
    section_listing: "➤ {query} ({count}):",
    result_line: "   [{n}] {show_name} {year} {rating}",
    episode_header: "{episode_code} {episode_name}",
    episode_rating: "   Rating: {rating} ({votes} votes)",
};

impl Default for Templates {
    fn default() -> Self {
        Self {
            header_show: TEMPLATES.header_show,
            header_meta: TEMPLATES.header_meta,
            stats_average: TEMPLATES.stats_average,
            stats_best: TEMPLATES.stats_best,
            stats_worst: TEMPLATES.stats_worst,
            section_listing: TEMPLATES.section_listing,
            result_line: TEMPLATES.result_line,
            episode_header: TEMPLATES.episode_header,
            episode_rating: TEMPLATES.episode_rating,
        }
    }
}

/// Everything a template line may reference; unset fields render as nothing
#[derive(Debug, Default)]
pub struct TemplateContext<'a> {
    pub show_name: Option<&'a str>,
    pub year: Option<&'a str>,
    pub status: Option<&'a str>,
    pub query: Option<&'a str>,
    pub episode_code: Option<&'a str>,
    pub episode_name: Option<&'a str>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub rated: Option<usize>,
    pub count: Option<usize>,
    pub n: Option<usize>,
}

pub fn render_template(template: &str, context: &TemplateContext) -> String {
    let estimated_capacity = template.len()
        + context.show_name.map_or(0, str::len)
        + context.query.map_or(0, str::len)
        + context.episode_name.map_or(0, str::len)
        + context.status.map_or(0, str::len)
        + 64;

    let mut plain = String::with_capacity(estimated_capacity);
    render_placeholders(template, context, &mut plain);

    apply_colors(&plain, template, context)
}

/// Substitute `{name}` placeholders. Unknown names and unclosed braces pass through.
fn render_placeholders(template: &str, context: &TemplateContext, output: &mut String) {
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find(['{', '}']) {
            Some(close) if after[close..].starts_with('}') => {
                let name = &after[..close];
                if !substitute(name, context, output) {
                    let _ = write!(output, "{{{name}}}");
                }
                rest = &after[close + 1..];
            }
            _ => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
}

fn substitute(name: &str, context: &TemplateContext, output: &mut String) -> bool {
    match name {
        "show_name" => push_opt(output, context.show_name),
        "status" => push_opt(output, context.status),
        "query" => push_opt(output, context.query),
        "episode_code" => push_opt(output, context.episode_code),
        "episode_name" => push_opt(output, context.episode_name),
        "year" => {
            if let Some(year) = context.year {
                let _ = write!(output, "({year})");
            }
        }
        "rating" if context.rating.is_some() || context.votes.is_some() => {
            output.push_str(&format_rating(context.rating.unwrap_or(0.0)));
        }
        "votes" => {
            if let Some(votes) = context.votes {
                output.push_str(&format_vote_count(votes));
            }
        }
        "rated" | "count" | "n" => {
            let value = match name {
                "rated" => context.rated,
                "count" => context.count,
                _ => context.n,
            };
            if let Some(value) = value {
                let _ = write!(output, "{value}");
            }
        }
        "rating" => {}
        _ => return false,
    }
    true
}

fn push_opt(output: &mut String, value: Option<&str>) {
    if let Some(value) = value {
        output.push_str(value);
    }
}

fn apply_colors(text: &str, template: &str, context: &TemplateContext) -> String {
    let mut result = String::with_capacity(text.len() + 64);
    let rating = || get_colored_rating(context.rating, context.votes);

    match template {
        t if t == TEMPLATES.header_show => {
            let _ = write!(
                result,
                "{} {}",
                "▶".blue(),
                context.show_name.unwrap_or_default().bold()
            );
            if let Some(year) = context.year {
                let _ = write!(result, " {}", format!("({year})").bright_black());
            }
        }
        t if t == TEMPLATES.stats_best || t == TEMPLATES.stats_worst => {
            let (label, color): (&str, Color) = if t == TEMPLATES.stats_best {
                ("Best:   ", Color::Green)
            } else {
                ("Worst:  ", Color::Red)
            };
            let _ = write!(
                result,
                "   {} {} {} {}",
                label.color(color),
                context.episode_code.unwrap_or_default().blue(),
                context.episode_name.unwrap_or_default().white(),
                rating()
            );
        }
        t if t == TEMPLATES.stats_average => {
            let _ = write!(
                result,
                "   {} {} {}",
                "Average:".white(),
                rating(),
                format!("over {} rated episodes", context.rated.unwrap_or(0)).bright_black()
            );
        }
        t if t == TEMPLATES.section_listing => {
            let _ = write!(
                result,
                "{} {} {}",
                "➤".cyan(),
                context.query.unwrap_or_default().cyan(),
                format!("({}):", context.count.unwrap_or(0)).bright_black()
            );
        }
        t if t == TEMPLATES.result_line => {
            let _ = write!(
                result,
                "   {}{}{} {}",
                "[".bright_black(),
                context.n.unwrap_or(0).to_string().white(),
                "]".bright_black(),
                context.show_name.unwrap_or_default().white()
            );
            if let Some(year) = context.year {
                let _ = write!(result, " {}", format!("({year})").bright_black());
            }
            let _ = write!(result, " {}", rating());
        }
        t if t == TEMPLATES.episode_header => {
            let _ = write!(
                result,
                "{} {}",
                context.episode_code.unwrap_or_default().blue().bold(),
                context.episode_name.unwrap_or_default().bold()
            );
        }
        _ => result.push_str(text),
    }

    result
}

/// Remove `ESC [ ... <letter>` sequences
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("\x1b[") {
        result.push_str(&rest[..start]);
        let sequence = &rest[start + 2..];
        let end = sequence
            .find(|c: char| c.is_ascii_alphabetic())
            .map_or(sequence.len(), |i| i + 1);
        rest = &sequence[end..];
    }

    result.push_str(rest);
    result
}

/// Rendered line with colors stripped
pub fn render_template_plain(template: &str, context: &TemplateContext) -> String {
    strip_ansi_codes(&render_template(template, context))
}

/// `S01E05` style code
pub fn format_season_episode(season: u32, episode: u32) -> String {
    format!("S{season:02}E{episode:02}")
}

/// One decimal, or `N/A` for missing ratings
pub fn format_rating(rating: f64) -> String {
    if rating > 0.0 && rating.is_finite() {
        format!("{rating:.1}")
    } else {
        "N/A".to_string()
    }
}

/// Thousands separators: `12345` → `12,345`
pub fn format_vote_count(count: u64) -> String {
    let digits = count.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated.trim_end())
}
