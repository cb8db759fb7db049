//! Terminal rendering of orchestrator snapshots, shared by the one-shot commands and
//! the interactive session.

use crate::core::{
    aggregator::HeatmapModel,
    colors::{get_legend_entry, get_rating_cell, CELL_WIDTH},
    format_season_episode, print_info, print_section_header, render_template, truncate_text,
    AppSnapshot, ColorBucket, CurrentView, SearchState, SelectedEpisode, ShowState,
    TemplateContext, TEMPLATES,
};
use colored::*;

const OVERVIEW_WIDTH: usize = 240;

/// Render whatever view is live
pub fn print_snapshot(snapshot: &AppSnapshot, region: &str) {
    match snapshot.view {
        CurrentView::Home => print_info("Type a show name to search, or 'help' for commands."),
        CurrentView::Browse => print_listing(&snapshot.search),
        CurrentView::Detail => print_show(&snapshot.show, region),
    }

    if let Some(selected) = &snapshot.selected_episode {
        print_episode(selected);
    }
}

pub fn print_listing(search: &SearchState) {
    if search.is_searching {
        print_info(&format!("Searching for \"{}\"...", search.query));
        return;
    }
    if let Some(error) = &search.error {
        println!("\n{} {}", "✕".red(), error.red());
        return;
    }
    if search.results.is_empty() {
        print_info(&format!("No shows found for \"{}\".", search.query));
        return;
    }

    let header = render_template(
        TEMPLATES.section_listing,
        &TemplateContext {
            query: Some(&search.query),
            count: Some(search.results.len()),
            ..Default::default()
        },
    );
    println!("\n{header}\n");

    for (index, show) in search.results.iter().enumerate() {
        let line = render_template(
            TEMPLATES.result_line,
            &TemplateContext {
                n: Some(index + 1),
                show_name: Some(&show.name),
                year: show.year(),
                rating: show.vote_average,
                votes: show.vote_count,
                ..Default::default()
            },
        );
        println!("{line}");
    }
    println!();
}

pub fn print_show(show: &ShowState, region: &str) {
    if let Some(error) = &show.error {
        println!("\n{} {}", "✕".red(), error.red());
        return;
    }

    let Some(details) = &show.details else {
        if show.is_loading {
            print_info("Loading show...");
        }
        return;
    };

    let summary = details.summary();
    let header = render_template(
        TEMPLATES.header_show,
        &TemplateContext {
            show_name: Some(&details.name),
            year: summary.year(),
            ..Default::default()
        },
    );
    println!("\n{header}");

    let status = details.status.as_deref().unwrap_or("Unknown status");
    let meta = render_template(
        TEMPLATES.header_meta,
        &TemplateContext {
            count: Some(details.number_of_seasons as usize),
            status: Some(status),
            ..Default::default()
        },
    );
    println!("{}", meta.bright_black());

    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        println!("   {}", genres.join(", ").bright_black());
    }
    if let Some(overview) = details.overview.as_deref().filter(|o| !o.is_empty()) {
        println!("\n   {}", truncate_text(overview, OVERVIEW_WIDTH));
    }

    if let Some(providers) = show
        .watch_providers
        .as_ref()
        .and_then(|p| p.for_region(region))
        .filter(|p| !p.flatrate.is_empty())
    {
        let names: Vec<&str> = providers
            .flatrate
            .iter()
            .map(|p| p.provider_name.as_str())
            .collect();
        println!("\n   {} {}", "Stream on:".white(), names.join(", ").cyan());
    }

    match &show.heatmap {
        Some(heatmap) if !heatmap.is_empty() => {
            print_stats(heatmap);
            print_heatmap(heatmap);
            print_legend();
        }
        Some(_) => print_info("No episode ratings available yet."),
        None if show.is_loading => print_info("Loading seasons..."),
        None => {}
    }
}

fn print_stats(heatmap: &HeatmapModel) {
    let stats = &heatmap.stats;
    println!();
    println!(
        "{}",
        render_template(
            TEMPLATES.stats_average,
            &TemplateContext {
                rating: Some(stats.average_rating),
                votes: Some(stats.rated_episode_count as u64),
                rated: Some(stats.rated_episode_count),
                ..Default::default()
            },
        )
    );

    let extremes = [
        (TEMPLATES.stats_best, &stats.highest_rated_episode),
        (TEMPLATES.stats_worst, &stats.lowest_rated_episode),
    ];
    for (template, extreme) in extremes {
        if let Some(rated) = extreme {
            let code = format_season_episode(rated.season_number, rated.episode.episode_number);
            println!(
                "{}",
                render_template(
                    template,
                    &TemplateContext {
                        episode_code: Some(&code),
                        episode_name: Some(&rated.episode.name),
                        rating: Some(rated.episode.rating),
                        votes: Some(rated.episode.vote_count),
                        ..Default::default()
                    },
                )
            );
        }
    }
}

/// Seasons as rows, episode positions as columns
pub fn print_heatmap(heatmap: &HeatmapModel) {
    print_section_header("Episode ratings");

    let mut header = String::from("     ");
    for episode_number in 1..=heatmap.max_episodes_per_season {
        header.push_str(&format!("{episode_number:^width$}", width = CELL_WIDTH));
    }
    println!("{}", header.bright_black());

    for season in &heatmap.seasons {
        let mut row = format!("{} ", format!("S{:02}", season.season_number).bright_black());
        row.push(' ');
        for position in 0..heatmap.max_episodes_per_season {
            row.push_str(&get_rating_cell(season.episodes.get(position)).to_string());
        }
        println!("{row}");
    }
}

pub fn print_legend() {
    println!();
    for bucket in ColorBucket::legend() {
        println!("   {}", get_legend_entry(bucket));
    }
    println!();
}

pub fn print_episode(selected: &SelectedEpisode) {
    let episode = &selected.episode;
    let code = format_season_episode(selected.season_number, episode.episode_number);
    let name = if episode.name.is_empty() {
        "Untitled"
    } else {
        episode.name.as_str()
    };

    let header = render_template(
        TEMPLATES.episode_header,
        &TemplateContext {
            episode_code: Some(&code),
            episode_name: Some(name),
            ..Default::default()
        },
    );
    println!("\n{header}");

    println!(
        "{}",
        render_template(
            TEMPLATES.episode_rating,
            &TemplateContext {
                rating: Some(episode.rating),
                votes: Some(episode.vote_count),
                ..Default::default()
            },
        )
    );
    println!("   {} {}", "Bucket:".bright_black(), episode.color_bucket);
    if let Some(air_date) = episode.air_date {
        println!(
            "   {} {}",
            "Aired:".bright_black(),
            air_date.format("%B %-d, %Y")
        );
    }
    if !episode.overview.is_empty() {
        println!("\n   {}", truncate_text(&episode.overview, OVERVIEW_WIDTH));
    }
    println!();
}
