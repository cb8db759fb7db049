//! Interactive session: one long-lived orchestrator driven by lines on stdin.
//!
//! Free text is treated as search-as-you-type input: each line starts a debounced search
//! on its own task while stdin keeps being read, so a line typed within the quiet period
//! supersedes the one before it. Everything else is a navigation command awaited in line.

use crate::commands::display::print_snapshot;
use crate::core::{
    api::TrendingWindow,
    app_state::AppState,
    command_init::CommandInit,
    error::{Result, SeriesNavigatorError},
    print_error, print_error_with_usage, print_info, print_section_header,
    state::CurrentView,
};
use colored::*;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

const USAGE: &[(&str, &str)] = &[
    ("<text>", "Search shows by name"),
    ("search <text>", "Search immediately, skipping the debounce"),
    ("open <n>", "Open result n from the current listing"),
    ("episode <s> <e>", "Show details for season s, episode e"),
    ("close", "Close the episode details"),
    ("top | popular", "Browse top rated or popular shows"),
    ("trending [day|week]", "Browse trending shows"),
    ("random", "Open a random popular show"),
    ("back | forward", "Move through history"),
    ("history", "List visited views"),
    ("home", "Start over and forget history"),
    ("retry", "Repeat the last failed request"),
    ("clear", "Clear the search"),
    ("quit", "Leave the session"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Empty,
    Quit,
    Help,
    Type(String),
    Search(String),
    Open(usize),
    Episode(u32, u32),
    CloseEpisode,
    TopRated,
    Popular,
    Trending(TrendingWindow),
    Random,
    Back,
    Forward,
    History,
    Home,
    Retry,
    ClearSearch,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Ok(SessionCommand::Empty);
        };
        let rest: Vec<&str> = parts.collect();

        let command = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("quit" | "exit" | "q", []) => SessionCommand::Quit,
            ("help" | "?", []) => SessionCommand::Help,
            ("search", [_, ..]) => SessionCommand::Search(rest.join(" ")),
            ("open", [n]) => SessionCommand::Open(parse_number(n, "result number")?),
            ("episode", [season, episode]) => SessionCommand::Episode(
                parse_number(season, "season")?,
                parse_number(episode, "episode")?,
            ),
            ("close", []) => SessionCommand::CloseEpisode,
            ("top", []) => SessionCommand::TopRated,
            ("popular", []) => SessionCommand::Popular,
            ("trending", []) => SessionCommand::Trending(TrendingWindow::default()),
            ("trending", [window]) => SessionCommand::Trending(window.parse()?),
            ("random", []) => SessionCommand::Random,
            ("back" | "b", []) => SessionCommand::Back,
            ("forward" | "f", []) => SessionCommand::Forward,
            ("history", []) => SessionCommand::History,
            ("home", []) => SessionCommand::Home,
            ("retry", []) => SessionCommand::Retry,
            ("clear", []) => SessionCommand::ClearSearch,
            ("open" | "episode", _) => {
                return Err(SeriesNavigatorError::invalid_argument(format!(
                    "wrong number of arguments for '{head}'"
                )))
            }
            _ => SessionCommand::Type(line.to_string()),
        };
        Ok(command)
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| SeriesNavigatorError::invalid_argument(format!("invalid {what} '{value}'")))
}

pub async fn execute_session() -> Result<()> {
    let context = CommandInit::initialize()?;
    let region = context.config.api.region.clone();
    let state = Arc::new(context.state);

    print_info("Series Navigator. Type a show name to search, 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt(&state);
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                print_error_with_usage(&e.to_string(), USAGE);
                continue;
            }
        };

        match command {
            SessionCommand::Empty => continue,
            SessionCommand::Quit => break,
            SessionCommand::Help => {
                print_section_header("Commands");
                for (pattern, description) in USAGE {
                    println!("  {:<20} {}", pattern, description.bright_black());
                }
                println!();
                continue;
            }
            SessionCommand::History => {
                print_history(&state);
                continue;
            }
            SessionCommand::Type(text) => {
                spawn_typed_search(Arc::clone(&state), text, region.clone());
                continue;
            }
            command => {
                if let Err(e) = run_command(&state, command).await {
                    log::debug!("Session command failed: {e}");
                    print_error(&e.to_string());
                    continue;
                }
            }
        }

        print_snapshot(&state.snapshot(), &region);
    }

    Ok(())
}

/// Run a typed search in the background and print the listing once it lands
///
/// # Returns
/// The task resolves to `Ok(false)` when the input was too short or a newer line
/// superseded it before the quiet period ended.
pub fn spawn_typed_search(
    state: Arc<AppState>,
    text: String,
    region: String,
) -> JoinHandle<Result<bool>> {
    tokio::spawn(async move {
        let outcome = state.search_input(&text).await;
        match &outcome {
            Ok(true) => {
                println!();
                print_snapshot(&state.snapshot(), &region);
                print_prompt(&state);
            }
            Ok(false) => log::debug!("Typed search for '{text}' produced no lookup"),
            Err(e) => {
                log::debug!("Typed search failed: {e}");
                print_error(&e.to_string());
                print_prompt(&state);
            }
        }
        outcome
    })
}

async fn run_command(state: &AppState, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Search(query) => state.search(&query).await?,
        SessionCommand::Open(n) => {
            let snapshot = state.snapshot();
            if snapshot.view != CurrentView::Browse {
                return Err(SeriesNavigatorError::invalid_argument(
                    "no listing to open from; search or browse first",
                ));
            }
            let show = n
                .checked_sub(1)
                .and_then(|index| snapshot.search.results.get(index))
                .cloned()
                .ok_or_else(|| {
                    SeriesNavigatorError::invalid_argument(format!(
                        "no result {n} (listing has {})",
                        snapshot.search.results.len()
                    ))
                })?;
            state.select_show(show).await?;
        }
        SessionCommand::Episode(season, episode) => state.select_episode(season, episode)?,
        SessionCommand::CloseEpisode => state.close_episode(),
        SessionCommand::TopRated => state.browse_top_rated().await?,
        SessionCommand::Popular => state.browse_popular().await?,
        SessionCommand::Trending(window) => state.browse_trending(window).await?,
        SessionCommand::Random => state.select_random_show().await?,
        SessionCommand::Back => {
            if !state.go_back().await? {
                print_info("Nothing to go back to.");
            }
        }
        SessionCommand::Forward => {
            if !state.go_forward().await? {
                print_info("Nothing to go forward to.");
            }
        }
        SessionCommand::Home => state.go_home(),
        SessionCommand::Retry => {
            if !state.retry().await? {
                print_info("Nothing to retry.");
            }
        }
        SessionCommand::ClearSearch => state.clear_search(),
        SessionCommand::Empty
        | SessionCommand::Type(_)
        | SessionCommand::Quit
        | SessionCommand::Help
        | SessionCommand::History => {}
    }
    Ok(())
}

fn print_prompt(state: &AppState) {
    let snapshot = state.snapshot();
    let back = if snapshot.can_go_back { "‹" } else { " " };
    let forward = if snapshot.can_go_forward { "›" } else { " " };
    let view = match snapshot.view {
        CurrentView::Home => "home",
        CurrentView::Browse => "browse",
        CurrentView::Detail => "show",
    };
    print!("{}{} {} {} ", back.blue(), forward.blue(), view.bright_black(), ">".cyan());
    let _ = std::io::stdout().flush();
}

fn print_history(state: &AppState) {
    let (entries, cursor) = state.history();
    if entries.is_empty() {
        print_info("No history yet.");
        return;
    }

    print_section_header("History");
    for (index, entry) in entries.iter().enumerate() {
        let marker = if Some(index) == cursor { "*" } else { " " };
        println!("  {} {}", marker.green(), entry.label());
    }
    println!();
}
