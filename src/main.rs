use clap::{Parser, Subcommand};
use series_navigator::commands::*;
use series_navigator::core::{api::TrendingWindow, error::Result, print_error};
use std::env;

#[derive(Parser)]
#[command(name = "series-navigator")]
#[command(about = "Explore TV series episode ratings as a heatmap")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search TV shows by name
    Search {
        /// Show name (e.g., "breaking bad")
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Show the episode rating heatmap of a show
    Show {
        /// TMDb show id
        id: u64,
    },
    /// Top 100 rated shows
    TopRated,
    /// Currently popular shows
    Popular,
    /// Trending shows
    Trending {
        /// Time window: day or week
        #[arg(long, default_value = "week")]
        window: TrendingWindow,
    },
    /// Open a random popular show
    Random,
    /// Details of a single episode
    Episode {
        /// TMDb show id
        show_id: u64,
        season: u32,
        episode: u32,
    },
    /// Inspect or clear the local response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Interactive session with search-as-you-type and back/forward history
    Session,
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove expired and unreadable entries
    Sweep,
    /// Remove cached entries
    Clear {
        /// Only clear one namespace: show, season or search
        #[arg(long)]
        namespace: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(cli.command).await {
        log::debug!("Command failed: {e:?}");
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Search { query } => execute_search(query).await,
        Commands::Show { id } => execute_show(id).await,
        Commands::TopRated => execute_top_rated().await,
        Commands::Popular => execute_popular().await,
        Commands::Trending { window } => execute_trending(window).await,
        Commands::Random => execute_random().await,
        Commands::Episode {
            show_id,
            season,
            episode,
        } => execute_episode(show_id, season, episode).await,
        Commands::Cache { action } => match action {
            CacheAction::Sweep => execute_cache_sweep(),
            CacheAction::Clear { namespace } => execute_cache_clear(namespace),
        },
        Commands::Session => execute_session().await,
    }
}
