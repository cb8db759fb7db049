use crate::commands::display::{print_listing, print_show};
use crate::core::{
    api::TrendingWindow, app_state::BrowseSource, command_init::CommandInit, error::Result,
};

pub async fn execute_top_rated() -> Result<()> {
    execute_browse(BrowseSource::TopRated).await
}

pub async fn execute_popular() -> Result<()> {
    execute_browse(BrowseSource::Popular).await
}

pub async fn execute_trending(window: TrendingWindow) -> Result<()> {
    execute_browse(BrowseSource::Trending(window)).await
}

async fn execute_browse(source: BrowseSource) -> Result<()> {
    let context = CommandInit::initialize()?;
    context.state.browse(source).await?;
    print_listing(&context.state.snapshot().search);
    Ok(())
}

/// Pick a random popular show and open it
pub async fn execute_random() -> Result<()> {
    let context = CommandInit::initialize()?;
    context.state.select_random_show().await?;
    print_show(&context.state.snapshot().show, &context.config.api.region);
    Ok(())
}
