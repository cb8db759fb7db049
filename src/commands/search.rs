use crate::commands::display::print_listing;
use crate::core::{
    command_init::CommandInit,
    error::{Result, SeriesNavigatorError},
};

pub async fn execute_search(words: Vec<String>) -> Result<()> {
    let query = words.join(" ");
    let context = CommandInit::initialize()?;

    let min_length = context.config.search.min_length;
    if query.trim().chars().count() < min_length {
        return Err(SeriesNavigatorError::invalid_argument(format!(
            "search query must be at least {min_length} characters"
        )));
    }

    context.state.search(&query).await?;
    print_listing(&context.state.snapshot().search);
    Ok(())
}
