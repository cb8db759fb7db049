use crate::commands::display::print_episode;
use crate::core::{
    command_init::CommandInit,
    error::{Result, SeriesNavigatorError},
    models::ShowSummary,
};

pub async fn execute_episode(show_id: u64, season: u32, episode: u32) -> Result<()> {
    if season == 0 || episode == 0 {
        return Err(SeriesNavigatorError::invalid_argument(
            "season and episode numbers start at 1",
        ));
    }

    let context = CommandInit::initialize()?;
    context
        .state
        .select_show(ShowSummary {
            id: show_id,
            ..Default::default()
        })
        .await?;
    context.state.select_episode(season, episode)?;

    let snapshot = context.state.snapshot();
    if let Some(details) = &snapshot.show.details {
        println!("\n{}", details.name);
    }
    if let Some(selected) = &snapshot.selected_episode {
        print_episode(selected);
    }
    Ok(())
}
