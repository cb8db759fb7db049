use crate::commands::display::print_show;
use crate::core::{command_init::CommandInit, error::Result, models::ShowSummary};

pub async fn execute_show(show_id: u64) -> Result<()> {
    let context = CommandInit::initialize()?;

    context
        .state
        .select_show(ShowSummary {
            id: show_id,
            ..Default::default()
        })
        .await?;

    print_show(&context.state.snapshot().show, &context.config.api.region);
    Ok(())
}
