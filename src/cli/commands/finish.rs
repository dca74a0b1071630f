use crate::app::App;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::models::shift::parse_earnings;
use crate::models::timestamp::Timestamp;
use crate::ui::messages::success;

/// Public `/finalizar` action: a model closes their own open shift.
pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Finish { username, at, earn } = cmd {
        let shift = app.shifts().finish_for_username(
            username,
            Timestamp::parse(at)?,
            parse_earnings(earn)?,
        )?;

        success(format!(
            "Shift {} finished at {}, total {}",
            shift.id,
            app.fmt_time(&shift.end),
            app.fmt_amount(shift.total())
        ));
    }

    Ok(())
}
