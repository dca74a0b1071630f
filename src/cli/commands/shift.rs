use crate::app::App;
use crate::cli::parser::ShiftAction;
use crate::core::calculator::earnings;
use crate::core::models::parse_model_id;
use crate::errors::AppResult;
use crate::models::shift::{ShiftPatch, parse_earnings};
use crate::models::timestamp::Timestamp;
use crate::ui::messages::success;
use crate::views;

pub fn handle(action: &ShiftAction, app: &App) -> AppResult<()> {
    let ledger = app.shifts();

    match action {
        ShiftAction::Start { model, at } => {
            let shift = ledger.start(parse_model_id(model)?, Timestamp::parse(at)?)?;
            success(format!(
                "Shift {} opened at {}",
                shift.id,
                app.fmt_time(&shift.start)
            ));
        }

        ShiftAction::Add {
            model,
            from,
            to,
            earn,
        } => {
            let shift = ledger.record(
                parse_model_id(model)?,
                Timestamp::parse(from)?,
                Timestamp::parse(to)?,
                parse_earnings(earn)?,
            )?;
            success(format!(
                "Shift {} recorded, total {}",
                shift.id,
                app.fmt_amount(shift.total())
            ));
        }

        ShiftAction::Close { id, at, earn } => {
            let shift = ledger.finish(id, Timestamp::parse(at)?, parse_earnings(earn)?)?;
            success(format!(
                "Shift {} finished, total {}",
                shift.id,
                app.fmt_amount(shift.total())
            ));
        }

        ShiftAction::Show { id } => views::shifts::detail(app, id)?,

        ShiftAction::List { model, from, to } => {
            let shifts = match model {
                Some(m) => ledger.fetch_for_model(parse_model_id(m)?)?,
                None => ledger.fetch_all()?,
            };
            let from = Timestamp::parse_optional(from.as_ref())?;
            let to = Timestamp::parse_optional(to.as_ref())?;

            let selected = earnings::within(&shifts, from, to);
            views::shifts::summary(app, &selected);
        }

        ShiftAction::Edit { id, from, to, earn } => {
            let patch = ShiftPatch {
                start: Timestamp::parse_optional(from.as_ref())?,
                end: Timestamp::parse_optional(to.as_ref())?,
                earnings: parse_earnings(earn)?,
            };
            ledger.update(id, patch)?;
            success(format!("Shift {} updated", id));
        }

        ShiftAction::Del { id } => {
            ledger.delete(id)?;
            success(format!("Shift {} deleted", id));
        }
    }

    Ok(())
}
