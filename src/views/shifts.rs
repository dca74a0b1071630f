use crate::app::App;
use crate::core::calculator::earnings;
use crate::errors::AppResult;
use crate::models::shift::{Earnings, Shift};
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_amount, color_for_status, colorize_optional};
use crate::utils::formatting::{bold, mins2readable, shift_status};
use crate::utils::table::{Column, Table};

pub fn detail(app: &App, id: &str) -> AppResult<()> {
    let shift = app.shifts().get(id)?;
    header(format!("Turno {}", shift.id));

    let owner = match app.shifts().model_of(&shift) {
        Ok(m) => format!("{} (#{})", m.name, m.id),
        Err(_) => colorize_optional(""),
    };

    println!("Model:    {}", owner);
    println!(
        "Status:   {}{}{}",
        color_for_status(shift.finished),
        shift_status(&shift),
        RESET
    );
    println!("From:     {}", app.fmt_time(&shift.start));
    if shift.finished {
        println!("To:       {}", app.fmt_time(&shift.end));
        println!(
            "Duration: {}",
            mins2readable(shift.duration().num_minutes(), false)
        );
    } else {
        println!("To:       {}", colorize_optional(""));
    }
    println!();

    print_earnings(app, &shift.earnings);

    if let Some(rate) = shift.hourly_rate() {
        println!("Per hour: {}", app.fmt_amount(rate));
    }
    Ok(())
}

/// Per-platform amounts followed by their total.
pub fn print_earnings(app: &App, by_platform: &Earnings) {
    if by_platform.is_empty() {
        info("No earnings recorded.");
        return;
    }

    let mut table = Table::new(vec![Column::left("PLATFORM"), Column::right("AMOUNT")]);
    for (platform, amount) in by_platform {
        table.add_row(vec![platform.clone(), app.fmt_amount(*amount)]);
    }
    print!("{}", table.render());

    let total: f64 = by_platform.values().sum();
    println!(
        "{} {}{}{}",
        bold("Total:"),
        color_for_amount(total),
        app.fmt_amount(total),
        RESET
    );
}

pub fn print_shift_table(app: &App, shifts: &[&Shift]) {
    let mut table = Table::new(vec![
        Column::left("ID"),
        Column::left("MODEL"),
        Column::left("FROM"),
        Column::left("TO"),
        Column::right("TIME"),
        Column::left("STATUS"),
        Column::right("TOTAL"),
    ]);

    for s in shifts {
        let (to, time) = if s.finished {
            (
                app.fmt_time(&s.end),
                mins2readable(s.duration().num_minutes(), true),
            )
        } else {
            (colorize_optional(""), colorize_optional(""))
        };

        table.add_row(vec![
            s.id.clone(),
            s.model.clone(),
            app.fmt_time(&s.start),
            to,
            time,
            format!("{}{}{}", color_for_status(s.finished), shift_status(s), RESET),
            app.fmt_amount(s.total()),
        ]);
    }

    print!("{}", table.render());
}

/// Shift list with its per-platform summary.
pub fn summary(app: &App, shifts: &[&Shift]) {
    if shifts.is_empty() {
        info("No shifts found.");
        return;
    }

    print_shift_table(app, shifts);
    println!();
    println!(
        "Worked: {}",
        mins2readable(earnings::worked_minutes(shifts.iter().copied()), false)
    );
    print_earnings(app, &earnings::by_platform(shifts.iter().copied()));
}
