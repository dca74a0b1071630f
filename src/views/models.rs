use super::shifts;
use crate::app::App;
use crate::core::models::parse_model_id;
use crate::errors::AppResult;
use crate::models::model::Model;
use crate::ui::messages::{header, info};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};

pub fn dashboard(app: &App) -> AppResult<()> {
    header("Modelos");

    let models = app.models().fetch_all()?;
    if models.is_empty() {
        info("No models yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("NAME"),
        Column::left("USERNAME"),
        Column::left("JORNADA"),
        Column::right("PLATFORMS"),
        Column::right("SHIFTS"),
        Column::right("EARNINGS"),
    ]);

    for m in &models {
        table.add_row(vec![
            m.id.to_string(),
            m.name.clone(),
            m.username.clone(),
            m.jornada.to_string(),
            m.platforms.len().to_string(),
            m.shifts.len().to_string(),
            app.fmt_amount(m.total_earnings()),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}

/// Platform names of a model; ids whose platform is gone are shown as-is.
fn platform_names(app: &App, model: &Model) -> AppResult<String> {
    let all = app.platforms().fetch_all()?;
    let names: Vec<String> = model
        .platforms
        .iter()
        .map(|id| {
            all.iter()
                .find(|p| &p.id == id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| id.clone())
        })
        .collect();
    Ok(colorize_optional(&names.join(", ")))
}

fn print_fields(app: &App, model: &Model) -> AppResult<()> {
    println!("ID:        {}", model.id);
    println!("Name:      {}", model.name);
    println!("Username:  {}", model.username);
    println!("Jornada:   {}", model.jornada);
    println!("Platforms: {}", platform_names(app, model)?);
    Ok(())
}

pub fn detail(app: &App, id: &str) -> AppResult<()> {
    let model = app.models().get(parse_model_id(id)?)?;
    header(format!("Modelo {}", model.name));

    print_fields(app, &model)?;
    println!();

    let list = app.shifts().fetch_for_model(model.id)?;
    let refs: Vec<_> = list.iter().collect();
    shifts::summary(app, &refs);
    Ok(())
}

pub fn create_form(app: &App) -> AppResult<()> {
    header("Nuevo modelo");

    let next = app.models().peek_next_id()?;

    println!("ID:        {} (assigned)", next);
    println!("Name:      required (--name)");
    println!("Username:  required (--username)");
    println!("Jornada:   {} (--jornada)", app.cfg.default_jornada);
    println!();
    info("Create with: shiftdesk model add --name <NAME> --username <USERNAME>");
    Ok(())
}

pub fn edit_form(app: &App, id: &str) -> AppResult<()> {
    let model = app.models().get(parse_model_id(id)?)?;
    header(format!("Editar modelo {}", model.name));

    print_fields(app, &model)?;
    println!();
    info(format!(
        "Edit with: shiftdesk model edit {} [--name] [--username] [--jornada] [--add-platform] [--remove-platform]",
        model.id
    ));
    Ok(())
}
