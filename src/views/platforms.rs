use crate::app::App;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};

pub fn list(app: &App) -> AppResult<()> {
    header("Plataformas");

    let platforms = app.platforms().fetch_all()?;
    if platforms.is_empty() {
        info("No platforms yet.");
        return Ok(());
    }

    let models = app.models().fetch_all()?;

    let mut table = Table::new(vec![
        Column::left("ID"),
        Column::left("NAME"),
        Column::right("MODELS"),
    ]);

    for p in &platforms {
        let used_by = models.iter().filter(|m| m.platforms.contains(&p.id)).count();
        table.add_row(vec![p.id.clone(), p.name.clone(), used_by.to_string()]);
    }

    print!("{}", table.render());
    Ok(())
}
