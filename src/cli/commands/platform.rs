use crate::app::App;
use crate::cli::parser::PlatformAction;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::views;

pub fn handle(action: &PlatformAction, app: &App) -> AppResult<()> {
    let registry = app.platforms();

    match action {
        PlatformAction::Add { name } => {
            let p = registry.create(name)?;
            success(format!("Platform '{}' created with id {}", p.name, p.id));
        }
        PlatformAction::List => views::platforms::list(app)?,
        PlatformAction::Edit { id, name } => {
            registry.update(id, name)?;
            success(format!("Platform {} renamed to '{}'", id, name));
        }
        PlatformAction::Del { id } => {
            registry.delete(id)?;
            success(format!("Platform {} deleted", id));
        }
    }

    Ok(())
}
