use crate::app::App;
use crate::cli::parser::ModelAction;
use crate::core::models::parse_model_id;
use crate::errors::AppResult;
use crate::models::jornada::Jornada;
use crate::models::model::{ModelPatch, NewModel};
use crate::ui::messages::{info, success, warning};
use crate::views;

pub fn handle(action: &ModelAction, app: &App) -> AppResult<()> {
    let registry = app.models();

    match action {
        ModelAction::Add {
            name,
            username,
            jornada,
        } => {
            let jornada = match jornada {
                Some(code) => Jornada::from_code(code)?,
                None => app.cfg.default_jornada,
            };

            let model = registry.create(NewModel {
                name: name.clone(),
                username: username.clone(),
                jornada,
            })?;
            success(format!("Model '{}' created with id {}", model.name, model.id));
        }

        ModelAction::List => views::models::dashboard(app)?,

        ModelAction::Show { id } => views::models::detail(app, id)?,

        ModelAction::Edit {
            id,
            name,
            username,
            jornada,
            add_platform,
            remove_platform,
        } => {
            let id = parse_model_id(id)?;
            let patch = ModelPatch {
                name: name.clone(),
                username: username.clone(),
                jornada: jornada.as_deref().map(Jornada::from_code).transpose()?,
            };

            if patch.is_empty() && add_platform.is_empty() && remove_platform.is_empty() {
                warning("Nothing to change.");
                return Ok(());
            }

            if !patch.is_empty() {
                registry.update(id, patch)?;
            }

            let platforms = app.platforms();
            for pid in add_platform {
                if platforms.get(pid)?.is_none() {
                    info(format!("Platform {} is not registered, attaching anyway", pid));
                }
                registry.attach_platform(id, pid)?;
            }
            for pid in remove_platform {
                registry.detach_platform(id, pid)?;
            }

            success(format!("Model {} updated", id));
        }

        ModelAction::Del { id } => {
            let id = parse_model_id(id)?;
            registry.delete(id)?;
            success(format!("Model {} deleted", id));
        }
    }

    Ok(())
}
