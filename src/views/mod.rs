//! Plain-text rendering of every routed view.

pub mod models;
pub mod platforms;
pub mod shifts;

use crate::app::App;
use crate::errors::AppResult;
use crate::router::{RouteMatch, View};
use crate::ui::messages::{header, info};
use crate::utils::formatting::bold;

pub fn render(app: &App, target: &RouteMatch) -> AppResult<()> {
    match target.view {
        View::Home => home(app),
        View::Login => login(app),
        View::FinishShift => finish_shift(app),
        View::Dashboard => models::dashboard(app),
        View::Platforms => platforms::list(app),
        View::ModelDetail => models::detail(app, required_param(target)?),
        View::ShiftDetail => shifts::detail(app, required_param(target)?),
        View::ModelCreate => models::create_form(app),
        View::ModelEdit => models::edit_form(app, required_param(target)?),
    }
}

fn required_param(target: &RouteMatch) -> AppResult<&str> {
    target
        .param("id")
        .ok_or_else(|| crate::errors::AppError::RouteNotFound(target.path.clone()))
}

fn home(app: &App) -> AppResult<()> {
    header("shiftdesk");

    match app.session.current_user() {
        Some(user) => {
            println!("Signed in as {}\n", bold(&user.email));
            println!("Models:    {}", app.store.count(crate::models::model::COLLECTION)?);
            println!("Platforms: {}", app.store.count(crate::models::platform::COLLECTION)?);
            println!("Shifts:    {}", app.store.count(crate::models::shift::COLLECTION)?);
            println!("Open:      {}", app.shifts().open_shifts()?.len());
            println!();
        }
        None => println!("Not signed in.\n"),
    }

    println!("Routes:");
    for r in app.router.routes() {
        let lock = if r.requires_auth { "🔒" } else { "  " };
        println!("  {} {}", lock, r.path);
    }
    Ok(())
}

fn login(app: &App) -> AppResult<()> {
    header("Login");

    match app.session.current_user() {
        Some(user) => {
            println!("Signed in as {}", bold(&user.email));
            println!("Since: {}", user.signed_in_at);
        }
        None => {
            println!("Not signed in.");
            info("Sign in with: shiftdesk login --email <EMAIL> --password <PASSWORD>");
        }
    }
    Ok(())
}

/// Public page a model uses to close their own shift.
fn finish_shift(app: &App) -> AppResult<()> {
    header("Finalizar turno");

    println!("Close your open shift with:");
    println!("  shiftdesk finish --username <USERNAME> --earn <PLATFORM>=<AMOUNT> ...\n");

    let platforms = app.platforms().fetch_all()?;
    if !platforms.is_empty() {
        let names: Vec<&str> = platforms.iter().map(|p| p.name.as_str()).collect();
        println!("Platforms: {}", names.join(", "));
    }
    Ok(())
}
