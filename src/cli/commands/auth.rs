use crate::app::App;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, app: &mut App) -> AppResult<()> {
    match cmd {
        Commands::Signup { email, password } => {
            let user = app.session.sign_up(app.auth, email, password)?;
            success(format!("Account created, signed in as {}", user.email));
        }
        Commands::Login { email, password } => {
            let user = app.session.sign_in(app.auth, email, password)?;
            success(format!("Signed in as {}", user.email));
        }
        Commands::Logout => {
            if app.session.is_authenticated() {
                app.session.sign_out(app.auth)?;
                success("Signed out.");
            } else {
                info("Not signed in.");
            }
        }
        Commands::Whoami => match app.session.current_user() {
            Some(user) => println!("{} (since {})", user.email, user.signed_in_at),
            None => info("Not signed in."),
        },
        _ => {}
    }

    Ok(())
}
