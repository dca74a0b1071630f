//! shiftdesk library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod router;
pub mod store;
pub mod ui;
pub mod utils;
pub mod views;

use app::App;
use auth::LocalAuth;
use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use db::initialize::init_db;
use db::pool::DbPool;
use errors::AppResult;
use store::SqliteStore;

/// Commands that need a navigation target go through the auth gate first.
pub fn dispatch(cli: &Cli, app: &mut App) -> AppResult<()> {
    let target = match cli.command.route_path() {
        Some(path) => Some(app.navigate(&path)?),
        None => None,
    };

    match &cli.command {
        Commands::Signup { .. } | Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            cli::commands::auth::handle(&cli.command, app)
        }
        Commands::Open { .. } => match &target {
            Some(t) => views::render(app, t),
            None => Ok(()),
        },
        Commands::Platform { action } => cli::commands::platform::handle(action, app),
        Commands::Model { action } => cli::commands::model::handle(action, app),
        Commands::Shift { action } => cli::commands::shift::handle(action, app),
        Commands::Finish { .. } => cli::commands::finish::handle(&cli.command, app),
        Commands::Init | Commands::Config { .. } | Commands::Db { .. } | Commands::Log { .. } => {
            Ok(())
        }
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load the configuration once
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    match &cli.command {
        Commands::Init => return cli::commands::init::handle(&cli),
        Commands::Config { .. } => return cli::commands::config::handle(&cli.command, &cfg),
        _ => {}
    }

    // Open the store; the schema is brought up to date on every start
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    match &cli.command {
        Commands::Db { .. } => return cli::commands::db::handle(&cli.command, &cfg, &pool),
        Commands::Log { .. } => return cli::commands::log::handle(&cli.command, &pool),
        _ => {}
    }

    let store = SqliteStore::new(&pool.conn);
    let auth = LocalAuth::new(&pool.conn);
    let mut app = App::new(&cfg, &store, &auth)?;

    dispatch(&cli, &mut app)
}
