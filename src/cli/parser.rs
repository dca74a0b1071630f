use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftdesk
/// Back office for models, their shifts and per-platform earnings
#[derive(Parser)]
#[command(
    name = "shiftdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track models, their shifts and per-platform earnings using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign in
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Navigate to a route and render its view (e.g. /modelos/3)
    Open {
        path: String,
    },

    /// Manage platforms
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },

    /// Manage models
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Manage shifts
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// Close your own open shift (no sign-in required)
    Finish {
        #[arg(long)]
        username: String,

        /// End time (YYYY-MM-DD HH:MM or "now")
        #[arg(long, default_value = "now")]
        at: String,

        /// Earnings as PLATFORM=AMOUNT, repeatable
        #[arg(long = "earn", value_name = "PLATFORM=AMOUNT")]
        earn: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum PlatformAction {
    /// Create a platform
    Add { name: String },

    /// List every platform
    List,

    /// Rename a platform
    Edit { id: String, name: String },

    /// Delete a platform
    Del { id: String },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// Create a model
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        username: String,

        /// Mañana, Tarde or Noche (default from config)
        #[arg(long)]
        jornada: Option<String>,
    },

    /// List every model
    List,

    /// Show a model with its shifts and earnings
    Show { id: String },

    /// Edit a model
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        jornada: Option<String>,

        /// Platform id to attach, repeatable
        #[arg(long = "add-platform", value_name = "PLATFORM_ID")]
        add_platform: Vec<String>,

        /// Platform id to detach, repeatable
        #[arg(long = "remove-platform", value_name = "PLATFORM_ID")]
        remove_platform: Vec<String>,
    },

    /// Delete a model
    Del { id: String },
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Open a shift for a model
    Start {
        model: String,

        /// Start time (YYYY-MM-DD HH:MM or "now")
        #[arg(long, default_value = "now")]
        at: String,
    },

    /// Record a finished shift in one step
    Add {
        model: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        /// Earnings as PLATFORM=AMOUNT, repeatable
        #[arg(long = "earn", value_name = "PLATFORM=AMOUNT")]
        earn: Vec<String>,
    },

    /// Close an open shift
    Close {
        id: String,

        #[arg(long, default_value = "now")]
        at: String,

        #[arg(long = "earn", value_name = "PLATFORM=AMOUNT")]
        earn: Vec<String>,
    },

    /// Show one shift
    Show { id: String },

    /// List shifts, optionally for one model and inside a time window
    List {
        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Edit times or earnings of a shift
    Edit {
        id: String,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,

        #[arg(long = "earn", value_name = "PLATFORM=AMOUNT")]
        earn: Vec<String>,
    },

    /// Delete a shift
    Del { id: String },
}

impl Commands {
    /// Route each command navigates to before it runs. `None` for
    /// maintenance commands that do not touch the records.
    pub fn route_path(&self) -> Option<String> {
        let path = match self {
            Commands::Init
            | Commands::Config { .. }
            | Commands::Db { .. }
            | Commands::Log { .. } => return None,

            Commands::Signup { .. }
            | Commands::Login { .. }
            | Commands::Logout
            | Commands::Whoami => "/login".to_string(),

            Commands::Open { path } => path.clone(),

            Commands::Platform { .. } => "/plataformas".to_string(),

            Commands::Model { action } => match action {
                ModelAction::Add { .. } => "/modelos/create".to_string(),
                ModelAction::List => "/modelos".to_string(),
                ModelAction::Show { id } | ModelAction::Del { id } => format!("/modelos/{id}"),
                ModelAction::Edit { id, .. } => format!("/modelos/edit/{id}"),
            },

            Commands::Shift { action } => match action {
                ShiftAction::Start { model, .. } | ShiftAction::Add { model, .. } => {
                    format!("/modelos/{model}")
                }
                ShiftAction::List { .. } => "/modelos".to_string(),
                ShiftAction::Close { id, .. }
                | ShiftAction::Show { id }
                | ShiftAction::Edit { id, .. }
                | ShiftAction::Del { id } => format!("/turnos/{id}"),
            },

            Commands::Finish { .. } => "/finalizar".to_string(),
        };
        Some(path)
    }
}
