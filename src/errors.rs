//! Unified application error type.
//! All modules (db, store, auth, router, core, cli) return AppError to keep
//! the error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database / document store
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Malformed document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("No document '{id}' in collection '{collection}'")]
    NotFound { collection: String, id: String },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid earnings entry: {0}")]
    InvalidEarnings(String),

    #[error("Invalid jornada: {0}")]
    InvalidJornada(String),

    #[error("Invalid model id: {0}")]
    InvalidModelId(String),

    // ---------------------------
    // Authentication / navigation
    // ---------------------------
    #[error("Authentication required: redirected to {redirect}")]
    AuthRequired { redirect: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {0} characters long")]
    WeakPassword(usize),

    #[error("A user with email '{0}' already exists")]
    UserExists(String),

    #[error("No route matches '{0}'")]
    RouteNotFound(String),

    // ---------------------------
    // Shift logic errors
    // ---------------------------
    #[error("Shift {0} is already finished")]
    ShiftFinished(String),

    #[error("Shift end {end} is before its start {start}")]
    InvalidShiftRange { start: String, end: String },

    #[error("No open shift for model '{0}'")]
    NoOpenShift(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        AppError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
