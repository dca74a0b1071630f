use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Work-shift label of a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Jornada {
    #[default]
    #[serde(rename = "Mañana", alias = "Manana")]
    Manana,
    #[serde(rename = "Tarde")]
    Tarde,
    #[serde(rename = "Noche")]
    Noche,
}

impl Jornada {
    pub fn label(&self) -> &'static str {
        match self {
            Jornada::Manana => "Mañana",
            Jornada::Tarde => "Tarde",
            Jornada::Noche => "Noche",
        }
    }

    /// Accepts the stored label, its ASCII spelling, an English name or the initial.
    pub fn from_code(code: &str) -> AppResult<Self> {
        match code.trim().to_lowercase().as_str() {
            "mañana" | "manana" | "morning" | "m" => Ok(Jornada::Manana),
            "tarde" | "afternoon" | "t" => Ok(Jornada::Tarde),
            "noche" | "night" | "n" => Ok(Jornada::Noche),
            _ => Err(AppError::InvalidJornada(code.to_string())),
        }
    }
}

impl fmt::Display for Jornada {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
