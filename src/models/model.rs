use super::jornada::Jornada;
use serde::{Deserialize, Serialize};

pub const COLLECTION: &str = "modelos";

/// One earnings line kept on the model: what a platform paid during a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningRecord {
    #[serde(rename = "turno")]
    pub shift: String,
    #[serde(rename = "plataforma")]
    pub platform: String,
    #[serde(rename = "monto")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(rename = "idModelo")]
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
    pub username: String,
    pub jornada: Jornada,
    /// Platform ids the model works on.
    #[serde(rename = "plataformas", default)]
    pub platforms: Vec<String>,
    /// Shift ids, in creation order.
    #[serde(rename = "turnos", default)]
    pub shifts: Vec<String>,
    #[serde(rename = "ganancias", default)]
    pub earnings: Vec<EarningRecord>,
}

impl Model {
    /// Document id under which the model is stored.
    pub fn doc_id(&self) -> String {
        self.id.to_string()
    }

    pub fn total_earnings(&self) -> f64 {
        self.earnings.iter().map(|e| e.amount).sum()
    }
}

/// Fields supplied when creating a model; the numeric id is assigned on insert.
#[derive(Debug, Clone)]
pub struct NewModel {
    pub name: String,
    pub username: String,
    pub jornada: Jornada,
}

/// Partial overwrite of a model. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ModelPatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub jornada: Option<Jornada>,
}

impl ModelPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.username.is_none() && self.jornada.is_none()
    }
}
