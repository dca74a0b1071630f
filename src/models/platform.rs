use serde::{Deserialize, Serialize};

pub const COLLECTION: &str = "plataformas";

/// A revenue source. The id is assigned by the store and is not part of the
/// document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
}
