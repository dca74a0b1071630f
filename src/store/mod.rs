//! Document store seam.
//!
//! Records are schema-less JSON documents grouped in named collections and
//! addressed by a string id. `SqliteStore` keeps them in the local database;
//! the registries in `core` only see the `DocumentStore` trait.

pub mod sqlite;

use crate::errors::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use sqlite::SqliteStore;

pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    pub fn decode<T: DeserializeOwned>(&self) -> AppResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

pub trait DocumentStore {
    /// Insert a document and return the id the store assigned to it.
    fn add(&self, collection: &str, data: &Value) -> AppResult<String>;

    /// Create or replace the document at `id`.
    fn set(&self, collection: &str, id: &str, data: &Value) -> AppResult<()>;

    fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>>;

    /// Every document of the collection, in store order.
    fn list(&self, collection: &str) -> AppResult<Vec<Document>>;

    /// Merge `fields` into an existing document.
    /// Fails with `NotFound` when the document does not exist.
    fn update(&self, collection: &str, id: &str, fields: &Fields) -> AppResult<()>;

    /// Fails with `NotFound` when the document does not exist.
    fn delete(&self, collection: &str, id: &str) -> AppResult<()>;

    /// Append an entry to the store's operation log.
    fn log(&self, operation: &str, target: &str, message: &str) -> AppResult<()>;

    /// Documents whose top-level `field` equals `value`.
    fn find_eq(&self, collection: &str, field: &str, value: &Value) -> AppResult<Vec<Document>> {
        Ok(self
            .list(collection)?
            .into_iter()
            .filter(|d| d.data.get(field) == Some(value))
            .collect())
    }

    fn count(&self, collection: &str) -> AppResult<usize> {
        Ok(self.list(collection)?.len())
    }
}

/// Serialize a record into the top-level field map of a document.
pub fn to_fields<T: Serialize>(value: &T) -> AppResult<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Other(format!(
            "expected an object document, got {}",
            other
        ))),
    }
}

/// Fetch a document and decode it, mapping a missing id to `NotFound`.
pub fn get_required<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
) -> AppResult<T> {
    store
        .get(collection, id)?
        .ok_or_else(|| AppError::not_found(collection, id))?
        .decode()
}
