//! CRUD façade over the `plataformas` collection.

use super::audit;
use crate::errors::AppResult;
use crate::models::platform::{COLLECTION, Platform};
use crate::store::{Document, DocumentStore};
use serde_json::json;

pub struct PlatformRegistry<'a> {
    store: &'a dyn DocumentStore,
}

fn decode(doc: &Document) -> AppResult<Platform> {
    let mut p: Platform = doc.decode()?;
    p.id = doc.id.clone();
    Ok(p)
}

impl<'a> PlatformRegistry<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub fn create(&self, name: &str) -> AppResult<Platform> {
        let id = self.store.add(COLLECTION, &json!({ "nombre": name }))?;
        audit(
            self.store,
            "add",
            &format!("plataformas/{id}"),
            &format!("Platform '{name}' created"),
        );

        Ok(Platform {
            id,
            name: name.to_string(),
        })
    }

    pub fn fetch_all(&self) -> AppResult<Vec<Platform>> {
        self.store.list(COLLECTION)?.iter().map(decode).collect()
    }

    pub fn get(&self, id: &str) -> AppResult<Option<Platform>> {
        self.store.get(COLLECTION, id)?.as_ref().map(decode).transpose()
    }

    pub fn update(&self, id: &str, name: &str) -> AppResult<()> {
        let mut fields = serde_json::Map::new();
        fields.insert("nombre".into(), name.into());

        self.store.update(COLLECTION, id, &fields)?;
        audit(
            self.store,
            "edit",
            &format!("plataformas/{id}"),
            &format!("Platform renamed to '{name}'"),
        );
        Ok(())
    }

    pub fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete(COLLECTION, id)?;
        audit(self.store, "del", &format!("plataformas/{id}"), "Platform deleted");
        Ok(())
    }
}
