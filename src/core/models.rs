//! CRUD façade over the `modelos` collection.

use super::audit;
use crate::errors::{AppError, AppResult};
use crate::models::model::{COLLECTION, Model, ModelPatch, NewModel};
use crate::store::{DocumentStore, get_required, to_fields};
use serde_json::{Value, json};

/// Counter document holding the highest model id ever assigned.
const COUNTER_COLLECTION: &str = "meta";
const COUNTER_FIELD: &str = "ultimoId";

pub struct ModelRegistry<'a> {
    store: &'a dyn DocumentStore,
}

/// Model ids are numeric; anything else can never match a document.
pub fn parse_model_id(id: &str) -> AppResult<u32> {
    id.trim()
        .parse()
        .map_err(|_| AppError::InvalidModelId(id.to_string()))
}

impl<'a> ModelRegistry<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub(crate) fn save(&self, model: &Model) -> AppResult<()> {
        let data = Value::Object(to_fields(model)?);
        self.store.set(COLLECTION, &model.doc_id(), &data)
    }

    fn last_assigned_id(&self) -> AppResult<u32> {
        let recorded = self
            .store
            .get(COUNTER_COLLECTION, COLLECTION)?
            .and_then(|d| d.data.get(COUNTER_FIELD).and_then(Value::as_u64))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0);
        let stored = self.fetch_all()?.iter().map(|m| m.id).max().unwrap_or(0);
        Ok(recorded.max(stored))
    }

    /// Reserve the next numeric id. The counter never goes down, so the id
    /// of a deleted model is never handed out again.
    fn next_id(&self) -> AppResult<u32> {
        let next = self
            .last_assigned_id()?
            .checked_add(1)
            .ok_or_else(|| AppError::Other("model id space exhausted".to_string()))?;
        self.store.set(
            COUNTER_COLLECTION,
            COLLECTION,
            &json!({ COUNTER_FIELD: next }),
        )?;
        Ok(next)
    }

    /// Id the next created model will receive, without reserving it.
    pub fn peek_next_id(&self) -> AppResult<u32> {
        Ok(self.last_assigned_id()?.saturating_add(1))
    }

    pub fn create(&self, new: NewModel) -> AppResult<Model> {
        let model = Model {
            id: self.next_id()?,
            name: new.name,
            username: new.username,
            jornada: new.jornada,
            platforms: Vec::new(),
            shifts: Vec::new(),
            earnings: Vec::new(),
        };

        self.save(&model)?;
        audit(
            self.store,
            "add",
            &format!("modelos/{}", model.id),
            &format!("Model '{}' created", model.name),
        );
        Ok(model)
    }

    pub fn fetch_all(&self) -> AppResult<Vec<Model>> {
        let mut models = self
            .store
            .list(COLLECTION)?
            .iter()
            .map(|d| d.decode())
            .collect::<AppResult<Vec<Model>>>()?;
        models.sort_by_key(|m| m.id);
        Ok(models)
    }

    pub fn get(&self, id: u32) -> AppResult<Model> {
        get_required(self.store, COLLECTION, &id.to_string())
    }

    /// Usernames are not unique; every model logged in under `username`.
    pub fn find_all_by_username(&self, username: &str) -> AppResult<Vec<Model>> {
        let wanted = Value::String(username.trim().to_string());
        self.store
            .find_eq(COLLECTION, "username", &wanted)?
            .iter()
            .map(|d| d.decode())
            .collect()
    }

    /// Overwrite the provided fields; collections are left untouched.
    pub fn update(&self, id: u32, patch: ModelPatch) -> AppResult<Model> {
        let mut model = self.get(id)?;

        if let Some(name) = patch.name {
            model.name = name;
        }
        if let Some(username) = patch.username {
            model.username = username;
        }
        if let Some(jornada) = patch.jornada {
            model.jornada = jornada;
        }

        self.save(&model)?;
        audit(
            self.store,
            "edit",
            &format!("modelos/{id}"),
            &format!("Model '{}' updated", model.name),
        );
        Ok(model)
    }

    pub fn delete(&self, id: u32) -> AppResult<()> {
        self.store.delete(COLLECTION, &id.to_string())?;
        audit(self.store, "del", &format!("modelos/{id}"), "Model deleted");
        Ok(())
    }

    pub fn attach_platform(&self, id: u32, platform_id: &str) -> AppResult<Model> {
        let mut model = self.get(id)?;
        if !model.platforms.iter().any(|p| p == platform_id) {
            model.platforms.push(platform_id.to_string());
            self.save(&model)?;
            audit(
                self.store,
                "edit",
                &format!("modelos/{id}"),
                &format!("Platform {platform_id} attached"),
            );
        }
        Ok(model)
    }

    pub fn detach_platform(&self, id: u32, platform_id: &str) -> AppResult<Model> {
        let mut model = self.get(id)?;
        let before = model.platforms.len();
        model.platforms.retain(|p| p != platform_id);

        if model.platforms.len() != before {
            self.save(&model)?;
            audit(
                self.store,
                "edit",
                &format!("modelos/{id}"),
                &format!("Platform {platform_id} detached"),
            );
        }
        Ok(model)
    }
}
