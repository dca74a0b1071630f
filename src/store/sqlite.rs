use super::{Document, DocumentStore, Fields};
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;

/// Document store backed by the `documents` table.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// 20 lowercase hex chars, same length as hosted auto-ids.
    fn new_id(&self) -> AppResult<String> {
        let id: String = self
            .conn
            .query_row("SELECT lower(hex(randomblob(10)))", [], |row| row.get(0))?;
        Ok(id)
    }

    fn load_raw(&self, collection: &str, id: &str) -> AppResult<Option<String>> {
        let raw = self
            .conn
            .prepare_cached("SELECT data FROM documents WHERE collection = ?1 AND id = ?2")?
            .query_row(params![collection, id], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(raw)
    }
}

impl DocumentStore for SqliteStore<'_> {
    fn add(&self, collection: &str, data: &Value) -> AppResult<String> {
        let id = self.new_id()?;
        let now = Local::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO documents (collection, id, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![collection, id, data.to_string(), now],
        )?;

        Ok(id)
    }

    fn set(&self, collection: &str, id: &str, data: &Value) -> AppResult<()> {
        let now = Local::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO documents (collection, id, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(collection, id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
            params![collection, id, data.to_string(), now],
        )?;

        Ok(())
    }

    fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        match self.load_raw(collection, id)? {
            Some(raw) => Ok(Some(Document {
                id: id.to_string(),
                data: serde_json::from_str(&raw)?,
            })),
            None => Ok(None),
        }
    }

    fn list(&self, collection: &str) -> AppResult<Vec<Document>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, data FROM documents
             WHERE collection = ?1
             ORDER BY rowid ASC",
        )?;

        let rows = stmt.query_map([collection], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut out = Vec::new();
        for r in rows {
            let (id, raw) = r?;
            out.push(Document {
                id,
                data: serde_json::from_str(&raw)?,
            });
        }
        Ok(out)
    }

    fn update(&self, collection: &str, id: &str, fields: &Fields) -> AppResult<()> {
        let raw = self
            .load_raw(collection, id)?
            .ok_or_else(|| AppError::not_found(collection, id))?;

        let mut data: Value = serde_json::from_str(&raw)?;
        let obj = data
            .as_object_mut()
            .ok_or_else(|| AppError::Other(format!("document {collection}/{id} is not an object")))?;

        for (k, v) in fields {
            obj.insert(k.clone(), v.clone());
        }

        self.conn.execute(
            "UPDATE documents SET data = ?1, updated_at = ?2
             WHERE collection = ?3 AND id = ?4",
            params![data.to_string(), Local::now().to_rfc3339(), collection, id],
        )?;

        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let n = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;

        if n == 0 {
            return Err(AppError::not_found(collection, id));
        }
        Ok(())
    }

    fn log(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(self.conn, operation, target, message)
    }

    fn count(&self, collection: &str) -> AppResult<usize> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            [collection],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }
}
