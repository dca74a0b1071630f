//! Shift ledger over the `turnos` collection.
//!
//! A shift is opened with `start` (start and end coincide, not finished) and
//! closed with `finish`, which fixes the end time and copies the earnings
//! onto the owning model. `record` stores an already closed shift in one
//! step.

use super::audit;
use super::models::ModelRegistry;
use crate::errors::{AppError, AppResult};
use crate::models::model::{EarningRecord, Model};
use crate::models::shift::{COLLECTION, Earnings, Shift, ShiftPatch};
use crate::models::timestamp::Timestamp;
use crate::store::{Document, DocumentStore, get_required, to_fields};
use serde_json::Value;

pub struct ShiftLedger<'a> {
    store: &'a dyn DocumentStore,
    models: ModelRegistry<'a>,
}

fn decode(doc: &Document) -> AppResult<Shift> {
    let mut s: Shift = doc.decode()?;
    s.id = doc.id.clone();
    Ok(s)
}

fn earning_records(shift_id: &str, earnings: &Earnings) -> Vec<EarningRecord> {
    earnings
        .iter()
        .map(|(platform, amount)| EarningRecord {
            shift: shift_id.to_string(),
            platform: platform.clone(),
            amount: *amount,
        })
        .collect()
}

/// Replace the earnings lines of `shift_id` on the model with `earnings`.
fn sync_model_earnings(model: &mut Model, shift_id: &str, earnings: &Earnings) {
    model.earnings.retain(|e| e.shift != shift_id);
    model.earnings.extend(earning_records(shift_id, earnings));
}

impl<'a> ShiftLedger<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            models: ModelRegistry::new(store),
        }
    }

    fn insert(&self, shift: &Shift) -> AppResult<String> {
        let data = Value::Object(to_fields(shift)?);
        self.store.add(COLLECTION, &data)
    }

    fn save(&self, shift: &Shift) -> AppResult<()> {
        let data = Value::Object(to_fields(shift)?);
        self.store.set(COLLECTION, &shift.id, &data)
    }

    /// Copy the shift's earnings onto its model. A shift whose model was
    /// deleted is left as it is.
    fn sync_owner(&self, shift: &Shift) -> AppResult<()> {
        match self.model_of(shift) {
            Ok(mut model) => {
                sync_model_earnings(&mut model, &shift.id, &shift.earnings);
                self.models.save(&model)
            }
            Err(AppError::NotFound { .. }) | Err(AppError::InvalidModelId(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub fn start(&self, model_id: u32, at: Timestamp) -> AppResult<Shift> {
        let mut model = self.models.get(model_id)?;

        let mut shift = Shift::open(&model.doc_id(), at);
        shift.id = self.insert(&shift)?;

        model.shifts.push(shift.id.clone());
        self.models.save(&model)?;

        audit(
            self.store,
            "add",
            &format!("turnos/{}", shift.id),
            &format!("Shift opened for model {}", model.id),
        );
        Ok(shift)
    }

    pub fn record(
        &self,
        model_id: u32,
        start: Timestamp,
        end: Timestamp,
        earnings: Earnings,
    ) -> AppResult<Shift> {
        Shift::check_range(start, end)?;
        let mut model = self.models.get(model_id)?;

        let mut shift = Shift {
            id: String::new(),
            finished: true,
            start,
            end,
            earnings,
            model: model.doc_id(),
        };
        shift.id = self.insert(&shift)?;

        model.shifts.push(shift.id.clone());
        sync_model_earnings(&mut model, &shift.id, &shift.earnings);
        self.models.save(&model)?;

        audit(
            self.store,
            "add",
            &format!("turnos/{}", shift.id),
            &format!("Shift recorded for model {} ({:.2})", model.id, shift.total()),
        );
        Ok(shift)
    }

    pub fn finish(&self, shift_id: &str, at: Timestamp, earnings: Earnings) -> AppResult<Shift> {
        let mut shift = self.get(shift_id)?;
        if shift.finished {
            return Err(AppError::ShiftFinished(shift.id));
        }
        Shift::check_range(shift.start, at)?;

        shift.end = at;
        shift.finished = true;
        for (platform, amount) in earnings {
            *shift.earnings.entry(platform).or_insert(0.0) += amount;
        }
        self.save(&shift)?;

        self.sync_owner(&shift)?;

        audit(
            self.store,
            "edit",
            &format!("turnos/{}", shift.id),
            &format!("Shift finished ({:.2})", shift.total()),
        );
        Ok(shift)
    }

    /// Close the latest open shift among the models logged in as `username`.
    pub fn finish_for_username(
        &self,
        username: &str,
        at: Timestamp,
        earnings: Earnings,
    ) -> AppResult<Shift> {
        let models = self.models.find_all_by_username(username)?;
        if models.is_empty() {
            return Err(AppError::not_found(
                crate::models::model::COLLECTION,
                username,
            ));
        }

        let mut latest: Option<Shift> = None;
        for model in &models {
            for shift in self.fetch_for_model(model.id)? {
                if shift.is_open() && latest.as_ref().is_none_or(|l| shift.start > l.start) {
                    latest = Some(shift);
                }
            }
        }

        let open = latest.ok_or_else(|| AppError::NoOpenShift(username.trim().to_string()))?;
        self.finish(&open.id, at, earnings)
    }

    pub fn get(&self, id: &str) -> AppResult<Shift> {
        let mut shift: Shift = get_required(self.store, COLLECTION, id)?;
        shift.id = id.to_string();
        Ok(shift)
    }

    pub fn fetch_all(&self) -> AppResult<Vec<Shift>> {
        let mut shifts = self
            .store
            .list(COLLECTION)?
            .iter()
            .map(decode)
            .collect::<AppResult<Vec<_>>>()?;
        shifts.sort_by_key(|s| s.start);
        Ok(shifts)
    }

    /// Shifts of one model, ordered by start time.
    pub fn fetch_for_model(&self, model_id: u32) -> AppResult<Vec<Shift>> {
        let owner = Value::String(model_id.to_string());
        let mut shifts = self
            .store
            .find_eq(COLLECTION, "modelo", &owner)?
            .iter()
            .map(decode)
            .collect::<AppResult<Vec<_>>>()?;
        shifts.sort_by_key(|s| s.start);
        Ok(shifts)
    }

    pub fn open_shifts(&self) -> AppResult<Vec<Shift>> {
        Ok(self.fetch_all()?.into_iter().filter(Shift::is_open).collect())
    }

    pub fn update(&self, id: &str, patch: ShiftPatch) -> AppResult<Shift> {
        let mut shift = self.get(id)?;

        let start = patch.start.unwrap_or(shift.start);
        let end = match patch.end {
            Some(end) => end,
            // An open shift keeps start and end together.
            None if shift.is_open() => start,
            None => shift.end,
        };
        Shift::check_range(start, end)?;

        shift.start = start;
        shift.end = end;
        let earnings_changed = !patch.earnings.is_empty();
        shift.earnings.extend(patch.earnings);
        self.save(&shift)?;

        if earnings_changed && shift.finished {
            self.sync_owner(&shift)?;
        }

        audit(self.store, "edit", &format!("turnos/{id}"), "Shift updated");
        Ok(shift)
    }

    pub fn delete(&self, id: &str) -> AppResult<()> {
        let shift = self.get(id)?;
        self.store.delete(COLLECTION, id)?;

        if let Ok(mut model) = self.model_of(&shift) {
            model.shifts.retain(|s| s != id);
            model.earnings.retain(|e| e.shift != id);
            self.models.save(&model)?;
        }

        audit(self.store, "del", &format!("turnos/{id}"), "Shift deleted");
        Ok(())
    }

    pub fn model_of(&self, shift: &Shift) -> AppResult<Model> {
        let id = super::models::parse_model_id(&shift.model)?;
        self.models.get(id)
    }
}
