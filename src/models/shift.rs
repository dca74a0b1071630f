use super::timestamp::Timestamp;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const COLLECTION: &str = "turnos";

/// Earnings of a single shift, keyed by platform.
pub type Earnings = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "finalizado", default)]
    pub finished: bool,
    #[serde(rename = "desde")]
    pub start: Timestamp,
    #[serde(rename = "hasta")]
    pub end: Timestamp,
    #[serde(rename = "ganancias", default)]
    pub earnings: Earnings,
    /// Document id of the owning model.
    #[serde(rename = "modelo")]
    pub model: String,
}

impl Shift {
    /// A freshly opened shift: start and end coincide until it is closed.
    pub fn open(model: &str, at: Timestamp) -> Self {
        Self {
            id: String::new(),
            finished: false,
            start: at,
            end: at,
            earnings: Earnings::new(),
            model: model.to_string(),
        }
    }

    pub fn is_open(&self) -> bool {
        !self.finished
    }

    pub fn total(&self) -> f64 {
        self.earnings.values().sum()
    }

    pub fn duration(&self) -> chrono::Duration {
        self.start.until(&self.end).max(chrono::Duration::zero())
    }

    /// Earnings per hour, or `None` for a zero-length shift.
    pub fn hourly_rate(&self) -> Option<f64> {
        let secs = self.duration().num_seconds();
        if secs <= 0 {
            return None;
        }
        Some(self.total() / (secs as f64 / 3600.0))
    }

    /// `true` when the whole shift lies inside `[from, to]`.
    pub fn within(&self, from: Option<Timestamp>, to: Option<Timestamp>) -> bool {
        from.is_none_or(|f| self.start >= f) && to.is_none_or(|t| self.end <= t)
    }

    pub fn check_range(start: Timestamp, end: Timestamp) -> AppResult<()> {
        if end < start {
            return Err(AppError::InvalidShiftRange {
                start: start.format("%Y-%m-%d %H:%M"),
                end: end.format("%Y-%m-%d %H:%M"),
            });
        }
        Ok(())
    }
}

/// Partial overwrite of a shift. `None` keeps the stored value; earnings are
/// merged key by key.
#[derive(Debug, Clone, Default)]
pub struct ShiftPatch {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub earnings: Earnings,
}

/// Parse `platform=amount` pairs given on the command line.
pub fn parse_earnings(entries: &[String]) -> AppResult<Earnings> {
    let mut out = Earnings::new();

    for entry in entries {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| AppError::InvalidEarnings(entry.clone()))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::InvalidEarnings(entry.clone()));
        }

        let amount: f64 = value
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidEarnings(entry.clone()))?;

        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::InvalidEarnings(entry.clone()));
        }

        *out.entry(key.to_string()).or_insert(0.0) += amount;
    }

    Ok(out)
}
