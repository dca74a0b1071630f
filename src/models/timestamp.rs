//! Store timestamps: a (seconds, nanoseconds) pair since the Unix epoch.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Input formats accepted from the command line (local time).
const INPUT_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl Timestamp {
    pub fn now() -> Self {
        Self::from_datetime(&Utc::now())
    }

    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanoseconds: dt.timestamp_subsec_nanos(),
        }
    }

    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds)
    }

    pub fn to_local(&self) -> Option<DateTime<Local>> {
        self.to_utc().map(|dt| dt.with_timezone(&Local))
    }

    /// Parse `now` or a local date-time such as `2025-03-01 18:30`.
    pub fn parse(input: &str) -> AppResult<Self> {
        let s = input.trim();
        if s.eq_ignore_ascii_case("now") {
            return Ok(Self::now());
        }

        let naive = INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))?;

        // DST gaps have no local mapping; overlaps take the earliest instant.
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))?;

        Ok(Self::from_datetime(&local))
    }

    pub fn parse_optional(input: Option<&String>) -> AppResult<Option<Self>> {
        input.map(|s| Self::parse(s)).transpose()
    }

    /// Signed duration from `self` to `later`.
    pub fn until(&self, later: &Timestamp) -> chrono::Duration {
        chrono::Duration::seconds(later.seconds - self.seconds)
            + chrono::Duration::nanoseconds(later.nanoseconds as i64 - self.nanoseconds as i64)
    }

    pub fn format(&self, fmt: &str) -> String {
        match self.to_local() {
            Some(dt) => dt.format(fmt).to_string(),
            None => format!("{}s", self.seconds),
        }
    }
}
