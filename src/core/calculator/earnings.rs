//! Earnings arithmetic over shifts.

use crate::models::shift::{Earnings, Shift};
use crate::models::timestamp::Timestamp;

/// Sum of amounts per platform across `shifts`.
pub fn by_platform<'a, I>(shifts: I) -> Earnings
where
    I: IntoIterator<Item = &'a Shift>,
{
    let mut out = Earnings::new();
    for shift in shifts {
        for (platform, amount) in &shift.earnings {
            *out.entry(platform.clone()).or_insert(0.0) += amount;
        }
    }
    out
}

/// Shifts lying entirely inside `[from, to]`. Open bounds are unbounded.
pub fn within(shifts: &[Shift], from: Option<Timestamp>, to: Option<Timestamp>) -> Vec<&Shift> {
    shifts.iter().filter(|s| s.within(from, to)).collect()
}

pub fn total<'a, I>(shifts: I) -> f64
where
    I: IntoIterator<Item = &'a Shift>,
{
    shifts.into_iter().map(Shift::total).sum()
}

/// Worked time in minutes, open shifts count as zero.
pub fn worked_minutes<'a, I>(shifts: I) -> i64
where
    I: IntoIterator<Item = &'a Shift>,
{
    shifts
        .into_iter()
        .filter(|s| s.finished)
        .map(|s| s.duration().num_minutes())
        .sum()
}
