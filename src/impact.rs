//! Cascading impact of a cell edit.
//!
//! When the user edits one cell, the grid highlights every other cell
//! whose constraint evaluation could change. Three reasons exist, with a
//! fixed colour-resolution priority: `sequence` (same staff, ±2 days)
//! beats `juhu` (same staff, every juhu weekday) beats `staffing` (other
//! staff, same date).

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::dates;
use crate::models::{Schedule, Staff};

/// Why a cell would be reconsidered after the target edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactReason {
    /// Same date, other staff: the edit changes that day's coverage.
    Staffing,
    /// Same staff, ±2 days: transition/streak windows overlap the edit.
    Sequence,
    /// Same staff, juhu weekday elsewhere in the period.
    Juhu,
}

impl ImpactReason {
    /// Colour-resolution priority (higher wins a collision).
    fn priority(self) -> u8 {
        match self {
            ImpactReason::Sequence => 3,
            ImpactReason::Juhu => 2,
            ImpactReason::Staffing => 1,
        }
    }
}

/// One impacted cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactRecord {
    pub staff_id: String,
    pub date: NaiveDate,
    pub reason: ImpactReason,
}

/// Computes every cell the constraint engine would reconsider if the
/// target cell changed. The dense list may name a cell more than once
/// (under different reasons); [`fold_impact_map`] resolves collisions.
pub fn cell_impacts(
    schedule: &Schedule,
    staff: &[Staff],
    target_staff: &str,
    target_date: NaiveDate,
) -> Vec<ImpactRecord> {
    let mut records = Vec::new();
    if !schedule.contains(target_date) {
        return records;
    }

    // Coverage: every other row on the same date.
    for s in staff {
        if s.id != target_staff {
            records.push(ImpactRecord {
                staff_id: s.id.clone(),
                date: target_date,
                reason: ImpactReason::Staffing,
            });
        }
    }

    // Sequence windows: the same row, two days either side.
    for offset in -2..=2i64 {
        if offset == 0 {
            continue;
        }
        let date = dates::add_days(target_date, offset);
        if schedule.contains(date) {
            records.push(ImpactRecord {
                staff_id: target_staff.to_string(),
                date,
                reason: ImpactReason::Sequence,
            });
        }
    }

    // Juhu: every other occurrence of the staff member's juhu weekday.
    if let Some(juhu) = schedule.juhu_day(target_staff) {
        for date in dates::period_dates(schedule.start_date) {
            if date != target_date && dates::day_of_week(date) == juhu {
                records.push(ImpactRecord {
                    staff_id: target_staff.to_string(),
                    date,
                    reason: ImpactReason::Juhu,
                });
            }
        }
    }

    records
}

/// Folds a dense impact list into one reason per cell, keeping the
/// highest-priority reason on collision. The UI consumes this map for
/// visualization only.
pub fn fold_impact_map(records: &[ImpactRecord]) -> HashMap<(String, NaiveDate), ImpactReason> {
    let mut map: HashMap<(String, NaiveDate), ImpactReason> = HashMap::new();
    for r in records {
        map.entry((r.staff_id.clone(), r.date))
            .and_modify(|existing| {
                if r.reason.priority() > existing.priority() {
                    *existing = r.reason;
                }
            })
            .or_insert(r.reason);
    }
    map
}
