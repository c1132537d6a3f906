//! Shared evaluation context.
//!
//! The immutable bundle handed to every constraint check: the schedule
//! snapshot, the staff roster, the config, the previous-period trail, and
//! aggregates computed once per evaluation (completeness, shift statistics,
//! a merged `(staff, date) → shift` lookup spanning the trail and the
//! current period). Constraints read it and return owned violations; no
//! shared state is ever mutated during an evaluation.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::dates;
use crate::models::{ConstraintConfig, Schedule, ShiftAssignment, ShiftType, Staff};
use crate::stats::ShiftStats;

/// Immutable per-evaluation snapshot.
#[derive(Debug)]
pub struct EvaluationContext<'a> {
    pub schedule: &'a Schedule,
    pub staff: &'a [Staff],
    pub config: &'a ConstraintConfig,
    /// Trailing days of the previous period, `[start − 7, start)`.
    pub previous_period_end: &'a [ShiftAssignment],
    /// `|assignments| / (|staff| × 28)`.
    pub completeness: f64,
    /// Aggregate tallies shared by coverage/count constraints.
    pub stats: ShiftStats,
    /// Merged lookup over trail + current period, per staff.
    shifts: HashMap<String, HashMap<NaiveDate, ShiftType>>,
}

impl<'a> EvaluationContext<'a> {
    /// Builds the context, computing the shared lookup map and statistics
    /// once. Trail entries outside `[start − 7, start)` are ignored.
    pub fn new(
        schedule: &'a Schedule,
        staff: &'a [Staff],
        config: &'a ConstraintConfig,
        previous_period_end: &'a [ShiftAssignment],
    ) -> Self {
        let mut shifts: HashMap<String, HashMap<NaiveDate, ShiftType>> = HashMap::new();

        for a in previous_period_end {
            if dates::trail_contains(schedule.start_date, a.date) {
                shifts
                    .entry(a.staff_id.clone())
                    .or_default()
                    .insert(a.date, a.shift);
            }
        }
        for a in &schedule.assignments {
            shifts
                .entry(a.staff_id.clone())
                .or_default()
                .insert(a.date, a.shift);
        }

        let stats = ShiftStats::calculate(schedule, staff);
        let completeness = stats.completeness;

        Self {
            schedule,
            staff,
            config,
            previous_period_end,
            completeness,
            stats,
            shifts,
        }
    }

    /// First day of the current period.
    #[inline]
    pub fn start_date(&self) -> NaiveDate {
        self.schedule.start_date
    }

    /// The shift at a cell, resolved across the trail and the current
    /// period. `None` for unassigned cells and out-of-window dates.
    pub fn shift_at(&self, staff_id: &str, date: NaiveDate) -> Option<ShiftType> {
        self.shifts
            .get(staff_id)
            .and_then(|row| row.get(&date))
            .copied()
    }

    /// Display name for a staff id (falls back to the id itself).
    pub fn staff_name<'b>(&self, staff_id: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.staff
            .iter()
            .find(|s| s.id == staff_id)
            .map(|s| s.name.as_str())
            .unwrap_or(staff_id)
    }

    /// The staff member's weekly legal off-day, if known.
    pub fn juhu_day(&self, staff_id: &str) -> Option<u8> {
        self.schedule.juhu_day(staff_id)
    }
}
