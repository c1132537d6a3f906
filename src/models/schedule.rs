//! Schedule (roster period) model.
//!
//! A schedule is one 28-day grid of shift assignments plus the optional
//! solver-assigned weekly legal off-day (주휴일) per staff member. The
//! grid is dense *enough*: unassigned cells are legal and most
//! constraints treat them as chain breakers.
//!
//! # Invariant
//! Every assignment date lies in the half-open period
//! `[start_date, start_date + 28)`. Mutators silently drop out-of-period
//! dates rather than erroring (ill-formed data degrades, never throws).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ShiftAssignment, ShiftType};
use crate::dates;

/// A 28-day roster period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Schedule identifier.
    pub id: String,
    /// Display name (e.g. "2025년 1월 근무표").
    pub name: String,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Filled cells. Not every `(staff, date)` pair need be present.
    pub assignments: Vec<ShiftAssignment>,
    /// Weekly legal off-day per staff (0=Sunday). Assigned by the external
    /// generator; the engine only reads it.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub staff_juhu_days: HashMap<String, u8>,
}

impl Schedule {
    /// Creates an empty schedule starting at the given date.
    pub fn new(id: impl Into<String>, name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date,
            assignments: Vec::new(),
            staff_juhu_days: HashMap::new(),
        }
    }

    /// Builder: adds an assignment (dropped if outside the period).
    pub fn with_assignment(mut self, assignment: ShiftAssignment) -> Self {
        self.upsert(assignment);
        self
    }

    /// Builder: sets a staff member's weekly legal off-day (0=Sunday).
    pub fn with_juhu_day(mut self, staff_id: impl Into<String>, day: u8) -> Self {
        self.staff_juhu_days.insert(staff_id.into(), day % 7);
        self
    }

    /// Whether a date lies inside this schedule's period.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        dates::period_contains(self.start_date, date)
    }

    /// The weekly legal off-day for a staff member, if one is known.
    pub fn juhu_day(&self, staff_id: &str) -> Option<u8> {
        self.staff_juhu_days.get(staff_id).copied()
    }

    /// The assignment at a cell, if present.
    pub fn assignment_at(&self, staff_id: &str, date: NaiveDate) -> Option<&ShiftAssignment> {
        self.assignments
            .iter()
            .find(|a| a.staff_id == staff_id && a.date == date)
    }

    /// The shift at a cell, if assigned.
    pub fn shift_at(&self, staff_id: &str, date: NaiveDate) -> Option<ShiftType> {
        self.assignment_at(staff_id, date).map(|a| a.shift)
    }

    /// All assignments for one staff member, in grid order.
    pub fn assignments_for(&self, staff_id: &str) -> Vec<&ShiftAssignment> {
        let mut rows: Vec<&ShiftAssignment> = self
            .assignments
            .iter()
            .filter(|a| a.staff_id == staff_id)
            .collect();
        rows.sort_by_key(|a| a.date);
        rows
    }

    /// All assignments on one date.
    pub fn assignments_on(&self, date: NaiveDate) -> Vec<&ShiftAssignment> {
        self.assignments.iter().filter(|a| a.date == date).collect()
    }

    /// Inserts or replaces a cell. Out-of-period dates are dropped.
    ///
    /// Returns whether the assignment was accepted.
    pub fn upsert(&mut self, assignment: ShiftAssignment) -> bool {
        if !self.contains(assignment.date) {
            return false;
        }
        match self
            .assignments
            .iter_mut()
            .find(|a| a.staff_id == assignment.staff_id && a.date == assignment.date)
        {
            Some(cell) => *cell = assignment,
            None => self.assignments.push(assignment),
        }
        true
    }

    /// Clears a cell. Returns whether anything was removed.
    pub fn clear_cell(&mut self, staff_id: &str, date: NaiveDate) -> bool {
        let before = self.assignments.len();
        self.assignments
            .retain(|a| !(a.staff_id == staff_id && a.date == date));
        self.assignments.len() != before
    }

    /// Merges a generated assignment set over the current grid.
    ///
    /// Locked cells are preserved; every unlocked cell is overwritten by
    /// the generator's output (or cleared when the generator left it
    /// empty). Out-of-period generated dates are dropped.
    pub fn merge_generated(&mut self, generated: Vec<ShiftAssignment>) {
        let locked: Vec<ShiftAssignment> = self
            .assignments
            .iter()
            .filter(|a| a.locked)
            .cloned()
            .collect();

        self.assignments.clear();
        for a in generated {
            if !self.contains(a.date) {
                continue;
            }
            let is_locked_cell = locked
                .iter()
                .any(|l| l.staff_id == a.staff_id && l.date == a.date);
            if !is_locked_cell {
                self.assignments.push(a);
            }
        }
        self.assignments.extend(locked);
    }

    /// Locked cells, as sent to the generator.
    pub fn locked_assignments(&self) -> Vec<ShiftAssignment> {
        self.assignments.iter().filter(|a| a.locked).cloned().collect()
    }

    /// Starts a new period: drops all assignments and juhu days.
    pub fn reset(&mut self, start_date: NaiveDate) {
        self.start_date = start_date;
        self.assignments.clear();
        self.staff_juhu_days.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample() -> Schedule {
        Schedule::new("s-2025-01", "1월 근무표", d("2025-01-06"))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-06"), ShiftType::Day))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-07"), ShiftType::Night))
            .with_assignment(ShiftAssignment::new("s2", d("2025-01-06"), ShiftType::Evening))
    }

    #[test]
    fn test_cell_lookup() {
        let s = sample();
        assert_eq!(s.shift_at("s1", d("2025-01-07")), Some(ShiftType::Night));
        assert_eq!(s.shift_at("s1", d("2025-01-08")), None);
        assert_eq!(s.assignments_on(d("2025-01-06")).len(), 2);
        assert_eq!(s.assignments_for("s1").len(), 2);
    }

    #[test]
    fn test_upsert_replaces() {
        let mut s = sample();
        s.upsert(ShiftAssignment::new("s1", d("2025-01-06"), ShiftType::Off));
        assert_eq!(s.shift_at("s1", d("2025-01-06")), Some(ShiftType::Off));
        assert_eq!(s.assignments_for("s1").len(), 2);
    }

    #[test]
    fn test_upsert_rejects_out_of_period() {
        let mut s = sample();
        assert!(!s.upsert(ShiftAssignment::new("s1", d("2025-01-05"), ShiftType::Day)));
        assert!(!s.upsert(ShiftAssignment::new("s1", d("2025-02-03"), ShiftType::Day)));
        assert_eq!(s.assignments.len(), 3);
    }

    #[test]
    fn test_merge_preserves_locked() {
        let mut s = Schedule::new("s", "", d("2025-01-06")).with_assignment(
            ShiftAssignment::new("s1", d("2025-01-06"), ShiftType::Night).locked(),
        );
        s.upsert(ShiftAssignment::new("s1", d("2025-01-07"), ShiftType::Day));

        s.merge_generated(vec![
            ShiftAssignment::new("s1", d("2025-01-06"), ShiftType::Off),
            ShiftAssignment::new("s1", d("2025-01-08"), ShiftType::Evening),
        ]);

        // Locked cell kept its night shift; unlocked 01-07 was cleared by the
        // merge; the generated 01-08 landed.
        assert_eq!(s.shift_at("s1", d("2025-01-06")), Some(ShiftType::Night));
        assert_eq!(s.shift_at("s1", d("2025-01-07")), None);
        assert_eq!(s.shift_at("s1", d("2025-01-08")), Some(ShiftType::Evening));
    }

    #[test]
    fn test_merge_drops_out_of_period() {
        let mut s = Schedule::new("s", "", d("2025-01-06"));
        s.merge_generated(vec![ShiftAssignment::new(
            "s1",
            d("2025-01-05"),
            ShiftType::Day,
        )]);
        assert!(s.assignments.is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut s = sample().with_juhu_day("s1", 0);
        s.reset(d("2025-02-03"));
        assert!(s.assignments.is_empty());
        assert!(s.staff_juhu_days.is_empty());
        assert_eq!(s.start_date, d("2025-02-03"));
    }

    #[test]
    fn test_juhu_day_normalized() {
        let s = Schedule::new("s", "", d("2025-01-06")).with_juhu_day("s1", 8);
        assert_eq!(s.juhu_day("s1"), Some(1));
        assert_eq!(s.juhu_day("unknown"), None);
    }
}
