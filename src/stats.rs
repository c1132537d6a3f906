//! Shift statistics.
//!
//! Aggregate views computed once from a schedule and shared by the
//! constraint checks and the grid's summary columns: per-staff shift
//! tallies, per-date coverage counts, and the completeness ratio that
//! gates noisy constraints on partial schedules.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::dates::{self, PERIOD_DAYS};
use crate::models::{Schedule, ShiftType, Staff};

/// Per-staff shift tallies over one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaffShiftCounts {
    pub day: u32,
    pub evening: u32,
    pub night: u32,
    pub off: u32,
    /// Saturday/Sunday cells holding a working shift.
    pub weekend_work: u32,
}

impl StaffShiftCounts {
    /// Total assigned cells (working or off).
    pub fn assigned(&self) -> u32 {
        self.day + self.evening + self.night + self.off
    }

    /// Total working cells.
    pub fn work(&self) -> u32 {
        self.day + self.evening + self.night
    }
}

/// Headcount per working shift on one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyCounts {
    pub day: u32,
    pub evening: u32,
    pub night: u32,
}

impl DailyCounts {
    /// Count for one working shift kind.
    pub fn count_for(&self, shift: ShiftType) -> u32 {
        match shift {
            ShiftType::Day => self.day,
            ShiftType::Evening => self.evening,
            ShiftType::Night => self.night,
            ShiftType::Off => 0,
        }
    }
}

/// Aggregate statistics for one schedule snapshot.
#[derive(Debug, Clone, Default)]
pub struct ShiftStats {
    /// Tallies per staff id.
    pub per_staff: HashMap<String, StaffShiftCounts>,
    /// Coverage per date.
    pub per_date: HashMap<NaiveDate, DailyCounts>,
    /// `|assignments| / (|staff| × 28)`, clamped to [0, 1].
    pub completeness: f64,
}

impl ShiftStats {
    /// Computes all statistics in one pass over the assignments.
    pub fn calculate(schedule: &Schedule, staff: &[Staff]) -> Self {
        let mut per_staff: HashMap<String, StaffShiftCounts> = staff
            .iter()
            .map(|s| (s.id.clone(), StaffShiftCounts::default()))
            .collect();
        let mut per_date: HashMap<NaiveDate, DailyCounts> = HashMap::new();

        for a in &schedule.assignments {
            let counts = per_staff.entry(a.staff_id.clone()).or_default();
            match a.shift {
                ShiftType::Day => counts.day += 1,
                ShiftType::Evening => counts.evening += 1,
                ShiftType::Night => counts.night += 1,
                ShiftType::Off => counts.off += 1,
            }
            if a.shift.is_work() && dates::is_weekend(a.date) {
                counts.weekend_work += 1;
            }

            let daily = per_date.entry(a.date).or_default();
            match a.shift {
                ShiftType::Day => daily.day += 1,
                ShiftType::Evening => daily.evening += 1,
                ShiftType::Night => daily.night += 1,
                ShiftType::Off => {}
            }
        }

        Self {
            per_staff,
            per_date,
            completeness: completeness(schedule, staff.len()),
        }
    }

    /// Tallies for one staff member (zeroed when unknown).
    pub fn staff(&self, staff_id: &str) -> StaffShiftCounts {
        self.per_staff.get(staff_id).copied().unwrap_or_default()
    }

    /// Coverage on one date (zeroed when empty).
    pub fn on_date(&self, date: NaiveDate) -> DailyCounts {
        self.per_date.get(&date).copied().unwrap_or_default()
    }

    /// Mean weekend-work count across the given staff list.
    pub fn mean_weekend_work(&self, staff: &[Staff]) -> f64 {
        if staff.is_empty() {
            return 0.0;
        }
        let total: u32 = staff.iter().map(|s| self.staff(&s.id).weekend_work).sum();
        total as f64 / staff.len() as f64
    }
}

/// Fill ratio of the whole grid: `|assignments| / (|staff| × 28)`.
pub fn completeness(schedule: &Schedule, staff_count: usize) -> f64 {
    if staff_count == 0 {
        return 0.0;
    }
    let cells = (staff_count as i64 * PERIOD_DAYS) as f64;
    (schedule.assignments.len() as f64 / cells).min(1.0)
}

/// Fill ratio of one staff member's week: assigned cells in that week / 7.
pub fn week_fill(schedule: &Schedule, staff_id: &str, week: usize) -> f64 {
    let assigned = dates::week_dates(schedule.start_date, week)
        .filter(|d| schedule.shift_at(staff_id, *d).is_some())
        .count();
    assigned as f64 / 7.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftAssignment;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn staff() -> Vec<Staff> {
        vec![Staff::new("s1", "김간호"), Staff::new("s2", "이간호")]
    }

    fn sample() -> Schedule {
        // 2025-01-06 is a Monday; 01-11/01-12 are the weekend.
        Schedule::new("s", "", d("2025-01-06"))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-06"), ShiftType::Day))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-07"), ShiftType::Night))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-11"), ShiftType::Evening))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-12"), ShiftType::Off))
            .with_assignment(ShiftAssignment::new("s2", d("2025-01-06"), ShiftType::Day))
    }

    #[test]
    fn test_per_staff_tallies() {
        let stats = ShiftStats::calculate(&sample(), &staff());
        let s1 = stats.staff("s1");
        assert_eq!(s1.day, 1);
        assert_eq!(s1.night, 1);
        assert_eq!(s1.evening, 1);
        assert_eq!(s1.off, 1);
        assert_eq!(s1.weekend_work, 1); // Saturday evening; Sunday is Off
        assert_eq!(s1.assigned(), 4);
        assert_eq!(s1.work(), 3);
    }

    #[test]
    fn test_per_date_counts() {
        let stats = ShiftStats::calculate(&sample(), &staff());
        let mon = stats.on_date(d("2025-01-06"));
        assert_eq!(mon.day, 2);
        assert_eq!(mon.count_for(ShiftType::Day), 2);
        assert_eq!(mon.count_for(ShiftType::Night), 0);
        // Off does not count toward coverage.
        assert_eq!(stats.on_date(d("2025-01-12")), DailyCounts::default());
    }

    #[test]
    fn test_completeness() {
        let stats = ShiftStats::calculate(&sample(), &staff());
        let expected = 5.0 / (2.0 * 28.0);
        assert!((stats.completeness - expected).abs() < 1e-12);

        assert_eq!(completeness(&sample(), 0), 0.0);
    }

    #[test]
    fn test_week_fill() {
        let s = sample();
        assert!((week_fill(&s, "s1", 0) - 4.0 / 7.0).abs() < 1e-12);
        assert_eq!(week_fill(&s, "s1", 1), 0.0);
        assert!((week_fill(&s, "s2", 0) - 1.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_weekend_work() {
        let stats = ShiftStats::calculate(&sample(), &staff());
        assert!((stats.mean_weekend_work(&staff()) - 0.5).abs() < 1e-12);
    }
}
