//! Roster domain models.
//!
//! Core data types for 28-day rotating schedules: who works (staff),
//! what they work (shift assignments), the period container (schedule),
//! the tunable rule set (constraint config), and the evaluation output
//! (violations, feasibility result). Pure data; all rule logic lives
//! in the `constraints` module.

mod config;
mod schedule;
mod shift;
mod violation;

pub use config::{
    config_key, ids, ConstraintConfig, DailyStaffing, SeverityLevel, SoftConstraintSetting,
    StaffingLevel,
};
pub use schedule::Schedule;
pub use shift::{ShiftAssignment, ShiftType, Staff};
pub use violation::{
    violations_for_cell, FeasibilityResult, Severity, Verdict, Violation, ViolationContext,
};
