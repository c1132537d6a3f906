//! Constraint configuration.
//!
//! Tunable rule parameters for one facility: weekly hours, night limits,
//! daily coverage minimums, per-constraint enable/severity toggles, and
//! per-soft-constraint parameters. Process-lifetime; persisted as JSON and
//! deep-merged over these defaults on load (see `persist`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Severity;

/// Stable machine identifiers of the registered constraints.
///
/// Hard ids double as keys of `constraintSeverity`; soft ids key
/// `softConstraints`. `enabledConstraints` is keyed by the camelCase form
/// (see [`config_key`]).
pub mod ids {
    // Hard (legal/coverage) constraints, registry order.
    pub const SHIFT_ORDER: &str = "shift-order";
    pub const NIGHT_OFF_DAY: &str = "night-off-day";
    pub const CONSECUTIVE_NIGHT: &str = "consecutive-night";
    pub const WEEKLY_OFF: &str = "weekly-off";
    pub const JUHU: &str = "juhu";
    pub const STAFFING: &str = "staffing";
    pub const MONTHLY_NIGHT: &str = "monthly-night";

    // Soft (tier-weighted preference) constraints, registry order.
    pub const MAX_CONSECUTIVE_WORK: &str = "max-consecutive-work";
    pub const NIGHT_BLOCK_POLICY: &str = "night-block-policy";
    pub const MAX_PERIOD_OFF: &str = "max-period-off";
    pub const MAX_CONSECUTIVE_OFF: &str = "max-consecutive-off";
    pub const GRADUAL_SHIFT_PROGRESSION: &str = "gradual-shift-progression";
    pub const MAX_SAME_SHIFT_CONSECUTIVE: &str = "max-same-shift-consecutive";
    pub const REST_CLUSTERING: &str = "rest-clustering";
    pub const POST_REST_DAY_SHIFT: &str = "post-rest-day-shift";
    pub const WEEKEND_FAIRNESS: &str = "weekend-fairness";
    pub const SHIFT_CONTINUITY: &str = "shift-continuity";

    /// All hard ids in registry order.
    pub const HARD: [&str; 7] = [
        SHIFT_ORDER,
        NIGHT_OFF_DAY,
        CONSECUTIVE_NIGHT,
        WEEKLY_OFF,
        JUHU,
        STAFFING,
        MONTHLY_NIGHT,
    ];

    /// All soft ids in registry order.
    pub const SOFT: [&str; 10] = [
        MAX_CONSECUTIVE_WORK,
        NIGHT_BLOCK_POLICY,
        MAX_PERIOD_OFF,
        MAX_CONSECUTIVE_OFF,
        GRADUAL_SHIFT_PROGRESSION,
        MAX_SAME_SHIFT_CONSECUTIVE,
        REST_CLUSTERING,
        POST_REST_DAY_SHIFT,
        WEEKEND_FAIRNESS,
        SHIFT_CONTINUITY,
    ];
}

/// Converts a kebab-case constraint id to the camelCase key used by
/// `enabledConstraints` (e.g. `shift-order` → `shiftOrder`).
pub fn config_key(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut upper_next = false;
    for c in id.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Min/max headcount for one shift kind on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingLevel {
    pub min: u32,
    pub max: u32,
}

impl StaffingLevel {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Required headcount per shift kind for one day class (weekday/weekend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStaffing {
    pub day: StaffingLevel,
    pub evening: StaffingLevel,
    pub night: StaffingLevel,
}

impl DailyStaffing {
    /// Sum of the three per-shift minimums.
    pub fn total_min(&self) -> u32 {
        self.day.min + self.evening.min + self.night.min
    }

    /// The level for one working shift kind.
    pub fn level_for(&self, shift: super::ShiftType) -> StaffingLevel {
        match shift {
            super::ShiftType::Day => self.day,
            super::ShiftType::Evening => self.evening,
            super::ShiftType::Night => self.night,
            super::ShiftType::Off => StaffingLevel::new(0, u32::MAX),
        }
    }
}

/// User-selected severity for a hard constraint.
///
/// `Hard` keeps the constraint at error severity; `Soft` downgrades its
/// violations to warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Hard,
    Soft,
}

/// Per-soft-constraint toggle and parameters.
///
/// Parameters are constraint-specific; absent ones fall back to the
/// registry defaults at check time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftConstraintSetting {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Streak limit for consecutive-work/off constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_days: Option<u32>,
    /// Preferred night block size (informational in messages).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_block_size: Option<u32>,
    /// Off-day ceiling for the whole period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_off: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl Default for SoftConstraintSetting {
    fn default() -> Self {
        Self {
            enabled: true,
            max_days: None,
            min_block_size: None,
            max_off: None,
        }
    }
}

impl SoftConstraintSetting {
    fn with_max_days(days: u32) -> Self {
        Self {
            max_days: Some(days),
            ..Self::default()
        }
    }
}

/// Full rule configuration for one facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintConfig {
    /// Contracted weekly work hours (drives the weekly off-day floor).
    pub weekly_work_hours: u32,
    /// Hard ceiling on consecutive night shifts.
    pub max_consecutive_nights: u32,
    /// Exact night-shift count each staff member owes per period.
    pub monthly_nights_required: u32,
    /// Coverage minimums Monday–Friday.
    pub weekday_staffing: DailyStaffing,
    /// Coverage minimums Saturday–Sunday.
    pub weekend_staffing: DailyStaffing,
    /// Hard-constraint toggles, keyed by camelCase id ([`config_key`]).
    pub enabled_constraints: HashMap<String, bool>,
    /// Hard-constraint severity overrides, keyed by kebab-case id.
    pub constraint_severity: HashMap<String, SeverityLevel>,
    /// Soft-constraint toggles and parameters, keyed by kebab-case id.
    pub soft_constraints: HashMap<String, SoftConstraintSetting>,
    /// Jurisdiction escape hatch: when false (default, Korean Labor
    /// Standards profile) the juhu constraint is pinned to error severity.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_juhu_severity_override: bool,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        let enabled_constraints = ids::HARD
            .iter()
            .map(|id| (config_key(id), true))
            .collect();

        let mut constraint_severity: HashMap<String, SeverityLevel> = ids::HARD
            .iter()
            .map(|id| (id.to_string(), SeverityLevel::Hard))
            .collect();
        // Monthly night count is advisory out of the box.
        constraint_severity.insert(ids::MONTHLY_NIGHT.to_string(), SeverityLevel::Soft);

        let mut soft_constraints: HashMap<String, SoftConstraintSetting> = ids::SOFT
            .iter()
            .map(|id| (id.to_string(), SoftConstraintSetting::default()))
            .collect();
        soft_constraints.insert(
            ids::MAX_CONSECUTIVE_WORK.to_string(),
            SoftConstraintSetting::with_max_days(5),
        );
        soft_constraints.insert(
            ids::MAX_CONSECUTIVE_OFF.to_string(),
            SoftConstraintSetting::with_max_days(2),
        );
        soft_constraints.insert(
            ids::MAX_PERIOD_OFF.to_string(),
            SoftConstraintSetting {
                max_off: Some(9),
                ..SoftConstraintSetting::default()
            },
        );
        soft_constraints.insert(
            ids::NIGHT_BLOCK_POLICY.to_string(),
            SoftConstraintSetting {
                min_block_size: Some(2),
                ..SoftConstraintSetting::default()
            },
        );

        Self {
            weekly_work_hours: 40,
            max_consecutive_nights: 3,
            monthly_nights_required: 6,
            weekday_staffing: DailyStaffing {
                day: StaffingLevel::new(3, 5),
                evening: StaffingLevel::new(2, 4),
                night: StaffingLevel::new(2, 3),
            },
            weekend_staffing: DailyStaffing {
                day: StaffingLevel::new(2, 4),
                evening: StaffingLevel::new(2, 3),
                night: StaffingLevel::new(2, 3),
            },
            enabled_constraints,
            constraint_severity,
            soft_constraints,
            allow_juhu_severity_override: false,
        }
    }
}

impl ConstraintConfig {
    /// Whether a hard constraint is enabled. Unknown ids default to enabled.
    pub fn hard_enabled(&self, id: &str) -> bool {
        self.enabled_constraints
            .get(&config_key(id))
            .copied()
            .unwrap_or(true)
    }

    /// Whether a soft constraint is enabled. Unknown ids default to enabled.
    pub fn soft_enabled(&self, id: &str) -> bool {
        self.soft_constraints
            .get(id)
            .map(|s| s.enabled)
            .unwrap_or(true)
    }

    /// The stored setting for a soft constraint, if any.
    pub fn soft_setting(&self, id: &str) -> Option<&SoftConstraintSetting> {
        self.soft_constraints.get(id)
    }

    /// Effective severity for a hard constraint's violations.
    ///
    /// `juhu` is pinned to error in the default jurisdiction profile;
    /// every other hard constraint follows its `constraintSeverity` entry
    /// (missing entry ⇒ error).
    pub fn effective_severity(&self, id: &str) -> Severity {
        if id == ids::JUHU && !self.allow_juhu_severity_override {
            return Severity::Error;
        }
        match self.constraint_severity.get(id) {
            Some(SeverityLevel::Soft) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Off days each staff member is owed per week:
    /// `7 − ⌈weeklyWorkHours / 8⌉`.
    pub fn required_weekly_off_days(&self) -> u32 {
        7u32.saturating_sub(self.weekly_work_hours.div_ceil(8))
    }

    /// Staffing requirements for a given date's day class.
    pub fn staffing_for(&self, date: chrono::NaiveDate) -> DailyStaffing {
        if crate::dates::is_weekend(date) {
            self.weekend_staffing
        } else {
            self.weekday_staffing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key() {
        assert_eq!(config_key("shift-order"), "shiftOrder");
        assert_eq!(config_key("night-off-day"), "nightOffDay");
        assert_eq!(config_key("juhu"), "juhu");
    }

    #[test]
    fn test_default_toggles() {
        let c = ConstraintConfig::default();
        for id in ids::HARD {
            assert!(c.hard_enabled(id), "{id} should default enabled");
        }
        for id in ids::SOFT {
            assert!(c.soft_enabled(id), "{id} should default enabled");
        }
    }

    #[test]
    fn test_default_severities() {
        let c = ConstraintConfig::default();
        assert_eq!(c.effective_severity(ids::SHIFT_ORDER), Severity::Error);
        // Monthly night defaults to advisory.
        assert_eq!(c.effective_severity(ids::MONTHLY_NIGHT), Severity::Warning);
    }

    #[test]
    fn test_user_downgrade() {
        let mut c = ConstraintConfig::default();
        c.constraint_severity
            .insert(ids::SHIFT_ORDER.to_string(), SeverityLevel::Soft);
        assert_eq!(c.effective_severity(ids::SHIFT_ORDER), Severity::Warning);
    }

    #[test]
    fn test_juhu_pinned() {
        let mut c = ConstraintConfig::default();
        c.constraint_severity
            .insert(ids::JUHU.to_string(), SeverityLevel::Soft);
        // Default profile ignores the downgrade.
        assert_eq!(c.effective_severity(ids::JUHU), Severity::Error);

        c.allow_juhu_severity_override = true;
        assert_eq!(c.effective_severity(ids::JUHU), Severity::Warning);
    }

    #[test]
    fn test_required_weekly_off() {
        let mut c = ConstraintConfig::default();
        assert_eq!(c.required_weekly_off_days(), 2); // 40h → 7 - 5

        c.weekly_work_hours = 36;
        assert_eq!(c.required_weekly_off_days(), 2); // ceil(36/8)=5

        c.weekly_work_hours = 48;
        assert_eq!(c.required_weekly_off_days(), 1);
    }

    #[test]
    fn test_soft_params() {
        let c = ConstraintConfig::default();
        let s = c.soft_setting(ids::MAX_CONSECUTIVE_WORK).unwrap();
        assert_eq!(s.max_days, Some(5));
        let s = c.soft_setting(ids::MAX_PERIOD_OFF).unwrap();
        assert_eq!(s.max_off, Some(9));
        let s = c.soft_setting(ids::MAX_CONSECUTIVE_OFF).unwrap();
        assert_eq!(s.max_days, Some(2));
    }

    #[test]
    fn test_config_roundtrip() {
        let c = ConstraintConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("weeklyWorkHours"));
        assert!(json.contains("shiftOrder"));
        let back: ConstraintConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
