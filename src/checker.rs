//! Feasibility evaluation.
//!
//! Walks the constraint registry in order, skipping disabled entries,
//! and flattens every violation into one [`FeasibilityResult`]. The
//! schedule is feasible iff no violation carries error severity.
//!
//! One call evaluates one snapshot; there is no retained state, so
//! callers re-run after every mutation and always observe the latest
//! grid.

use chrono::Utc;
use tracing::debug;

use crate::constraints::{ConstraintRegistry, EvaluationContext, SeverityClass};
use crate::models::{
    ConstraintConfig, FeasibilityResult, Schedule, Severity, ShiftAssignment, Staff,
};

/// Evaluates schedules against a constraint registry.
#[derive(Debug, Clone)]
pub struct FeasibilityChecker {
    registry: ConstraintRegistry,
}

impl Default for FeasibilityChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl FeasibilityChecker {
    /// A checker over the standard seventeen-constraint registry.
    pub fn new() -> Self {
        Self {
            registry: ConstraintRegistry::standard(),
        }
    }

    /// A checker over a custom registry (tests, reduced profiles).
    pub fn with_registry(registry: ConstraintRegistry) -> Self {
        Self { registry }
    }

    /// The registry this checker evaluates.
    pub fn registry(&self) -> &ConstraintRegistry {
        &self.registry
    }

    /// Evaluates one schedule snapshot.
    ///
    /// Violation order is the registry order followed by each
    /// constraint's own internal order (staff, then date).
    pub fn check(
        &self,
        schedule: &Schedule,
        staff: &[Staff],
        config: &ConstraintConfig,
        previous_period_end: &[ShiftAssignment],
    ) -> FeasibilityResult {
        let ctx = EvaluationContext::new(schedule, staff, config, previous_period_end);
        let mut violations = Vec::new();

        for constraint in self.registry.iter() {
            let enabled = match constraint.severity_class() {
                SeverityClass::Hard => config.hard_enabled(constraint.id()),
                SeverityClass::Soft => config.soft_enabled(constraint.id()),
            };
            if !enabled {
                continue;
            }
            let result = constraint.check(&ctx);
            if !result.satisfied() {
                debug!(
                    constraint = constraint.id(),
                    count = result.violations.len(),
                    "constraint violated"
                );
            }
            violations.extend(result.violations);
        }

        let feasible = !violations.iter().any(|v| v.severity == Severity::Error);
        debug!(
            feasible,
            violations = violations.len(),
            completeness = ctx.completeness,
            "feasibility evaluated"
        );

        FeasibilityResult {
            feasible,
            violations,
            checked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{config_key, ids, ShiftType, Verdict};
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn staff1() -> Vec<Staff> {
        vec![Staff::new("s1", "김간호")]
    }

    fn schedule_with_forbidden_transition() -> Schedule {
        Schedule::new("s", "", d("2025-01-06"))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-06"), ShiftType::Night))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-07"), ShiftType::Day))
    }

    #[test]
    fn test_error_makes_infeasible() {
        let checker = FeasibilityChecker::new();
        let result = checker.check(
            &schedule_with_forbidden_transition(),
            &staff1(),
            &ConstraintConfig::default(),
            &[],
        );

        assert!(!result.feasible);
        assert_eq!(result.verdict(), Verdict::Impossible);
        assert!(result
            .violations
            .iter()
            .any(|v| v.constraint_id == ids::SHIFT_ORDER));
    }

    #[test]
    fn test_disabled_hard_constraint_skipped() {
        let mut config = ConstraintConfig::default();
        config
            .enabled_constraints
            .insert(config_key(ids::SHIFT_ORDER), false);

        let checker = FeasibilityChecker::new();
        let result = checker.check(
            &schedule_with_forbidden_transition(),
            &staff1(),
            &config,
            &[],
        );
        assert!(!result
            .violations
            .iter()
            .any(|v| v.constraint_id == ids::SHIFT_ORDER));
    }

    #[test]
    fn test_disabled_soft_constraint_skipped() {
        let mut config = ConstraintConfig::default();
        config
            .soft_constraints
            .get_mut(ids::REST_CLUSTERING)
            .unwrap()
            .enabled = false;

        let schedule = Schedule::new("s", "", d("2025-01-06"))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-07"), ShiftType::Day))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-08"), ShiftType::Off))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-09"), ShiftType::Day));

        let checker = FeasibilityChecker::new();
        let result = checker.check(&schedule, &staff1(), &ConstraintConfig::default(), &[]);
        assert!(result
            .violations
            .iter()
            .any(|v| v.constraint_id == ids::REST_CLUSTERING));

        let result = checker.check(&schedule, &staff1(), &config, &[]);
        assert!(!result
            .violations
            .iter()
            .any(|v| v.constraint_id == ids::REST_CLUSTERING));
    }

    #[test]
    fn test_soft_only_outcome_remains_feasible() {
        // An isolated off day only warns.
        let schedule = Schedule::new("s", "", d("2025-01-06"))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-07"), ShiftType::Day))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-08"), ShiftType::Off))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-09"), ShiftType::Day));

        let mut config = ConstraintConfig::default();
        // Avoid unrelated monthly-night warnings muddying the check.
        config.monthly_nights_required = 0;

        let checker = FeasibilityChecker::new();
        let result = checker.check(&schedule, &staff1(), &config, &[]);

        assert!(result.feasible);
        assert_eq!(result.verdict(), Verdict::Possible);
        assert!(result.warning_count() > 0);
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_no_soft_constraint_ever_errors() {
        // Dense pathological schedule: every cell Off.
        let mut schedule = Schedule::new("s", "", d("2025-01-06"));
        for date in crate::dates::period_dates(d("2025-01-06")) {
            schedule.upsert(ShiftAssignment::new("s1", date, ShiftType::Off));
        }
        let checker = FeasibilityChecker::new();
        let result = checker.check(&schedule, &staff1(), &ConstraintConfig::default(), &[]);

        for v in &result.violations {
            let c = checker.registry().get(&v.constraint_id).unwrap();
            if c.severity_class() == SeverityClass::Soft {
                assert_eq!(v.severity, Severity::Warning, "{}", v.constraint_id);
            }
        }
    }

    #[test]
    fn test_downgraded_hard_never_errors() {
        let mut config = ConstraintConfig::default();
        for id in ids::HARD {
            config
                .constraint_severity
                .insert(id.to_string(), crate::models::SeverityLevel::Soft);
        }
        // Juhu stays pinned, but this schedule has no juhu violations.
        let checker = FeasibilityChecker::new();
        let result = checker.check(
            &schedule_with_forbidden_transition(),
            &staff1(),
            &config,
            &[],
        );
        assert!(result.feasible);
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_registry_order_is_violation_order() {
        let schedule = schedule_with_forbidden_transition();
        let checker = FeasibilityChecker::new();
        let result = checker.check(&schedule, &staff1(), &ConstraintConfig::default(), &[]);

        let order: Vec<usize> = result
            .violations
            .iter()
            .map(|v| {
                checker
                    .registry()
                    .iter()
                    .position(|c| c.id() == v.constraint_id)
                    .unwrap()
            })
            .collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(order, sorted);
    }
}
