//! Constraint registry and evaluation model.
//!
//! Every rule is a [`Constraint`]: a pure function from an immutable
//! [`EvaluationContext`] to a list of violations, tagged with a stable id,
//! a display name, and a natural severity class. The registry holds the
//! rules in a fixed order; the checker walks it and the UI relies on that
//! order for stable highlighting.
//!
//! # Severity resolution
//!
//! A hard constraint emits `error` unless the user downgraded it to soft
//! in `constraintSeverity` (then `warning`). A soft constraint always
//! emits `warning` and additionally carries a [`Tier`] the downstream
//! optimizer uses to scale penalties.

mod boundary;
mod context;
pub mod hard;
pub mod soft;

pub use context::EvaluationContext;

use std::fmt::Debug;
use std::sync::Arc;

use crate::models::Violation;

/// Natural severity class of a constraint.
///
/// Determines the default severity and which config toggle governs the
/// constraint (`enabledConstraints` for hard, `softConstraints[id].enabled`
/// for soft).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityClass {
    Hard,
    Soft,
}

/// Soft-constraint priority class, highest first.
///
/// Tiers map to fixed penalty multipliers on the optimizer side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    /// Fixed penalty weight used by the downstream optimizer.
    pub fn weight(self) -> u32 {
        match self {
            Tier::One => 1000,
            Tier::Two => 100,
            Tier::Three => 10,
        }
    }
}

/// Outcome of one constraint check.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub violations: Vec<Violation>,
}

impl CheckResult {
    /// A passing result.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Wraps the found violations.
    pub fn found(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Whether the constraint held.
    pub fn satisfied(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A named roster rule.
///
/// Implementations must be pure: the same context always yields the same
/// violations, independent of evaluation order.
pub trait Constraint: Send + Sync + Debug {
    /// Stable machine identifier (kebab-case).
    fn id(&self) -> &'static str;

    /// User-facing label.
    fn name(&self) -> &'static str;

    /// Natural severity class.
    fn severity_class(&self) -> SeverityClass;

    /// Optimizer priority tier. Only soft constraints carry one.
    fn tier(&self) -> Option<Tier> {
        None
    }

    /// Evaluates the rule against one schedule snapshot.
    fn check(&self, ctx: &EvaluationContext) -> CheckResult;
}

/// The ordered constraint collection.
///
/// Registry order defines violation ordering in a feasibility result:
/// the seven hard constraints first, then the ten soft ones.
#[derive(Debug, Clone, Default)]
pub struct ConstraintRegistry {
    entries: Vec<Arc<dyn Constraint>>,
}

impl ConstraintRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full standard registry.
    pub fn standard() -> Self {
        Self::new()
            .with(hard::ShiftOrder)
            .with(hard::NightOffDay)
            .with(hard::ConsecutiveNight)
            .with(hard::WeeklyOff)
            .with(hard::Juhu)
            .with(hard::Staffing)
            .with(hard::MonthlyNight)
            .with(soft::MaxConsecutiveWork)
            .with(soft::NightBlockPolicy)
            .with(soft::MaxPeriodOff)
            .with(soft::MaxConsecutiveOff)
            .with(soft::GradualShiftProgression)
            .with(soft::MaxSameShiftConsecutive)
            .with(soft::RestClustering)
            .with(soft::PostRestDayShift)
            .with(soft::WeekendFairness)
            .with(soft::ShiftContinuity)
    }

    /// Appends a constraint.
    pub fn with<C: Constraint + 'static>(mut self, constraint: C) -> Self {
        self.entries.push(Arc::new(constraint));
        self
    }

    /// Iterates constraints in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Constraint>> {
        self.entries.iter()
    }

    /// Looks a constraint up by id.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Constraint>> {
        self.entries.iter().find(|c| c.id() == id)
    }

    /// Number of registered constraints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ids;

    #[test]
    fn test_standard_registry_order() {
        let reg = ConstraintRegistry::standard();
        assert_eq!(reg.len(), 17);

        let listed: Vec<&str> = reg.iter().map(|c| c.id()).collect();
        let expected: Vec<&str> = ids::HARD.into_iter().chain(ids::SOFT).collect();
        assert_eq!(listed, expected);
    }

    #[test]
    fn test_classes_and_tiers() {
        let reg = ConstraintRegistry::standard();
        for id in ids::HARD {
            let c = reg.get(id).unwrap();
            assert_eq!(c.severity_class(), SeverityClass::Hard, "{id}");
            assert!(c.tier().is_none(), "{id} should carry no tier");
        }
        for id in ids::SOFT {
            let c = reg.get(id).unwrap();
            assert_eq!(c.severity_class(), SeverityClass::Soft, "{id}");
            assert!(c.tier().is_some(), "{id} should carry a tier");
        }
    }

    #[test]
    fn test_tier_weights() {
        assert_eq!(Tier::One.weight(), 1000);
        assert_eq!(Tier::Two.weight(), 100);
        assert_eq!(Tier::Three.weight(), 10);
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(ConstraintRegistry::standard().get("nope").is_none());
    }
}
