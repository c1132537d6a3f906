//! Feasibility engine for 28-day rotating shift rosters.
//!
//! Evaluates nursing-style rotas with four shift states (Day, Evening,
//! Night, Off) against a registry of named constraints and reports every
//! violated cell or range with a severity and a human-readable explanation.
//! Optimal assignment is delegated to an external CP-SAT service; this crate
//! owns the constraint model, not the solver.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Staff`, `ShiftAssignment`, `Schedule`,
//!   `ConstraintConfig`, `Violation`, `FeasibilityResult`
//! - **`dates`**: Day-of-week arithmetic (0=Sunday), weekend predicate,
//!   28-day period iteration, week boundaries
//! - **`stats`**: Per-staff shift tallies, per-date coverage counts,
//!   completeness ratios
//! - **`constraints`**: The constraint registry — seven hard (legal/coverage)
//!   rules and ten tier-weighted soft preferences
//! - **`checker`**: Feasibility evaluation over the registry
//! - **`impact`**: Which other cells a given edit could affect
//! - **`validation`**: Static config sanity checks against the staff roster
//! - **`solver`**: Wire contract for the external CP-SAT generator
//! - **`persist`**: Keyed JSON state store with schema migration and
//!   export/import
//!
//! # Architecture
//!
//! Constraints are pure functions from an immutable
//! [`EvaluationContext`](constraints::EvaluationContext) to violation lists;
//! the checker never mutates shared state, so one evaluation is a consistent
//! snapshot and violation ordering is deterministic (registry order, then
//! each constraint's own staff/date order).

pub mod checker;
pub mod constraints;
pub mod dates;
pub mod impact;
pub mod models;
pub mod persist;
pub mod solver;
pub mod stats;
pub mod validation;
