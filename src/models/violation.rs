//! Violations and the feasibility verdict.
//!
//! Every constraint reports its findings as [`Violation`] values, never
//! as errors. A violation carries enough context (staff, date, date range,
//! constraint identity) to let a UI highlight the affected cells and
//! explain the impact of the edit being made.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// How bad a violation is.
///
/// `Error` makes the schedule infeasible; `Warning` is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Where a violation applies.
///
/// A staff-level finding carries `staff_id`/`staff_name`; a cell-level one
/// adds `date`; a range (a week, a streak) uses `dates`. Coverage findings
/// carry only `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<NaiveDate>>,
}

/// A single constraint finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Stable constraint id (kebab-case).
    pub constraint_id: String,
    /// User-facing constraint label.
    pub constraint_name: String,
    pub severity: Severity,
    /// Human-readable explanation (product locale).
    pub message: String,
    pub context: ViolationContext,
}

impl Violation {
    /// Creates a violation with an empty context.
    pub fn new(
        constraint_id: impl Into<String>,
        constraint_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            constraint_id: constraint_id.into(),
            constraint_name: constraint_name.into(),
            severity,
            message: message.into(),
            context: ViolationContext::default(),
        }
    }

    /// Attaches the staff member the finding concerns.
    pub fn for_staff(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.context.staff_id = Some(id.into());
        self.context.staff_name = Some(name.into());
        self
    }

    /// Attaches the single date the finding anchors to.
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.context.date = Some(date);
        self
    }

    /// Attaches the date range the finding spans.
    pub fn spanning(mut self, dates: Vec<NaiveDate>) -> Self {
        self.context.dates = Some(dates);
        self
    }

    /// Whether this finding touches the given cell.
    ///
    /// True when the staff matches (or the finding is staff-agnostic, as
    /// coverage findings are) and the date equals `date` or the range
    /// contains it. Used by the UI to filter warnings to the cell being
    /// edited.
    pub fn concerns_cell(&self, staff_id: &str, date: NaiveDate) -> bool {
        if let Some(sid) = &self.context.staff_id {
            if sid != staff_id {
                return false;
            }
        }
        if self.context.date == Some(date) {
            return true;
        }
        if let Some(dates) = &self.context.dates {
            return dates.contains(&date);
        }
        false
    }
}

/// Filters a violation list to the findings touching one cell.
pub fn violations_for_cell<'a>(
    violations: &'a [Violation],
    staff_id: &str,
    date: NaiveDate,
) -> Vec<&'a Violation> {
    violations
        .iter()
        .filter(|v| v.concerns_cell(staff_id, date))
        .collect()
}

/// Top-line indicator shown above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Possible,
    Impossible,
}

/// Outcome of one feasibility evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityResult {
    /// True iff no violation has error severity.
    pub feasible: bool,
    /// All findings, in registry order then each constraint's own order.
    pub violations: Vec<Violation>,
    /// Wall time of the evaluation.
    pub checked_at: DateTime<Utc>,
}

impl FeasibilityResult {
    /// Number of error-severity findings.
    pub fn error_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity findings.
    pub fn warning_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count()
    }

    /// The top-line verdict. Soft-only outcomes remain `Possible`.
    pub fn verdict(&self) -> Verdict {
        if self.feasible {
            Verdict::Possible
        } else {
            Verdict::Impossible
        }
    }
}
