//! Wire contract for the external CP-SAT generator.
//!
//! The engine never computes an optimal assignment itself; it builds a
//! request from the domain models, ships it to the external service, and
//! merges a successful response back into the schedule (locked cells
//! preserved). Only the contract lives here; transport, cancellation,
//! and the 30-second client timeout belong to the caller.
//!
//! Day-of-week numbers on the wire are 0=Sunday; the Python solver side
//! translates with `python_weekday = (js_day - 1) mod 7` (see
//! [`crate::dates::python_weekday`]).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    ConstraintConfig, DailyStaffing, Schedule, SeverityLevel, ShiftAssignment,
    SoftConstraintSetting, Staff,
};

/// Constraint block of a solver request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConstraints {
    pub max_consecutive_nights: u32,
    pub monthly_nights_required: u32,
    pub weekly_work_hours: u32,
    pub weekday_staffing: DailyStaffing,
    pub weekend_staffing: DailyStaffing,
    pub constraint_severity: HashMap<String, SeverityLevel>,
    pub soft_constraints: HashMap<String, SoftConstraintSetting>,
}

impl From<&ConstraintConfig> for SolverConstraints {
    fn from(config: &ConstraintConfig) -> Self {
        Self {
            max_consecutive_nights: config.max_consecutive_nights,
            monthly_nights_required: config.monthly_nights_required,
            weekly_work_hours: config.weekly_work_hours,
            weekday_staffing: config.weekday_staffing,
            weekend_staffing: config.weekend_staffing,
            constraint_severity: config.constraint_severity.clone(),
            soft_constraints: config.soft_constraints.clone(),
        }
    }
}

/// `POST /generate` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub staff: Vec<Staff>,
    pub start_date: NaiveDate,
    pub constraints: SolverConstraints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_period_end: Option<Vec<ShiftAssignment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_assignments: Option<Vec<ShiftAssignment>>,
}

impl GenerateRequest {
    /// Builds a request from the current state. Locked cells and a
    /// non-empty trail ride along; empty collections are omitted.
    pub fn build(
        schedule: &Schedule,
        staff: &[Staff],
        config: &ConstraintConfig,
        previous_period_end: &[ShiftAssignment],
    ) -> Self {
        let locked = schedule.locked_assignments();
        Self {
            staff: staff.to_vec(),
            start_date: schedule.start_date,
            constraints: SolverConstraints::from(config),
            previous_period_end: (!previous_period_end.is_empty())
                .then(|| previous_period_end.to_vec()),
            locked_assignments: (!locked.is_empty()).then_some(locked),
        }
    }
}

/// Schedule payload of a successful generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    pub assignments: Vec<ShiftAssignment>,
}

/// One solver-assigned weekly legal off-day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JuhuAssignment {
    pub staff_id: String,
    /// 0=Sunday.
    pub juhu_day: u8,
}

/// Machine-readable failure classes from the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverErrorCode {
    Infeasible,
    Timeout,
    InvalidInput,
}

/// Infeasibility diagnosis attached to `INFEASIBLE` errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnosis {
    #[serde(default)]
    pub conflicting_constraints: Vec<String>,
    #[serde(default)]
    pub conflicting_inputs: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Wire-level solver error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverError {
    pub code: SolverErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Diagnosis>,
}

/// `POST /generate` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<GeneratedSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_juhu_days: Option<Vec<JuhuAssignment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SolverError>,
}

/// Applies a generation response to the schedule.
///
/// On success the generated assignments are merged (locked cells
/// preserved) and the solver's juhu days replace the current map.
/// On failure the schedule is left untouched and the error is returned.
pub fn apply_response(
    schedule: &mut Schedule,
    response: GenerateResponse,
) -> Result<(), SolverError> {
    if !response.success {
        return Err(response.error.unwrap_or(SolverError {
            code: SolverErrorCode::InvalidInput,
            message: "생성 실패 (서버가 오류 정보를 반환하지 않았습니다)".to_string(),
            diagnosis: None,
        }));
    }

    if let Some(generated) = response.schedule {
        debug!(
            assignments = generated.assignments.len(),
            "merging generated schedule"
        );
        schedule.merge_generated(generated.assignments);
    }
    if let Some(juhu) = response.staff_juhu_days {
        schedule.staff_juhu_days = juhu
            .into_iter()
            .map(|j| (j.staff_id, j.juhu_day % 7))
            .collect();
    }
    Ok(())
}

/// `POST /check-feasibility` request body: the generation request minus
/// the optimization-only fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityCheckRequest {
    pub staff: Vec<Staff>,
    pub start_date: NaiveDate,
    pub constraints: SolverConstraints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_period_end: Option<Vec<ShiftAssignment>>,
}

impl From<GenerateRequest> for FeasibilityCheckRequest {
    fn from(request: GenerateRequest) -> Self {
        Self {
            staff: request.staff,
            start_date: request.start_date,
            constraints: request.constraints,
            previous_period_end: request.previous_period_end,
        }
    }
}

/// Headline numbers echoed back by the pre-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityAnalysis {
    pub staff_count: u32,
    pub weekday_min_staff: u32,
    pub weekend_min_staff: u32,
    pub off_days_required: u32,
    pub weekly_work_hours: u32,
}

/// `POST /check-feasibility` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeasibilityCheckResponse {
    pub feasible: bool,
    pub reasons: Vec<String>,
    pub analysis: FeasibilityAnalysis,
}

/// Lifecycle of one generation round trip.
///
/// `Idle → Loading → {Success, Error}`, then back to `Idle` or straight
/// into another `Loading`. The UI keys affordances off the state (e.g.
/// `Success` auto-shows all warnings).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl GenerationStatus {
    /// Whether moving to `next` is a legal transition.
    pub fn can_transition_to(self, next: GenerationStatus) -> bool {
        use GenerationStatus::*;
        matches!(
            (self, next),
            (Idle, Loading)
                | (Loading, Success)
                | (Loading, Error)
                | (Success, Idle)
                | (Success, Loading)
                | (Error, Idle)
                | (Error, Loading)
        )
    }

    /// Transitions to `next`, or stays put when illegal.
    pub fn transition_to(self, next: GenerationStatus) -> GenerationStatus {
        if self.can_transition_to(next) {
            next
        } else {
            self
        }
    }

    /// Whether a round trip is in flight.
    pub fn is_loading(self) -> bool {
        self == GenerationStatus::Loading
    }
}
