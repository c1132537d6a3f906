//! Hard (legal/coverage) constraints.
//!
//! Violating any of these at `error` severity makes the schedule
//! infeasible. Effective severity comes from `constraintSeverity`, so a
//! user may downgrade individual rules to advisory, except `juhu`, which
//! the default jurisdiction profile pins to error.
//!
//! Consecutive-day rules follow the boundary protocol in
//! [`boundary`](super::boundary): streaks are seeded from the trailing
//! days of the previous period and violations are only ever anchored to
//! current-period dates.

use crate::dates::{self, PERIOD_WEEKS};
use crate::models::{ids, ShiftType, Violation};

use super::boundary::{trailing_streak, StreakWalker};
use super::{CheckResult, Constraint, EvaluationContext, SeverityClass};

/// Day-to-day transitions the rota may never contain.
const FORBIDDEN_TRANSITIONS: [(ShiftType, ShiftType); 3] = [
    (ShiftType::Night, ShiftType::Day),
    (ShiftType::Night, ShiftType::Evening),
    (ShiftType::Evening, ShiftType::Day),
];

// ======================== shift-order ========================

/// Forbidden day-to-day transitions: N→D, N→E, E→D.
///
/// Checked within the period and across the left boundary (last
/// previous-period day → day 0). Off participates in no forbidden pair.
#[derive(Debug, Clone, Copy)]
pub struct ShiftOrder;

impl Constraint for ShiftOrder {
    fn id(&self) -> &'static str {
        ids::SHIFT_ORDER
    }

    fn name(&self) -> &'static str {
        "근무 순서 제한"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Hard
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let severity = ctx.config.effective_severity(self.id());
        let mut violations = Vec::new();

        for staff in ctx.staff {
            for date in dates::period_dates(ctx.start_date()) {
                let Some(cur) = ctx.shift_at(&staff.id, date) else {
                    continue;
                };
                let prev_date = dates::add_days(date, -1);
                let Some(prev) = ctx.shift_at(&staff.id, prev_date) else {
                    continue;
                };
                if FORBIDDEN_TRANSITIONS.contains(&(prev, cur)) {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            severity,
                            format!(
                                "{}님: {}→{} 전환은 허용되지 않습니다 ({})",
                                ctx.staff_name(&staff.id),
                                prev.label(),
                                cur.label(),
                                date
                            ),
                        )
                        .for_staff(&staff.id, ctx.staff_name(&staff.id))
                        .on_date(date)
                        .spanning(vec![prev_date, date]),
                    );
                }
            }
        }
        CheckResult::found(violations)
    }
}

// ======================== night-off-day ========================

/// The three-day pattern N, Off, D is a legal rest violation.
///
/// Sliding windows start at offsets −2..+25 so the N and Off may sit in
/// the previous period, but a violation is reported only when the D lies
/// inside the current period (it always anchors to that day).
#[derive(Debug, Clone, Copy)]
pub struct NightOffDay;

impl Constraint for NightOffDay {
    fn id(&self) -> &'static str {
        ids::NIGHT_OFF_DAY
    }

    fn name(&self) -> &'static str {
        "나이트-휴무-데이 금지"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Hard
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let severity = ctx.config.effective_severity(self.id());
        let mut violations = Vec::new();

        for staff in ctx.staff {
            for offset in -2..=25i64 {
                let d1 = dates::add_days(ctx.start_date(), offset);
                let d2 = dates::add_days(d1, 1);
                let d3 = dates::add_days(d1, 2);

                let pattern = (
                    ctx.shift_at(&staff.id, d1),
                    ctx.shift_at(&staff.id, d2),
                    ctx.shift_at(&staff.id, d3),
                );
                if pattern
                    == (
                        Some(ShiftType::Night),
                        Some(ShiftType::Off),
                        Some(ShiftType::Day),
                    )
                {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            severity,
                            format!(
                                "{}님: 나이트-휴무-데이 패턴은 충분한 휴식이 보장되지 않습니다 ({}~{})",
                                ctx.staff_name(&staff.id),
                                d1,
                                d3
                            ),
                        )
                        .for_staff(&staff.id, ctx.staff_name(&staff.id))
                        .on_date(d3)
                        .spanning(vec![d1, d2, d3]),
                    );
                }
            }
        }
        CheckResult::found(violations)
    }
}

// ======================== consecutive-night ========================

/// No staff member may exceed `maxConsecutiveNights` consecutive nights.
///
/// The streak is seeded by the trailing nights of the previous period;
/// each day where the running count exceeds the limit gets a violation
/// whose `dates` span the whole streak so far.
#[derive(Debug, Clone, Copy)]
pub struct ConsecutiveNight;

impl Constraint for ConsecutiveNight {
    fn id(&self) -> &'static str {
        ids::CONSECUTIVE_NIGHT
    }

    fn name(&self) -> &'static str {
        "연속 나이트 제한"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Hard
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let severity = ctx.config.effective_severity(self.id());
        let max = ctx.config.max_consecutive_nights;
        let mut violations = Vec::new();

        for staff in ctx.staff {
            let seed = trailing_streak(ctx, &staff.id, ShiftType::is_night);
            let mut walker = StreakWalker::seeded(seed);

            for date in dates::period_dates(ctx.start_date()) {
                let is_night = ctx.shift_at(&staff.id, date) == Some(ShiftType::Night);
                let run = walker.step(date, is_night);
                if run > max {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            severity,
                            format!(
                                "{}님: 연속 {}일 나이트 근무 (최대 {}일)",
                                ctx.staff_name(&staff.id),
                                run,
                                max
                            ),
                        )
                        .for_staff(&staff.id, ctx.staff_name(&staff.id))
                        .on_date(date)
                        .spanning(walker.span(date)),
                    );
                }
            }
        }
        CheckResult::found(violations)
    }
}

// ======================== weekly-off ========================

/// Each of the four period weeks owes every staff member
/// `7 − ⌈weeklyWorkHours/8⌉` off days.
///
/// A week is only evaluated once that staff member's in-week fill reaches
/// 0.5, so partial schedules don't spray spurious findings.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyOff;

impl Constraint for WeeklyOff {
    fn id(&self) -> &'static str {
        ids::WEEKLY_OFF
    }

    fn name(&self) -> &'static str {
        "주간 휴무 보장"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Hard
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let severity = ctx.config.effective_severity(self.id());
        let required = ctx.config.required_weekly_off_days();
        let mut violations = Vec::new();

        for staff in ctx.staff {
            for week in 0..PERIOD_WEEKS as usize {
                if crate::stats::week_fill(ctx.schedule, &staff.id, week) < 0.5 {
                    continue;
                }

                let week_dates: Vec<_> = dates::week_dates(ctx.start_date(), week).collect();
                let off = week_dates
                    .iter()
                    .filter(|d| ctx.shift_at(&staff.id, **d) == Some(ShiftType::Off))
                    .count() as u32;
                if off < required {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            severity,
                            format!(
                                "{}님: {}주차({}~{}) 휴무 {}일 (최소 {}일 필요)",
                                ctx.staff_name(&staff.id),
                                week + 1,
                                week_dates[0],
                                week_dates[6],
                                off,
                                required
                            ),
                        )
                        .for_staff(&staff.id, ctx.staff_name(&staff.id))
                        .spanning(week_dates.clone()),
                    );
                }
            }
        }
        CheckResult::found(violations)
    }
}

// ======================== juhu ========================

/// Weekly legal off-day (주휴일, Korean Labor Standards Act).
///
/// When a staff member's juhu weekday is known, every period date on that
/// weekday must be Off or unassigned. Staff without a juhu day make the
/// constraint inert for them.
#[derive(Debug, Clone, Copy)]
pub struct Juhu;

impl Constraint for Juhu {
    fn id(&self) -> &'static str {
        ids::JUHU
    }

    fn name(&self) -> &'static str {
        "주휴일 보장"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Hard
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let severity = ctx.config.effective_severity(self.id());
        let mut violations = Vec::new();

        for staff in ctx.staff {
            let Some(juhu) = ctx.juhu_day(&staff.id) else {
                continue;
            };
            for date in dates::period_dates(ctx.start_date()) {
                if dates::day_of_week(date) != juhu {
                    continue;
                }
                let Some(shift) = ctx.shift_at(&staff.id, date) else {
                    continue;
                };
                if shift.is_work() {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            severity,
                            format!(
                                "{}님: 주휴일({})에 {} 근무가 배정되었습니다 ({})",
                                ctx.staff_name(&staff.id),
                                dates::weekday_name(juhu),
                                shift.display_name(),
                                date
                            ),
                        )
                        .for_staff(&staff.id, ctx.staff_name(&staff.id))
                        .on_date(date),
                    );
                }
            }
        }
        CheckResult::found(violations)
    }
}

// ======================== staffing ========================

/// Per-date coverage minimums for D/E/N (weekday vs weekend levels).
///
/// Globally gated: below 0.5 schedule completeness no coverage findings
/// are produced at all.
#[derive(Debug, Clone, Copy)]
pub struct Staffing;

impl Constraint for Staffing {
    fn id(&self) -> &'static str {
        ids::STAFFING
    }

    fn name(&self) -> &'static str {
        "필요 인원 충족"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Hard
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        if ctx.completeness < 0.5 {
            return CheckResult::ok();
        }

        let severity = ctx.config.effective_severity(self.id());
        let mut violations = Vec::new();

        for date in dates::period_dates(ctx.start_date()) {
            let staffing = ctx.config.staffing_for(date);
            let counts = ctx.stats.on_date(date);

            for shift in ShiftType::WORKING {
                let min = staffing.level_for(shift).min;
                let assigned = counts.count_for(shift);
                if assigned < min {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            severity,
                            format!(
                                "{} {} 근무 {}명 배정 (최소 {}명 필요)",
                                date,
                                shift.display_name(),
                                assigned,
                                min
                            ),
                        )
                        .on_date(date),
                    );
                }
            }
        }
        CheckResult::found(violations)
    }
}

// ======================== monthly-night ========================

/// Each staff member owes exactly `monthlyNightsRequired` nights per
/// period. Ships with soft (warning) default severity.
#[derive(Debug, Clone, Copy)]
pub struct MonthlyNight;

impl Constraint for MonthlyNight {
    fn id(&self) -> &'static str {
        ids::MONTHLY_NIGHT
    }

    fn name(&self) -> &'static str {
        "월 나이트 개수"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Hard
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let severity = ctx.config.effective_severity(self.id());
        let required = ctx.config.monthly_nights_required;
        let mut violations = Vec::new();

        for staff in ctx.staff {
            let nights = ctx.stats.staff(&staff.id).night;
            if nights == required {
                continue;
            }
            let night_dates: Vec<_> = dates::period_dates(ctx.start_date())
                .filter(|d| ctx.shift_at(&staff.id, *d) == Some(ShiftType::Night))
                .collect();

            let mut violation = Violation::new(
                self.id(),
                self.name(),
                severity,
                format!(
                    "{}님: 월 나이트 {}개 (기준 {}개)",
                    ctx.staff_name(&staff.id),
                    nights,
                    required
                ),
            )
            .for_staff(&staff.id, ctx.staff_name(&staff.id));
            if !night_dates.is_empty() {
                violation = violation.spanning(night_dates);
            }
            violations.push(violation);
        }
        CheckResult::found(violations)
    }
}
