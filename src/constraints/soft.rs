//! Soft (tier-weighted preference) constraints.
//!
//! All ten emit warnings only; the tier tells the downstream optimizer
//! how hard to push back (tier 1 ×1000, tier 2 ×100, tier 3 ×10).
//! Each is toggled and parameterized through `softConstraints[id]`;
//! missing parameters fall back to the defaults documented per rule.

use crate::dates;
use crate::models::{ids, Severity, ShiftType, Violation};

use super::boundary::{trailing_streak, StreakWalker};
use super::{CheckResult, Constraint, EvaluationContext, SeverityClass, Tier};

/// Same-shift streak length that triggers the monotony warning.
const SAME_SHIFT_LIMIT: u32 = 5;

/// Non-off shift changes tolerated before the continuity warning.
const CONTINUITY_LIMIT: u32 = 10;

fn soft_max_days(ctx: &EvaluationContext, id: &str, default: u32) -> u32 {
    ctx.config
        .soft_setting(id)
        .and_then(|s| s.max_days)
        .unwrap_or(default)
}

// ======================== max-consecutive-work ========================

/// No more than `maxDays` (default 5) consecutive working days.
///
/// Seeded by the previous period's trailing working days; emits one
/// warning per day beyond the limit.
#[derive(Debug, Clone, Copy)]
pub struct MaxConsecutiveWork;

impl Constraint for MaxConsecutiveWork {
    fn id(&self) -> &'static str {
        ids::MAX_CONSECUTIVE_WORK
    }

    fn name(&self) -> &'static str {
        "연속 근무 제한"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Soft
    }

    fn tier(&self) -> Option<Tier> {
        Some(Tier::One)
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let max = soft_max_days(ctx, self.id(), 5);
        let mut violations = Vec::new();

        for staff in ctx.staff {
            let seed = trailing_streak(ctx, &staff.id, ShiftType::is_work);
            let mut walker = StreakWalker::seeded(seed);

            for date in dates::period_dates(ctx.start_date()) {
                let works = ctx
                    .shift_at(&staff.id, date)
                    .map(ShiftType::is_work)
                    .unwrap_or(false);
                let run = walker.step(date, works);
                if run > max {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            Severity::Warning,
                            format!(
                                "{}님: 연속 {}일 근무 (최대 {}일)",
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

// ======================== night-block-policy ========================

/// A night with no night neighbor on either side is an isolated night.
///
/// Neighbors resolve across the left boundary through the merged
/// trail+period lookup. `minBlockSize` (default 2) is informational in
/// the message.
#[derive(Debug, Clone, Copy)]
pub struct NightBlockPolicy;

impl Constraint for NightBlockPolicy {
    fn id(&self) -> &'static str {
        ids::NIGHT_BLOCK_POLICY
    }

    fn name(&self) -> &'static str {
        "나이트 묶음 배치"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Soft
    }

    fn tier(&self) -> Option<Tier> {
        Some(Tier::One)
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let min_block = ctx
            .config
            .soft_setting(self.id())
            .and_then(|s| s.min_block_size)
            .unwrap_or(2);
        let mut violations = Vec::new();

        for staff in ctx.staff {
            for date in dates::period_dates(ctx.start_date()) {
                if ctx.shift_at(&staff.id, date) != Some(ShiftType::Night) {
                    continue;
                }
                let prev = ctx.shift_at(&staff.id, dates::add_days(date, -1));
                let next = ctx.shift_at(&staff.id, dates::add_days(date, 1));
                if prev != Some(ShiftType::Night) && next != Some(ShiftType::Night) {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            Severity::Warning,
                            format!(
                                "{}님: 단독 나이트 ({}), 나이트는 {}일 이상 연속 배치를 권장합니다",
                                ctx.staff_name(&staff.id),
                                date,
                                min_block
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

// ======================== max-period-off ========================

/// At most `maxOff` (default 9) off days in the whole period.
#[derive(Debug, Clone, Copy)]
pub struct MaxPeriodOff;

impl Constraint for MaxPeriodOff {
    fn id(&self) -> &'static str {
        ids::MAX_PERIOD_OFF
    }

    fn name(&self) -> &'static str {
        "기간 휴무 상한"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Soft
    }

    fn tier(&self) -> Option<Tier> {
        Some(Tier::One)
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let max_off = ctx
            .config
            .soft_setting(self.id())
            .and_then(|s| s.max_off)
            .unwrap_or(9);
        let mut violations = Vec::new();

        for staff in ctx.staff {
            let off_dates: Vec<_> = dates::period_dates(ctx.start_date())
                .filter(|d| ctx.shift_at(&staff.id, *d) == Some(ShiftType::Off))
                .collect();
            if off_dates.len() as u32 > max_off {
                violations.push(
                    Violation::new(
                        self.id(),
                        self.name(),
                        Severity::Warning,
                        format!(
                            "{}님: 기간 내 휴무 {}일 (최대 {}일)",
                            ctx.staff_name(&staff.id),
                            off_dates.len(),
                            max_off
                        ),
                    )
                    .for_staff(&staff.id, ctx.staff_name(&staff.id))
                    .spanning(off_dates),
                );
            }
        }
        CheckResult::found(violations)
    }
}

// ======================== max-consecutive-off ========================

/// No more than `maxDays` (default 2) consecutive off days.
///
/// Same walker as [`MaxConsecutiveWork`], off-streaks instead.
#[derive(Debug, Clone, Copy)]
pub struct MaxConsecutiveOff;

impl Constraint for MaxConsecutiveOff {
    fn id(&self) -> &'static str {
        ids::MAX_CONSECUTIVE_OFF
    }

    fn name(&self) -> &'static str {
        "연속 휴무 제한"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Soft
    }

    fn tier(&self) -> Option<Tier> {
        Some(Tier::One)
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let max = soft_max_days(ctx, self.id(), 2);
        let mut violations = Vec::new();

        for staff in ctx.staff {
            let seed = trailing_streak(ctx, &staff.id, ShiftType::is_off);
            let mut walker = StreakWalker::seeded(seed);

            for date in dates::period_dates(ctx.start_date()) {
                let off = ctx.shift_at(&staff.id, date) == Some(ShiftType::Off);
                let run = walker.step(date, off);
                if run > max {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            Severity::Warning,
                            format!(
                                "{}님: 연속 {}일 휴무 (최대 {}일)",
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

// ======================== gradual-shift-progression ========================

/// A direct D→N transition skips the gradual progression.
#[derive(Debug, Clone, Copy)]
pub struct GradualShiftProgression;

impl Constraint for GradualShiftProgression {
    fn id(&self) -> &'static str {
        ids::GRADUAL_SHIFT_PROGRESSION
    }

    fn name(&self) -> &'static str {
        "점진적 근무 전환"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Soft
    }

    fn tier(&self) -> Option<Tier> {
        Some(Tier::Two)
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let mut violations = Vec::new();

        for staff in ctx.staff {
            for date in dates::period_dates(ctx.start_date()) {
                if ctx.shift_at(&staff.id, date) == Some(ShiftType::Night)
                    && ctx.shift_at(&staff.id, dates::add_days(date, -1)) == Some(ShiftType::Day)
                {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            Severity::Warning,
                            format!(
                                "{}님: D→N 직접 전환 ({}), 이브닝을 거치는 전환을 권장합니다",
                                ctx.staff_name(&staff.id),
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

// ======================== max-same-shift-consecutive ========================

/// Five or more of the same working shift in a row is monotonous.
///
/// Checked per shift kind, seeded from the trail; warns once per streak
/// on the first current-period day the run reaches the limit.
#[derive(Debug, Clone, Copy)]
pub struct MaxSameShiftConsecutive;

impl Constraint for MaxSameShiftConsecutive {
    fn id(&self) -> &'static str {
        ids::MAX_SAME_SHIFT_CONSECUTIVE
    }

    fn name(&self) -> &'static str {
        "동일 근무 연속 제한"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Soft
    }

    fn tier(&self) -> Option<Tier> {
        Some(Tier::Two)
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let mut violations = Vec::new();

        for staff in ctx.staff {
            for kind in ShiftType::WORKING {
                let seed = trailing_streak(ctx, &staff.id, |s| s == kind);
                let mut walker = StreakWalker::seeded(seed);
                let mut reported = false;

                for date in dates::period_dates(ctx.start_date()) {
                    let matches = ctx.shift_at(&staff.id, date) == Some(kind);
                    let run = walker.step(date, matches);
                    if !matches {
                        reported = false;
                        continue;
                    }
                    if run >= SAME_SHIFT_LIMIT && !reported {
                        reported = true;
                        violations.push(
                            Violation::new(
                                self.id(),
                                self.name(),
                                Severity::Warning,
                                format!(
                                    "{}님: {} 근무 연속 {}일 (같은 근무 {}일 이상)",
                                    ctx.staff_name(&staff.id),
                                    kind.display_name(),
                                    run,
                                    SAME_SHIFT_LIMIT
                                ),
                            )
                            .for_staff(&staff.id, ctx.staff_name(&staff.id))
                            .on_date(date)
                            .spanning(walker.span(date)),
                        );
                    }
                }
            }
        }
        CheckResult::found(violations)
    }
}

// ======================== rest-clustering ========================

/// An off day with no off neighbor on either side is isolated rest.
#[derive(Debug, Clone, Copy)]
pub struct RestClustering;

impl Constraint for RestClustering {
    fn id(&self) -> &'static str {
        ids::REST_CLUSTERING
    }

    fn name(&self) -> &'static str {
        "휴무 모아주기"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Soft
    }

    fn tier(&self) -> Option<Tier> {
        Some(Tier::Two)
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let mut violations = Vec::new();

        for staff in ctx.staff {
            for date in dates::period_dates(ctx.start_date()) {
                if ctx.shift_at(&staff.id, date) != Some(ShiftType::Off) {
                    continue;
                }
                let prev = ctx.shift_at(&staff.id, dates::add_days(date, -1));
                let next = ctx.shift_at(&staff.id, dates::add_days(date, 1));
                if prev != Some(ShiftType::Off) && next != Some(ShiftType::Off) {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            Severity::Warning,
                            format!(
                                "{}님: 단독 휴무 ({}), 휴무를 이어서 배치하면 휴식 효과가 큽니다",
                                ctx.staff_name(&staff.id),
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

// ======================== post-rest-day-shift ========================

/// Going straight from an off day into a night undoes the rest.
#[derive(Debug, Clone, Copy)]
pub struct PostRestDayShift;

impl Constraint for PostRestDayShift {
    fn id(&self) -> &'static str {
        ids::POST_REST_DAY_SHIFT
    }

    fn name(&self) -> &'static str {
        "휴무 후 나이트 제한"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Soft
    }

    fn tier(&self) -> Option<Tier> {
        Some(Tier::Two)
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let mut violations = Vec::new();

        for staff in ctx.staff {
            for date in dates::period_dates(ctx.start_date()) {
                if ctx.shift_at(&staff.id, date) == Some(ShiftType::Night)
                    && ctx.shift_at(&staff.id, dates::add_days(date, -1)) == Some(ShiftType::Off)
                {
                    violations.push(
                        Violation::new(
                            self.id(),
                            self.name(),
                            Severity::Warning,
                            format!(
                                "{}님: 휴무 직후 나이트 배정 ({})",
                                ctx.staff_name(&staff.id),
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

// ======================== weekend-fairness ========================

/// Weekend work should spread evenly: anyone more than two weekend
/// shifts above the roster mean gets flagged.
#[derive(Debug, Clone, Copy)]
pub struct WeekendFairness;

impl Constraint for WeekendFairness {
    fn id(&self) -> &'static str {
        ids::WEEKEND_FAIRNESS
    }

    fn name(&self) -> &'static str {
        "주말 근무 형평"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Soft
    }

    fn tier(&self) -> Option<Tier> {
        Some(Tier::Three)
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let mean = ctx.stats.mean_weekend_work(ctx.staff);
        let mut violations = Vec::new();

        for staff in ctx.staff {
            let count = ctx.stats.staff(&staff.id).weekend_work;
            if f64::from(count) > mean + 2.0 {
                violations.push(
                    Violation::new(
                        self.id(),
                        self.name(),
                        Severity::Warning,
                        format!(
                            "{}님: 주말 근무 {}회 (평균 {:.1}회)",
                            ctx.staff_name(&staff.id),
                            count,
                            mean
                        ),
                    )
                    .for_staff(&staff.id, ctx.staff_name(&staff.id)),
                );
            }
        }
        CheckResult::found(violations)
    }
}

// ======================== shift-continuity ========================

/// Too many changes of working shift kind across the period.
#[derive(Debug, Clone, Copy)]
pub struct ShiftContinuity;

impl Constraint for ShiftContinuity {
    fn id(&self) -> &'static str {
        ids::SHIFT_CONTINUITY
    }

    fn name(&self) -> &'static str {
        "근무 일관성"
    }

    fn severity_class(&self) -> SeverityClass {
        SeverityClass::Soft
    }

    fn tier(&self) -> Option<Tier> {
        Some(Tier::Three)
    }

    fn check(&self, ctx: &EvaluationContext) -> CheckResult {
        let mut violations = Vec::new();

        for staff in ctx.staff {
            let worked: Vec<ShiftType> = dates::period_dates(ctx.start_date())
                .filter_map(|d| ctx.shift_at(&staff.id, d))
                .filter(|s| s.is_work())
                .collect();
            let changes = worked.windows(2).filter(|w| w[0] != w[1]).count() as u32;

            if changes > CONTINUITY_LIMIT {
                violations.push(
                    Violation::new(
                        self.id(),
                        self.name(),
                        Severity::Warning,
                        format!(
                            "{}님: 근무 유형 변경 {}회 ({}회 초과)",
                            ctx.staff_name(&staff.id),
                            changes,
                            CONTINUITY_LIMIT
                        ),
                    )
                    .for_staff(&staff.id, ctx.staff_name(&staff.id)),
                );
            }
        }
        CheckResult::found(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConstraintConfig, Schedule, ShiftAssignment, Staff};
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn staff1() -> Vec<Staff> {
        vec![Staff::new("s1", "김간호")]
    }

    fn run(
        constraint: &dyn Constraint,
        schedule: &Schedule,
        staff: &[Staff],
        config: &ConstraintConfig,
        trail: &[ShiftAssignment],
    ) -> Vec<Violation> {
        let ctx = EvaluationContext::new(schedule, staff, config, trail);
        constraint.check(&ctx).violations
    }

    #[test]
    fn test_consecutive_work_seeded_from_trail() {
        // Three trailing work days + three in-period: runs 4, 5, 6.
        let mut schedule = Schedule::new("s", "", d("2025-01-06"));
        for day in ["2025-01-06", "2025-01-07", "2025-01-08"] {
            schedule.upsert(ShiftAssignment::new("s1", d(day), ShiftType::Day));
        }
        let trail = vec![
            ShiftAssignment::new("s1", d("2025-01-05"), ShiftType::Evening),
            ShiftAssignment::new("s1", d("2025-01-04"), ShiftType::Day),
            ShiftAssignment::new("s1", d("2025-01-03"), ShiftType::Night),
        ];
        let mut config = ConstraintConfig::default();
        config
            .soft_constraints
            .get_mut(ids::MAX_CONSECUTIVE_WORK)
            .unwrap()
            .max_days = Some(5);

        let vs = run(&MaxConsecutiveWork, &schedule, &staff1(), &config, &trail);
        assert_eq!(vs.len(), 1); // only day 01-08 exceeds: run 6 > 5
        assert_eq!(vs[0].context.date, Some(d("2025-01-08")));
        assert_eq!(vs[0].severity, Severity::Warning);
        let span = vs[0].context.dates.as_ref().unwrap();
        assert_eq!(span.first().copied(), Some(d("2025-01-03")));
    }

    #[test]
    fn test_isolated_night_flagged() {
        let schedule = Schedule::new("s", "", d("2025-01-06"))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-07"), ShiftType::Day))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-08"), ShiftType::Night))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-09"), ShiftType::Off));
        let vs = run(&NightBlockPolicy, &schedule, &staff1(), &ConstraintConfig::default(), &[]);
        assert_eq!(vs.len(), 1);
        assert_eq!(vs[0].context.date, Some(d("2025-01-08")));
    }

    #[test]
    fn test_night_on_day_zero_not_isolated_with_trail_night() {
        let schedule = Schedule::new("s", "", d("2025-01-06"))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-06"), ShiftType::Night));
        let trail = vec![ShiftAssignment::new("s1", d("2025-01-05"), ShiftType::Night)];
        let vs = run(&NightBlockPolicy, &schedule, &staff1(), &ConstraintConfig::default(), &trail);
        assert!(vs.is_empty());
    }

    #[test]
    fn test_period_off_ceiling() {
        let mut schedule = Schedule::new("s", "", d("2025-01-06"));
        for i in 0..10 {
            schedule.upsert(ShiftAssignment::new(
                "s1",
                dates::add_days(d("2025-01-06"), i),
                ShiftType::Off,
            ));
        }
        let mut config = ConstraintConfig::default();
        config
            .soft_constraints
            .get_mut(ids::MAX_PERIOD_OFF)
            .unwrap()
            .max_off = Some(9);

        let vs = run(&MaxPeriodOff, &schedule, &staff1(), &config, &[]);
        assert_eq!(vs.len(), 1);
        assert_eq!(vs[0].context.dates.as_ref().unwrap().len(), 10);
    }

    #[test]
    fn test_consecutive_off_limit() {
        let mut schedule = Schedule::new("s", "", d("2025-01-06"));
        for day in ["2025-01-06", "2025-01-07", "2025-01-08"] {
            schedule.upsert(ShiftAssignment::new("s1", d(day), ShiftType::Off));
        }
        let vs = run(&MaxConsecutiveOff, &schedule, &staff1(), &ConstraintConfig::default(), &[]);
        // Default limit 2: only the third day exceeds.
        assert_eq!(vs.len(), 1);
        assert_eq!(vs[0].context.date, Some(d("2025-01-08")));
    }

    #[test]
    fn test_day_to_night_progression_across_boundary() {
        let schedule = Schedule::new("s", "", d("2025-01-06"))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-06"), ShiftType::Night));
        let trail = vec![ShiftAssignment::new("s1", d("2025-01-05"), ShiftType::Day)];
        let vs = run(&GradualShiftProgression, &schedule, &staff1(), &ConstraintConfig::default(), &trail);
        assert_eq!(vs.len(), 1);
        assert!(vs[0].message.contains("D→N"));
    }

    #[test]
    fn test_same_shift_streak_warns_once() {
        let mut schedule = Schedule::new("s", "", d("2025-01-06"));
        for i in 0..7 {
            schedule.upsert(ShiftAssignment::new(
                "s1",
                dates::add_days(d("2025-01-06"), i),
                ShiftType::Evening,
            ));
        }
        let vs = run(&MaxSameShiftConsecutive, &schedule, &staff1(), &ConstraintConfig::default(), &[]);
        // One warning on the fifth day, not on days six and seven too.
        assert_eq!(vs.len(), 1);
        assert_eq!(vs[0].context.date, Some(d("2025-01-10")));
    }

    #[test]
    fn test_same_shift_streak_seeded() {
        let mut schedule = Schedule::new("s", "", d("2025-01-06"));
        schedule.upsert(ShiftAssignment::new("s1", d("2025-01-06"), ShiftType::Day));
        let trail: Vec<_> = (1..=4)
            .map(|back| {
                ShiftAssignment::new(
                    "s1",
                    dates::add_days(d("2025-01-06"), -back),
                    ShiftType::Day,
                )
            })
            .collect();
        let vs = run(&MaxSameShiftConsecutive, &schedule, &staff1(), &ConstraintConfig::default(), &trail);
        assert_eq!(vs.len(), 1);
        assert_eq!(vs[0].context.date, Some(d("2025-01-06")));
    }

    #[test]
    fn test_isolated_off_flagged() {
        let schedule = Schedule::new("s", "", d("2025-01-06"))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-07"), ShiftType::Day))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-08"), ShiftType::Off))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-09"), ShiftType::Day));
        let vs = run(&RestClustering, &schedule, &staff1(), &ConstraintConfig::default(), &[]);
        assert_eq!(vs.len(), 1);
        assert_eq!(vs[0].context.date, Some(d("2025-01-08")));
    }

    #[test]
    fn test_off_pair_not_isolated() {
        let schedule = Schedule::new("s", "", d("2025-01-06"))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-08"), ShiftType::Off))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-09"), ShiftType::Off));
        let vs = run(&RestClustering, &schedule, &staff1(), &ConstraintConfig::default(), &[]);
        assert!(vs.is_empty());
    }

    #[test]
    fn test_off_then_night() {
        let schedule = Schedule::new("s", "", d("2025-01-06"))
            .with_assignment(ShiftAssignment::new("s1", d("2025-01-06"), ShiftType::Night));
        let trail = vec![ShiftAssignment::new("s1", d("2025-01-05"), ShiftType::Off)];
        let vs = run(&PostRestDayShift, &schedule, &staff1(), &ConstraintConfig::default(), &trail);
        assert_eq!(vs.len(), 1);
        assert_eq!(vs[0].context.date, Some(d("2025-01-06")));
    }

    #[test]
    fn test_weekend_fairness_outlier() {
        let staff = vec![
            Staff::new("s1", "김간호"),
            Staff::new("s2", "이간호"),
            Staff::new("s3", "박간호"),
        ];
        let mut schedule = Schedule::new("s", "", d("2025-01-06"));
        // s1 works every weekend slot (8 weekend days in 4 weeks).
        for date in dates::period_dates(d("2025-01-06")).filter(|d| dates::is_weekend(*d)) {
            schedule.upsert(ShiftAssignment::new("s1", date, ShiftType::Day));
        }
        let vs = run(&WeekendFairness, &schedule, &staff, &ConstraintConfig::default(), &[]);
        // mean = 8/3 ≈ 2.67; s1 at 8 > 4.67.
        assert_eq!(vs.len(), 1);
        assert_eq!(vs[0].context.staff_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_weekend_fairness_even_split_silent() {
        let staff = vec![Staff::new("s1", "김간호"), Staff::new("s2", "이간호")];
        let mut schedule = Schedule::new("s", "", d("2025-01-06"));
        for date in dates::period_dates(d("2025-01-06")).filter(|d| dates::is_weekend(*d)) {
            schedule.upsert(ShiftAssignment::new("s1", date, ShiftType::Day));
            schedule.upsert(ShiftAssignment::new("s2", date, ShiftType::Day));
        }
        let vs = run(&WeekendFairness, &schedule, &staff, &ConstraintConfig::default(), &[]);
        assert!(vs.is_empty());
    }

    #[test]
    fn test_shift_continuity_churn() {
        let mut schedule = Schedule::new("s", "", d("2025-01-06"));
        // Alternate D/E for 24 days: 23 changes.
        for i in 0..24 {
            let shift = if i % 2 == 0 { ShiftType::Day } else { ShiftType::Evening };
            schedule.upsert(ShiftAssignment::new(
                "s1",
                dates::add_days(d("2025-01-06"), i),
                shift,
            ));
        }
        let vs = run(&ShiftContinuity, &schedule, &staff1(), &ConstraintConfig::default(), &[]);
        assert_eq!(vs.len(), 1);
        assert!(vs[0].message.contains("23회"));
    }

    #[test]
    fn test_shift_continuity_ignores_off_gaps() {
        let mut schedule = Schedule::new("s", "", d("2025-01-06"));
        // D, Off, D ... same kind around rest days is no change.
        for i in 0..12 {
            let shift = if i % 2 == 0 { ShiftType::Day } else { ShiftType::Off };
            schedule.upsert(ShiftAssignment::new(
                "s1",
                dates::add_days(d("2025-01-06"), i),
                shift,
            ));
        }
        let vs = run(&ShiftContinuity, &schedule, &staff1(), &ConstraintConfig::default(), &[]);
        assert!(vs.is_empty());
    }
}
