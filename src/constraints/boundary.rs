//! Previous-period boundary protocol.
//!
//! Every consecutive-X constraint seeds its streak from the trailing days
//! of the previous period: walk backward from day −1, at most seven days,
//! counting while the assignment satisfies the streak predicate. A gap
//! (unassigned day) or a non-matching shift breaks the chain. The seed
//! count and the remembered streak start then thread into the current
//! period so a violation's `dates` can span the boundary.

use chrono::NaiveDate;

use crate::dates::{self, TRAIL_DAYS};
use crate::models::ShiftType;

use super::EvaluationContext;

/// A streak carried in from the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrailingStreak {
    /// Consecutive matching days ending at day −1.
    pub len: u32,
    /// Earliest day of the trailing streak (`None` when `len == 0`).
    pub start: Option<NaiveDate>,
}

impl TrailingStreak {
    pub(crate) const NONE: TrailingStreak = TrailingStreak {
        len: 0,
        start: None,
    };
}

/// Counts the trailing days before the period start whose shift satisfies
/// `pred`, stopping at the first gap, non-matching day, or after seven
/// days.
pub(crate) fn trailing_streak<P>(
    ctx: &EvaluationContext,
    staff_id: &str,
    pred: P,
) -> TrailingStreak
where
    P: Fn(ShiftType) -> bool,
{
    let start = ctx.start_date();
    let mut streak = TrailingStreak::NONE;

    for back in 1..=TRAIL_DAYS {
        let date = dates::add_days(start, -back);
        match ctx.shift_at(staff_id, date) {
            Some(shift) if pred(shift) => {
                streak.len += 1;
                streak.start = Some(date);
            }
            _ => break,
        }
    }
    streak
}

/// Running streak walker for the current period.
///
/// Feed it each period day in order; it extends or resets the streak and
/// reports the current length and span start.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StreakWalker {
    len: u32,
    start: Option<NaiveDate>,
}

impl StreakWalker {
    /// Starts from a trailing seed.
    pub(crate) fn seeded(seed: TrailingStreak) -> Self {
        Self {
            len: seed.len,
            start: seed.start,
        }
    }

    /// Advances one day. `matches` is whether the day's assignment
    /// satisfies the streak predicate (a gap never matches).
    ///
    /// Returns the running streak length after this day.
    pub(crate) fn step(&mut self, date: NaiveDate, matches: bool) -> u32 {
        if matches {
            if self.len == 0 {
                self.start = Some(date);
            }
            self.len += 1;
        } else {
            self.len = 0;
            self.start = None;
        }
        self.len
    }

    /// Current streak length.
    pub(crate) fn len(&self) -> u32 {
        self.len
    }

    /// The dates the streak spans, from its (possibly previous-period)
    /// start through `until` inclusive.
    pub(crate) fn span(&self, until: NaiveDate) -> Vec<NaiveDate> {
        let Some(start) = self.start else {
            return vec![until];
        };
        let days = (until - start).num_days().max(0);
        (0..=days).map(|i| dates::add_days(start, i)).collect()
    }
}
