//! Calendar arithmetic for the 28-day roster period.
//!
//! # Conventions
//!
//! - Day-of-week numbering is **0=Sunday .. 6=Saturday** everywhere,
//!   including on the wire. Consumers that count from Monday translate
//!   with [`python_weekday`].
//! - A period is the half-open interval `[start, start + 28)`.
//! - The previous-period trail covers `[start - 7, start)`.

use chrono::{Datelike, Duration, NaiveDate};

/// Length of one roster period in days.
pub const PERIOD_DAYS: i64 = 28;

/// Number of weeks in one period.
pub const PERIOD_WEEKS: i64 = 4;

/// Maximum length of the previous-period trail in days.
pub const TRAIL_DAYS: i64 = 7;

/// Day of week with 0=Sunday .. 6=Saturday.
#[inline]
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Whether the date falls on Saturday or Sunday.
#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(day_of_week(date), 0 | 6)
}

/// The date `days` after `date` (negative moves backward).
#[inline]
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Whether `date` lies within the period `[start, start + 28)`.
#[inline]
pub fn period_contains(start: NaiveDate, date: NaiveDate) -> bool {
    date >= start && date < add_days(start, PERIOD_DAYS)
}

/// Whether `date` lies within the trail window `[start - 7, start)`.
#[inline]
pub fn trail_contains(start: NaiveDate, date: NaiveDate) -> bool {
    date >= add_days(start, -TRAIL_DAYS) && date < start
}

/// Iterates the 28 dates of the period starting at `start`.
pub fn period_dates(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..PERIOD_DAYS).map(move |i| add_days(start, i))
}

/// The seven dates of week `week` (0..4) within the period.
pub fn week_dates(start: NaiveDate, week: usize) -> impl Iterator<Item = NaiveDate> {
    let base = add_days(start, week as i64 * 7);
    (0..7).map(move |i| add_days(base, i))
}

/// Which week of the period (0..4) a date falls in, if any.
pub fn week_index(start: NaiveDate, date: NaiveDate) -> Option<usize> {
    if !period_contains(start, date) {
        return None;
    }
    Some(((date - start).num_days() / 7) as usize)
}

/// Translates a 0=Sunday day number to the 0=Monday convention used by
/// Python's `date.weekday()` on the solver side.
#[inline]
pub fn python_weekday(sunday_based: u8) -> u8 {
    (sunday_based + 6) % 7
}

/// Korean weekday name for a 0=Sunday day number.
pub fn weekday_name(sunday_based: u8) -> &'static str {
    match sunday_based % 7 {
        0 => "일요일",
        1 => "월요일",
        2 => "화요일",
        3 => "수요일",
        4 => "목요일",
        5 => "금요일",
        _ => "토요일",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_day_of_week_sunday_based() {
        assert_eq!(day_of_week(d("2025-01-05")), 0); // Sunday
        assert_eq!(day_of_week(d("2025-01-06")), 1); // Monday
        assert_eq!(day_of_week(d("2025-01-11")), 6); // Saturday
    }

    #[test]
    fn test_weekend() {
        assert!(is_weekend(d("2025-01-04"))); // Sat
        assert!(is_weekend(d("2025-01-05"))); // Sun
        assert!(!is_weekend(d("2025-01-06"))); // Mon
    }

    #[test]
    fn test_period_bounds() {
        let start = d("2025-01-06");
        assert!(period_contains(start, start));
        assert!(period_contains(start, d("2025-02-02"))); // day 27
        assert!(!period_contains(start, d("2025-02-03"))); // day 28, exclusive
        assert!(!period_contains(start, d("2025-01-05")));
    }

    #[test]
    fn test_trail_bounds() {
        let start = d("2025-01-06");
        assert!(trail_contains(start, d("2025-01-05"))); // day -1
        assert!(trail_contains(start, d("2024-12-30"))); // day -7
        assert!(!trail_contains(start, d("2024-12-29"))); // day -8
        assert!(!trail_contains(start, start));
    }

    #[test]
    fn test_period_dates_count() {
        let dates: Vec<_> = period_dates(d("2025-01-06")).collect();
        assert_eq!(dates.len(), 28);
        assert_eq!(dates[0], d("2025-01-06"));
        assert_eq!(dates[27], d("2025-02-02"));
    }

    #[test]
    fn test_week_slicing() {
        let start = d("2025-01-06");
        let w1: Vec<_> = week_dates(start, 0).collect();
        assert_eq!(w1.first().copied(), Some(d("2025-01-06")));
        assert_eq!(w1.last().copied(), Some(d("2025-01-12")));

        assert_eq!(week_index(start, d("2025-01-12")), Some(0));
        assert_eq!(week_index(start, d("2025-01-13")), Some(1));
        assert_eq!(week_index(start, d("2025-02-02")), Some(3));
        assert_eq!(week_index(start, d("2025-02-03")), None);
    }

    #[test]
    fn test_python_weekday_translation() {
        assert_eq!(python_weekday(0), 6); // Sunday → 6
        assert_eq!(python_weekday(1), 0); // Monday → 0
        assert_eq!(python_weekday(6), 5); // Saturday → 5
    }
}
