//! Static config sanity checks.
//!
//! Catches configurations that can never produce a feasible roster
//! before any cell is filled: empty rosters, per-day coverage demands
//! exceeding headcount, night-shift demand exceeding supply, and
//! degenerate limits. Advisory only; the feasibility checker still runs
//! whatever the user configured.

use crate::dates::PERIOD_DAYS;
use crate::models::ConstraintConfig;

/// Categories of configuration warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarningKind {
    /// No staff on the roster.
    NoStaff,
    /// A day's combined minimums exceed the roster size.
    CoverageInfeasible,
    /// Required nights across the period exceed what staff can supply.
    NightSupplyShort,
    /// maxConsecutiveNights below 1 forbids nights entirely.
    InvalidNightLimit,
}

/// An advisory configuration warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub kind: ConfigWarningKind,
    pub message: String,
}

impl ConfigWarning {
    fn new(kind: ConfigWarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a configuration against the roster size.
///
/// Returns all detected issues; an empty list means the configuration is
/// at least arithmetically satisfiable.
pub fn validate_config(config: &ConstraintConfig, staff_count: usize) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if staff_count == 0 {
        warnings.push(ConfigWarning::new(
            ConfigWarningKind::NoStaff,
            "직원이 없습니다. 근무표를 생성하려면 직원을 추가하세요",
        ));
        return warnings;
    }

    let weekday_min = config.weekday_staffing.total_min();
    if weekday_min as usize > staff_count {
        warnings.push(ConfigWarning::new(
            ConfigWarningKind::CoverageInfeasible,
            format!(
                "평일 최소 인원 합계 {}명이 전체 직원 {}명을 초과합니다",
                weekday_min, staff_count
            ),
        ));
    }
    let weekend_min = config.weekend_staffing.total_min();
    if weekend_min as usize > staff_count {
        warnings.push(ConfigWarning::new(
            ConfigWarningKind::CoverageInfeasible,
            format!(
                "주말 최소 인원 합계 {}명이 전체 직원 {}명을 초과합니다",
                weekend_min, staff_count
            ),
        ));
    }

    // Nights demanded over the period vs. nights staff can work.
    let min_night = config
        .weekday_staffing
        .night
        .min
        .max(config.weekend_staffing.night.min) as u64;
    let required_nights = min_night * PERIOD_DAYS as u64;
    let available_nights = staff_count as u64 * config.monthly_nights_required as u64;
    if required_nights > available_nights {
        warnings.push(ConfigWarning::new(
            ConfigWarningKind::NightSupplyShort,
            format!(
                "기간 전체 나이트 수요 {}개가 공급 가능량 {}개(직원 {}명 × 월 {}개)를 초과합니다",
                required_nights, available_nights, staff_count, config.monthly_nights_required
            ),
        ));
    }

    if config.max_consecutive_nights < 1 {
        warnings.push(ConfigWarning::new(
            ConfigWarningKind::InvalidNightLimit,
            "최대 연속 나이트는 1 이상이어야 합니다",
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_staff() {
        let warnings = validate_config(&ConstraintConfig::default(), 0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ConfigWarningKind::NoStaff);
    }

    #[test]
    fn test_default_config_with_enough_staff() {
        // Default minimums: weekday 3+2+2=7; night supply 12×6=72 ≥ 2×28.
        let warnings = validate_config(&ConstraintConfig::default(), 12);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_coverage_infeasible() {
        let warnings = validate_config(&ConstraintConfig::default(), 5);
        assert!(warnings
            .iter()
            .any(|w| w.kind == ConfigWarningKind::CoverageInfeasible));
    }

    #[test]
    fn test_night_supply_short() {
        let mut config = ConstraintConfig::default();
        config.monthly_nights_required = 2;
        // 8 staff clear the coverage check (7 weekday min) but supply only
        // 16 nights against a demand of 56.
        let warnings = validate_config(&config, 8);
        assert!(warnings
            .iter()
            .any(|w| w.kind == ConfigWarningKind::NightSupplyShort));
    }

    #[test]
    fn test_invalid_night_limit() {
        let mut config = ConstraintConfig::default();
        config.max_consecutive_nights = 0;
        let warnings = validate_config(&config, 12);
        assert!(warnings
            .iter()
            .any(|w| w.kind == ConfigWarningKind::InvalidNightLimit));
    }
}
