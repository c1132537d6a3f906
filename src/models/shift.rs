//! Shift kinds, staff, and per-cell assignments.
//!
//! A roster cell is one `(staff, date)` pair holding a [`ShiftType`].
//! Assignments may be `locked`, which tells the auto-generator to keep
//! them untouched when it fills the rest of the grid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the four shift states a roster cell can hold.
///
/// Serialized in lowercase on the wire (`"day" | "evening" | "night" | "off"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    /// Day shift (D).
    Day,
    /// Evening shift (E).
    Evening,
    /// Night shift (N).
    Night,
    /// Rest day.
    Off,
}

impl ShiftType {
    /// Whether this shift is a working shift (anything but Off).
    #[inline]
    pub fn is_work(self) -> bool {
        !matches!(self, ShiftType::Off)
    }

    /// Whether this is a night shift.
    #[inline]
    pub fn is_night(self) -> bool {
        matches!(self, ShiftType::Night)
    }

    /// Whether this is a rest day.
    #[inline]
    pub fn is_off(self) -> bool {
        matches!(self, ShiftType::Off)
    }

    /// Single-letter grid label (D/E/N/-).
    pub fn label(self) -> &'static str {
        match self {
            ShiftType::Day => "D",
            ShiftType::Evening => "E",
            ShiftType::Night => "N",
            ShiftType::Off => "-",
        }
    }

    /// Korean display name as shown in violation messages.
    pub fn display_name(self) -> &'static str {
        match self {
            ShiftType::Day => "데이",
            ShiftType::Evening => "이브닝",
            ShiftType::Night => "나이트",
            ShiftType::Off => "휴무",
        }
    }

    /// The three working shift kinds, in grid order.
    pub const WORKING: [ShiftType; 3] = [ShiftType::Day, ShiftType::Evening, ShiftType::Night];
}

/// A staff member on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Staff {
    /// Creates a staff member.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A single roster cell: one staff member's shift on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAssignment {
    /// Staff this cell belongs to.
    pub staff_id: String,
    /// Calendar date (wire form `YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Assigned shift.
    pub shift: ShiftType,
    /// Locked cells survive auto-generation merges untouched.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
}

impl ShiftAssignment {
    /// Creates an unlocked assignment.
    pub fn new(staff_id: impl Into<String>, date: NaiveDate, shift: ShiftType) -> Self {
        Self {
            staff_id: staff_id.into(),
            date,
            shift,
            locked: false,
        }
    }

    /// Marks the assignment as locked.
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}
