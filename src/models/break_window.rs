use crate::core::clock::{Minutes, format_time};
use serde::Serialize;

/// Administrator-maintained unpaid break window, global to all users.
///
/// `end_min < start_min` means the window crosses midnight (e.g. 23:00–00:30).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BreakWindow {
    pub id: i64,
    pub label: String,
    pub start_min: Minutes,
    pub end_min: Minutes,
    pub kind: BreakKind,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum BreakKind {
    /// Subtracted from any overlapping work interval.
    Standard,
    /// Never subtracted; busy intervals starting before its end are clamped
    /// forward to it instead (work before the official shift does not count).
    PreShiftExempt,
}

impl BreakKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            BreakKind::Standard => "standard",
            BreakKind::PreShiftExempt => "pre_shift_exempt",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(BreakKind::Standard),
            "pre_shift_exempt" => Some(BreakKind::PreShiftExempt),
            _ => None,
        }
    }

    /// Parse a CLI spelling (`standard`, `pre-shift-exempt`).
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "standard" | "std" => Some(BreakKind::Standard),
            "pre_shift_exempt" | "pre_shift" => Some(BreakKind::PreShiftExempt),
            _ => None,
        }
    }
}

impl BreakWindow {
    pub fn start_str(&self) -> String {
        format_time(self.start_min)
    }

    pub fn end_str(&self) -> String {
        format_time(self.end_min)
    }

    pub fn wraps_midnight(&self) -> bool {
        self.end_min < self.start_min
    }
}
