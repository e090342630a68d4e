//! Per-(user, date) reconciliation orchestration shared by the report
//! commands.

use chrono::{NaiveDate, NaiveDateTime};

use crate::core::breaks::subtract_break_overlap;
use crate::core::clock::Minutes;
use crate::core::merge::{logged_minutes, merge_sessions};
use crate::core::normalize::normalize;
use crate::core::reconcile::{ReportPolicy, reconcile};
use crate::models::attendance::AttendanceRecord;
use crate::models::break_window::BreakWindow;
use crate::models::day_report::DayReport;
use crate::models::work_session::WorkSession;

/// Everything one day's reconciliation reads. The break-window slice is a
/// snapshot taken once per batch run, so attendance and logged minutes are
/// always computed against the same table.
pub struct DayInputs<'a> {
    pub user: &'a str,
    pub date: NaiveDate,
    pub attendance: Option<&'a AttendanceRecord>,
    pub sessions: &'a [WorkSession],
    pub windows: &'a [BreakWindow],
    pub now: NaiveDateTime,
}

/// Shift defaults and merge tolerance, resolved from config by the caller.
#[derive(Debug, Clone, Copy)]
pub struct DayDefaults {
    pub shift_start: Minutes,
    pub shift_end: Minutes,
    pub merge_tolerance: Minutes,
}

pub fn reconcile_day(inputs: &DayInputs, defaults: &DayDefaults, policy: &ReportPolicy) -> DayReport {
    // Attendance side: normalize, then subtract break overlap.
    let norm = normalize(
        inputs.attendance.and_then(|a| a.clock_in.as_deref()),
        inputs.attendance.and_then(|a| a.clock_out.as_deref()),
        defaults.shift_start,
        defaults.shift_end,
    );
    let attendance_minutes =
        subtract_break_overlap(norm.clock_in, norm.clock_out, inputs.windows);

    // Session side: merge into busy intervals, optionally pre-clamp, then
    // subtract break overlap per interval.
    let mut busy = merge_sessions(
        inputs.date,
        inputs.sessions,
        inputs.now,
        defaults.merge_tolerance,
    );
    if let Some(clamp) = policy.pre_clamp {
        for iv in &mut busy {
            if iv.start < clamp {
                iv.start = clamp.min(iv.end);
            }
        }
    }
    let logged = logged_minutes(&busy, inputs.windows);

    let discrepancy = reconcile(attendance_minutes, logged, policy);

    DayReport {
        user: inputs.user.to_string(),
        date: inputs.date,
        clock_in: norm.clock_in_str(),
        clock_out: norm.clock_out_str(),
        busy,
        discrepancy,
    }
}
