//! Session interval merging: collapse a day's (possibly overlapping,
//! possibly still-open) work-sessions into disjoint busy intervals.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::core::breaks::subtract_break_overlap;
use crate::core::clock::{DAY_MIN, Minutes};
use crate::models::break_window::{BreakKind, BreakWindow};
use crate::models::work_session::WorkSession;

/// A single session projected onto the minute space of its work date.
/// `end` exceeds 1439 when the session spills past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSpan {
    pub start: Minutes,
    pub end: Minutes,
}

/// Merged, disjoint output of the sweep, ascending by start.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: Minutes,
    pub end: Minutes,
}

/// Gap up to which two sessions are considered contiguous. Absorbs
/// clock-rounding noise between consecutive task switches.
pub const MERGE_TOLERANCE_MIN: Minutes = 1;

/// Project a session onto its work date's minute space.
///
/// Open sessions run until `now`. An end instant on a later calendar day
/// adds 1440 per day so downstream overlap math works uniformly. An end
/// before the start (clock skew) collapses to a zero-length span.
pub fn session_span(
    work_date: NaiveDate,
    session: &WorkSession,
    now: NaiveDateTime,
) -> SessionSpan {
    let start = minute_of(work_date, session.started_at).max(0);
    let end = minute_of(work_date, session.ended_at.unwrap_or(now));

    SessionSpan {
        start,
        end: end.max(start),
    }
}

fn minute_of(work_date: NaiveDate, instant: NaiveDateTime) -> Minutes {
    let day_offset = (instant.date() - work_date).num_days();
    let t = instant.time();
    day_offset * DAY_MIN + i64::from(t.hour()) * 60 + i64::from(t.minute())
}

/// Sweep spans in start order into disjoint busy intervals.
///
/// A span merges into the trailing interval unless it is separated from it
/// by more than `tolerance` minutes; merging extends the interval to the
/// union of the two.
pub fn merge_spans(spans: &[SessionSpan], tolerance: Minutes) -> Vec<BusyInterval> {
    let mut sorted = spans.to_vec();
    sorted.sort_by_key(|s| (s.start, s.end));

    let mut merged: Vec<BusyInterval> = Vec::new();

    for span in sorted {
        match merged.last_mut() {
            Some(last) if span.start <= last.end + tolerance => {
                last.start = last.start.min(span.start);
                last.end = last.end.max(span.end);
            }
            _ => merged.push(BusyInterval {
                start: span.start,
                end: span.end,
            }),
        }
    }

    merged
}

/// Effective start of an interval after the pre-shift carve-out.
///
/// Work logged before the official shift begins does not count: an interval
/// starting before the end of an active pre-shift-exempt window is clamped
/// forward to that window's end instead of having the window subtracted.
fn clamp_pre_shift(interval: &BusyInterval, windows: &[BreakWindow]) -> Minutes {
    let mut start = interval.start;
    for w in windows {
        if w.active && w.kind == BreakKind::PreShiftExempt && start < w.end_min {
            start = w.end_min.min(interval.end);
        }
    }
    start
}

/// Total logged minutes: per interval, apply the pre-shift clamp, then
/// subtract standard break overlap; sum across intervals.
pub fn logged_minutes(intervals: &[BusyInterval], windows: &[BreakWindow]) -> Minutes {
    intervals
        .iter()
        .map(|iv| {
            let start = clamp_pre_shift(iv, windows);
            subtract_break_overlap(start, iv.end, windows)
        })
        .sum()
}

/// Convenience: sessions for one user/day straight to merged intervals.
pub fn merge_sessions(
    work_date: NaiveDate,
    sessions: &[WorkSession],
    now: NaiveDateTime,
    tolerance: Minutes,
) -> Vec<BusyInterval> {
    let spans: Vec<SessionSpan> = sessions
        .iter()
        .map(|s| session_span(work_date, s, now))
        .collect();
    merge_spans(&spans, tolerance)
}
