//! Attendance normalization: turn raw clock-in/out strings into an ordered,
//! defaulted pair of times.

use crate::core::clock::{Minutes, format_time, parse_time};

/// A normalized attendance interval. Both ends are always present and
/// `clock_in <= clock_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedAttendance {
    pub clock_in: Minutes,
    pub clock_out: Minutes,
}

impl NormalizedAttendance {
    pub fn clock_in_str(&self) -> String {
        format_time(self.clock_in)
    }

    pub fn clock_out_str(&self) -> String {
        format_time(self.clock_out)
    }

    /// Span in minutes, before break subtraction. Never negative.
    pub fn raw_minutes(&self) -> Minutes {
        self.clock_out - self.clock_in
    }
}

/// Normalize a raw clock-in/out pair.
///
/// - both absent (or unparseable) → the canonical shift
/// - exactly one absent → copied from the other, a zero-duration stamp
/// - recorded in the wrong order → swapped
///
/// Total and idempotent: re-normalizing the formatted output is a no-op.
pub fn normalize(
    raw_in: Option<&str>,
    raw_out: Option<&str>,
    shift_start: Minutes,
    shift_end: Minutes,
) -> NormalizedAttendance {
    let t_in = raw_in.and_then(parse_time);
    let t_out = raw_out.and_then(parse_time);

    let (t_in, t_out) = match (t_in, t_out) {
        (None, None) => (shift_start, shift_end),
        (Some(i), None) => (i, i),
        (None, Some(o)) => (o, o),
        (Some(i), Some(o)) => (i, o),
    };

    NormalizedAttendance {
        clock_in: t_in.min(t_out),
        clock_out: t_in.max(t_out),
    }
}
