//! Minute-of-day clock model: parsing HH:MM into minutes and back.
//!
//! Attendance and break times live in a flat minute space (0..=1439 for a
//! civil day, values above 1439 represent spill into the next day). The
//! parser is total: anything that does not read as a valid time becomes
//! `None` and is defaulted upstream, so one malformed legacy string can
//! never abort a report batch.

/// Minutes since 00:00 of the business date.
pub type Minutes = i64;

/// Minutes in one civil day.
pub const DAY_MIN: Minutes = 1440;

/// Parse `"HH:MM"` into a minute-of-day value.
///
/// Requires exactly two numeric parts; the total must land in [0, 1439].
/// Out-of-range or malformed input yields `None`, never an error.
pub fn parse_time(s: &str) -> Option<Minutes> {
    let mut parts = s.split(':');
    let hh = parts.next()?.trim().parse::<i64>().ok()?;
    let mm = parts.next()?.trim().parse::<i64>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let total = hh * 60 + mm;
    if (0..DAY_MIN).contains(&total) {
        Some(total)
    } else {
        None
    }
}

/// Format a minute-of-day value as `"HH:MM"`.
///
/// Input is clamped into [0, 1439] first, which keeps the formatter total.
pub fn format_time(minutes: Minutes) -> String {
    let m = minutes.clamp(0, DAY_MIN - 1);
    format!("{:02}:{:02}", m / 60, m % 60)
}
