//! Formatting utilities used for CLI outputs.

/// Render a minute total as a human-readable duration.
///
/// `want_sign` adds an explicit "+"/"-" (zero gets no sign), `short` picks
/// the compact `HH:MM` form over `HHh MMm`.
pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}
