//! Break-overlap subtraction.

use crate::core::clock::{DAY_MIN, Minutes};
use crate::models::break_window::{BreakKind, BreakWindow};

/// Worked minutes of `[start, end]` after removing overlap with the active
/// standard break windows.
///
/// `end >= start`; `end` may exceed 1439 for intervals spilling past
/// midnight. A window whose end precedes its start wraps midnight and is
/// treated as ending at `end + 1440`.
///
/// Overlapping windows are not deduplicated — their overlaps sum
/// independently. Keeping the table disjoint is the administrator's job.
pub fn subtract_break_overlap(start: Minutes, end: Minutes, windows: &[BreakWindow]) -> Minutes {
    let base = (end - start).max(0);

    let mut overlap_total: Minutes = 0;
    for w in windows {
        if !w.active || w.kind == BreakKind::PreShiftExempt {
            continue;
        }

        let actual_end = if w.wraps_midnight() {
            w.end_min + DAY_MIN
        } else {
            w.end_min
        };

        let overlap = end.min(actual_end) - start.max(w.start_min);
        if overlap > 0 {
            overlap_total += overlap;
        }
    }

    (base - overlap_total).max(0)
}
