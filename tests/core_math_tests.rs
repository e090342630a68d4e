//! Library-level tests for the reconciliation math.

use shoptally::core::breaks::subtract_break_overlap;
use shoptally::core::clock::{format_time, parse_time};
use shoptally::core::merge::{BusyInterval, SessionSpan, logged_minutes, merge_spans};
use shoptally::core::normalize::normalize;
use shoptally::core::reconcile::{ReportPolicy, reconcile};
use shoptally::models::break_window::{BreakKind, BreakWindow};

fn window(start: &str, end: &str, kind: BreakKind, active: bool) -> BreakWindow {
    BreakWindow {
        id: 0,
        label: "test".to_string(),
        start_min: parse_time(start).unwrap(),
        end_min: parse_time(end).unwrap(),
        kind,
        active,
    }
}

// ---------------------------------------------------------------------------
// Clock model
// ---------------------------------------------------------------------------

#[test]
fn test_parse_time_valid() {
    assert_eq!(parse_time("00:00"), Some(0));
    assert_eq!(parse_time("08:30"), Some(510));
    assert_eq!(parse_time("23:59"), Some(1439));
}

#[test]
fn test_parse_time_invalid_is_none_never_panics() {
    assert_eq!(parse_time("24:00"), None); // out of range
    assert_eq!(parse_time("ab:cd"), None);
    assert_eq!(parse_time("0830"), None); // no separator
    assert_eq!(parse_time("08:30:00"), None); // too many parts
    assert_eq!(parse_time(""), None);
}

#[test]
fn test_format_time_clamps() {
    assert_eq!(format_time(510), "08:30");
    assert_eq!(format_time(-10), "00:00");
    assert_eq!(format_time(99_999), "23:59");
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

const SHIFT_START: i64 = 510; // 08:30
const SHIFT_END: i64 = 1050; // 17:30

#[test]
fn test_normalize_defaults_when_both_absent() {
    let n = normalize(None, None, SHIFT_START, SHIFT_END);
    assert_eq!(n.clock_in_str(), "08:30");
    assert_eq!(n.clock_out_str(), "17:30");
    assert_eq!(n.raw_minutes(), 540);
}

#[test]
fn test_normalize_single_stamp_is_zero_duration() {
    let n = normalize(Some("09:15"), None, SHIFT_START, SHIFT_END);
    assert_eq!(n.clock_in, n.clock_out);
    assert_eq!(n.raw_minutes(), 0);

    let n = normalize(None, Some("18:00"), SHIFT_START, SHIFT_END);
    assert_eq!(n.clock_in_str(), "18:00");
    assert_eq!(n.clock_out_str(), "18:00");
}

#[test]
fn test_normalize_order_tolerance() {
    let a = normalize(Some("17:00"), Some("08:00"), SHIFT_START, SHIFT_END);
    let b = normalize(Some("08:00"), Some("17:00"), SHIFT_START, SHIFT_END);
    assert_eq!(a, b);
    assert_eq!(a.raw_minutes(), 540);
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalize(Some("17:00"), Some("08:00"), SHIFT_START, SHIFT_END);
    let twice = normalize(
        Some(&once.clock_in_str()),
        Some(&once.clock_out_str()),
        SHIFT_START,
        SHIFT_END,
    );
    assert_eq!(once, twice);
}

#[test]
fn test_normalize_malformed_treated_as_absent() {
    let n = normalize(Some("late"), Some("17:00"), SHIFT_START, SHIFT_END);
    // malformed clock-in collapses onto the clock-out stamp
    assert_eq!(n.clock_in_str(), "17:00");
    assert_eq!(n.raw_minutes(), 0);
}

// ---------------------------------------------------------------------------
// Break subtraction
// ---------------------------------------------------------------------------

#[test]
fn test_no_breaks_passthrough() {
    assert_eq!(subtract_break_overlap(510, 1050, &[]), 540);
}

#[test]
fn test_break_subtraction_boundary() {
    let lunch = window("12:00", "13:20", BreakKind::Standard, true);

    // 08:30–16:30 is 480 min; the 80-min lunch leaves 400.
    assert_eq!(subtract_break_overlap(510, 990, &[lunch.clone()]), 400);
    // the full 08:30–17:30 shift is 540 min; same lunch leaves 460.
    assert_eq!(subtract_break_overlap(510, 1050, &[lunch]), 460);
}

#[test]
fn test_inactive_window_ignored() {
    let lunch = window("12:00", "13:00", BreakKind::Standard, false);
    assert_eq!(subtract_break_overlap(510, 1050, &[lunch]), 540);
}

#[test]
fn test_overnight_break_wraparound() {
    // work 22:00–01:00 represented as 1320–1500, break 23:00–00:30
    let night = window("23:00", "00:30", BreakKind::Standard, true);
    assert_eq!(subtract_break_overlap(1320, 1500, &[night]), 180 - 90);
}

#[test]
fn test_overlapping_windows_sum_independently() {
    // two identical windows double-subtract; keeping the table disjoint
    // is the administrator's responsibility
    let w1 = window("12:00", "13:00", BreakKind::Standard, true);
    let w2 = window("12:00", "13:00", BreakKind::Standard, true);
    assert_eq!(subtract_break_overlap(510, 1050, &[w1, w2]), 540 - 120);
}

#[test]
fn test_subtraction_never_negative() {
    let all_day = window("00:00", "23:59", BreakKind::Standard, true);
    assert_eq!(subtract_break_overlap(600, 660, &[all_day]), 0);
}

// ---------------------------------------------------------------------------
// Session merging
// ---------------------------------------------------------------------------

fn span(start: i64, end: i64) -> SessionSpan {
    SessionSpan { start, end }
}

#[test]
fn test_merge_within_tolerance() {
    // 09:00–10:00 and 10:01–11:00: the 1-minute gap merges
    let merged = merge_spans(&[span(540, 600), span(601, 660)], 1);
    assert_eq!(merged, vec![BusyInterval { start: 540, end: 660 }]);
}

#[test]
fn test_merge_beyond_tolerance_stays_split() {
    // 09:00–10:00 and 10:02–11:00: two minutes apart, no merge
    let merged = merge_spans(&[span(540, 600), span(602, 660)], 1);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0], BusyInterval { start: 540, end: 600 });
    assert_eq!(merged[1], BusyInterval { start: 602, end: 660 });
}

#[test]
fn test_overlapping_sessions_not_double_counted() {
    // concurrent work on two tasks covers one physical hour
    let merged = merge_spans(&[span(540, 600), span(550, 590)], 1);
    assert_eq!(merged, vec![BusyInterval { start: 540, end: 600 }]);
    assert_eq!(logged_minutes(&merged, &[]), 60);
}

#[test]
fn test_merge_unsorted_input() {
    let merged = merge_spans(&[span(700, 720), span(540, 600)], 1);
    assert_eq!(merged.len(), 2);
    assert!(merged[0].start < merged[1].start);
}

#[test]
fn test_logged_minutes_subtracts_breaks_per_interval() {
    let lunch = window("12:00", "13:00", BreakKind::Standard, true);
    // 09:00–17:00 crosses lunch once
    let merged = merge_spans(&[span(540, 1020)], 1);
    assert_eq!(logged_minutes(&merged, &[lunch]), 480 - 60);
}

#[test]
fn test_pre_shift_exempt_clamps_instead_of_subtracting() {
    let morning = window("06:00", "08:30", BreakKind::PreShiftExempt, true);

    // work logged from 05:00 to 12:00: everything before 08:30 is dropped
    let merged = merge_spans(&[span(300, 720)], 1);
    assert_eq!(logged_minutes(&merged, &[morning.clone()]), 720 - 510);

    // an interval entirely after the window is untouched
    let merged = merge_spans(&[span(540, 720)], 1);
    assert_eq!(logged_minutes(&merged, &[morning]), 180);
}

#[test]
fn test_pre_shift_clamp_can_empty_an_interval() {
    let morning = window("06:00", "08:30", BreakKind::PreShiftExempt, true);
    let merged = merge_spans(&[span(300, 390)], 1); // 05:00–06:30
    assert_eq!(logged_minutes(&merged, &[morning]), 0);
}

#[test]
fn test_logged_minutes_never_negative() {
    let all_day = window("00:00", "23:59", BreakKind::Standard, true);
    let merged = merge_spans(&[span(540, 600), span(700, 800)], 1);
    assert!(logged_minutes(&merged, &[all_day]) >= 0);
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

#[test]
fn test_discrepancy_sign_over_logged() {
    let policy = ReportPolicy::over_logged(60);
    let d = reconcile(480, 600, &policy);
    assert_eq!(d.difference_minutes, 120);
    assert!(d.flagged);
}

#[test]
fn test_over_flag_not_set_when_under() {
    let policy = ReportPolicy::over_logged(60);
    let d = reconcile(480, 400, &policy);
    assert_eq!(d.difference_minutes, -80);
    assert!(!d.flagged);
}

#[test]
fn test_under_flag_set_at_larger_gap() {
    let policy = ReportPolicy::under_logged(60);
    let d = reconcile(600, 480, &policy);
    assert_eq!(d.difference_minutes, -120);
    assert!(d.flagged);
}

#[test]
fn test_under_flag_respects_threshold() {
    let policy = ReportPolicy::under_logged(60);
    let d = reconcile(480, 430, &policy);
    assert_eq!(d.difference_minutes, -50);
    assert!(!d.flagged);
}

#[test]
fn test_threshold_is_exclusive() {
    let policy = ReportPolicy::over_logged(60);
    assert!(!reconcile(480, 540, &policy).flagged); // exactly 60
    assert!(reconcile(480, 541, &policy).flagged); // 61
}
