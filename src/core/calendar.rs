//! Business-calendar helpers in the fixed civil timezone.
//!
//! Every today/yesterday resolution in the tool goes through `civil_now`,
//! so a host-timezone misconfiguration fails every consumer identically.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc, Weekday};
use chrono_tz::Asia::Tokyo;

/// Current wall-clock time in the civil timezone, as a naive timestamp.
pub fn civil_now() -> NaiveDateTime {
    Utc::now().with_timezone(&Tokyo).naive_local()
}

/// Today's business date in the civil timezone.
pub fn civil_today() -> NaiveDate {
    civil_now().date()
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The `n` business dates before `from`, most-recent-first.
///
/// Starts at the day before `from` and walks backward one calendar day at a
/// time, skipping Saturday and Sunday.
pub fn business_days_before(from: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(n);
    let mut d = from - Duration::days(1);

    while out.len() < n {
        if is_business_day(d) {
            out.push(d);
        }
        d -= Duration::days(1);
    }

    out
}

/// The `n` business dates before today (civil timezone), most-recent-first.
pub fn business_days_ago(n: usize) -> Vec<NaiveDate> {
    business_days_before(civil_today(), n)
}
