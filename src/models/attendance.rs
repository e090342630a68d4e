use chrono::NaiveDate;
use serde::Serialize;

/// One user's attendance record for one business date, as stored.
///
/// Clock times are kept as the raw `HH:MM` strings the user stamped (either
/// may be missing or malformed); the normalizer owns turning them into an
/// ordered pair. `work_minutes` is the persisted derived value, refreshed on
/// every clock upsert.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: i64,
    pub user: String,
    pub date: NaiveDate,
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
    pub work_minutes: Option<i64>,
}
