use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One logged task work-session.
///
/// `ended_at = None` means the session is still open; reports treat it as
/// running until "now". Sessions for the same user may overlap (a worker can
/// be logged against two tasks in the same physical time span).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WorkSession {
    pub id: i64,
    pub user: String,
    pub task: String,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
}

impl WorkSession {
    /// Logical work-date: sessions are bucketed by the local day they start.
    pub fn work_date(&self) -> NaiveDate {
        self.started_at.date()
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}
