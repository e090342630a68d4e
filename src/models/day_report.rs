use chrono::NaiveDate;
use serde::Serialize;

use crate::core::merge::BusyInterval;
use crate::core::reconcile::Discrepancy;

/// Full reconciliation result for one user on one business date.
/// This is what the report commands render (table or JSON).
#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    pub user: String,
    pub date: NaiveDate,
    pub clock_in: String,
    pub clock_out: String,
    pub busy: Vec<BusyInterval>,
    #[serde(flatten)]
    pub discrepancy: Discrepancy,
}
