use chrono::{NaiveDate, NaiveDateTime};

use crate::core::calendar;
use crate::db::queries::TIMESTAMP_FMT;
use crate::errors::{AppError, AppResult};

/// Today's business date, resolved in the civil timezone.
pub fn today() -> NaiveDate {
    calendar::civil_today()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a `YYYY-MM-DD` argument, surfacing an AppError for the CLI.
pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Parse a `YYYY-MM-DD HH:MM` argument, surfacing an AppError for the CLI.
pub fn parse_timestamp_arg(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FMT)
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}
