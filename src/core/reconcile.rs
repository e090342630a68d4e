//! Reconciliation of declared attendance against logged session time.
//!
//! The engine only produces the raw signed difference; each report supplies
//! its own threshold/direction/pre-clamp tuple, because the classification
//! rules differ between the over-logged listing, the under-logged listing
//! and the per-user detail view.

use serde::Serialize;

use crate::core::clock::Minutes;

/// Derived comparison of one user's day. Not persisted.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Discrepancy {
    pub attendance_minutes: Minutes,
    pub logged_minutes: Minutes,
    /// `logged - attendance`, signed.
    pub difference_minutes: Minutes,
    pub flagged: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum FlagDirection {
    /// Logged time far exceeds declared attendance.
    OverLogged,
    /// Declared attendance far exceeds logged time.
    UnderLogged,
}

/// Per-report classification policy.
#[derive(Debug, Clone, Copy)]
pub struct ReportPolicy {
    pub threshold: Minutes,
    pub direction: FlagDirection,
    /// Busy-interval starts earlier than this are raised to it before the
    /// logged total is recomputed (the detail view uses 08:30).
    pub pre_clamp: Option<Minutes>,
}

impl ReportPolicy {
    pub fn over_logged(threshold: Minutes) -> Self {
        Self {
            threshold,
            direction: FlagDirection::OverLogged,
            pre_clamp: None,
        }
    }

    pub fn under_logged(threshold: Minutes) -> Self {
        Self {
            threshold,
            direction: FlagDirection::UnderLogged,
            pre_clamp: None,
        }
    }

    pub fn flags(&self, difference_minutes: Minutes) -> bool {
        match self.direction {
            FlagDirection::OverLogged => difference_minutes > self.threshold,
            FlagDirection::UnderLogged => -difference_minutes > self.threshold,
        }
    }
}

pub fn reconcile(
    attendance_minutes: Minutes,
    logged_minutes: Minutes,
    policy: &ReportPolicy,
) -> Discrepancy {
    let difference_minutes = logged_minutes - attendance_minutes;

    Discrepancy {
        attendance_minutes,
        logged_minutes,
        difference_minutes,
        flagged: policy.flags(difference_minutes),
    }
}
