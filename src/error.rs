//! Crate error type.
//!
//! Every failure is terminal for the calling operation. Projection is a
//! pure function of its inputs, so retrying with the same inputs cannot
//! succeed: the caller must fix the calendar or the workload.

use chrono::Weekday;
use thiserror::Error;

use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ShiftError>;

/// Errors raised by calendar construction, workload computation,
/// and schedule projection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShiftError {
    /// The calendar failed structural validation.
    #[error("invalid calendar: {}", join_messages(.0))]
    InvalidCalendar(Vec<ValidationError>),

    /// A weekday lookup failed on a malformed calendar.
    #[error("calendar has no entry for {0}")]
    DayNotFound(Weekday),

    /// Workload or engineering input violates a precondition.
    #[error("invalid workload: {0}")]
    InvalidWorkload(String),

    /// No completion found within the day-advance bound.
    #[error("calendar '{calendar_id}' cannot absorb the workload within {max_day_advances} days")]
    Unschedulable {
        /// Calendar that was walked.
        calendar_id: String,
        /// Bound that was exceeded.
        max_day_advances: u32,
    },

    /// A production order referenced an unknown calendar.
    #[error("calendar '{0}' not found")]
    CalendarNotFound(String),
}

impl ShiftError {
    pub(crate) fn invalid_workload(message: impl Into<String>) -> Self {
        Self::InvalidWorkload(message.into())
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
