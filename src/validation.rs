//! Input validation for shift calendars.
//!
//! Checks structural integrity of a weekly calendar before it is
//! considered usable. Detects:
//! - Empty calendar IDs
//! - Missing weekdays (a calendar needs exactly one entry per weekday)
//! - Duplicate weekdays
//! - Work days whose end time precedes their start time
//! - Breaks declared for a weekday that has no schedule entry
//!
//! All issues are collected, not just the first one, so a form can show
//! every problem at once.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::{DaySchedule, WEEKDAYS};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Calendar identifier is blank.
    EmptyId,
    /// No entry exists for a weekday.
    MissingDay,
    /// Two entries share the same weekday.
    DuplicateDay,
    /// A work day ends before it starts (overnight shifts are unsupported).
    InvertedShift,
    /// A break was declared for a weekday without a schedule entry.
    OrphanBreak,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a calendar's identifier and weekly entries.
///
/// Checks:
/// 1. The ID is not blank
/// 2. No weekday appears twice
/// 3. Every weekday Monday..Sunday has an entry
/// 4. Every work day has `start_time <= end_time`
///
/// Breaks whose total exceeds the shift window are not an error; the
/// day's capacity floors at zero.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_calendar(id: &str, days: &[DaySchedule]) -> ValidationResult {
    let mut errors = Vec::new();

    if id.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyId,
            "Calendar ID is empty",
        ));
    }

    let mut seen = [0usize; 7];
    for entry in days {
        let idx = entry.day.num_days_from_monday() as usize;
        seen[idx] += 1;
        if seen[idx] == 2 {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateDay,
                format!("Duplicate entry for {}", entry.day),
            ));
        }

        if entry.is_work_day && entry.end_time < entry.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedShift,
                format!(
                    "{} ends at {} before it starts at {}",
                    entry.day,
                    entry.end_time.format("%H:%M"),
                    entry.start_time.format("%H:%M")
                ),
            ));
        }
    }

    for day in WEEKDAYS {
        if seen[day.num_days_from_monday() as usize] == 0 {
            errors.push(missing_day(day));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn missing_day(day: Weekday) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::MissingDay,
        format!("Missing entry for {day}"),
    )
}

pub(crate) fn orphan_break(day: Weekday, name: &str) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::OrphanBreak,
        format!("Break '{name}' declared for {day}, which has no schedule"),
    )
}
