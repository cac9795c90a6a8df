//! Input validation for rostering runs.
//!
//! Checks structural integrity of registrars and shifts before scheduling.
//! Detects:
//! - Duplicate IDs
//! - Inverted leave periods
//! - Shifts that end before they start, or have no paid hours
//! - `day_of_week` that disagrees with `date`
//! - Shift types missing from the configuration
//! - Preferred days that are not weekday names
//! - Shifts that already carry assignments
//!
//! All problems are collected, not just the first.

use std::collections::HashSet;

use chrono::Datelike;

use crate::config::RosterConfig;
use crate::models::{weekday_name, Registrar, Shift};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A leave period ends before it starts.
    InvalidLeavePeriod,
    /// A shift ends at or before its start.
    InvalidShiftWindow,
    /// A shift's paid hours are not a positive number.
    InvalidDuration,
    /// `day_of_week` does not name the weekday of `date`.
    WeekdayMismatch,
    /// A shift's type is neither built in nor configured.
    UnknownShiftType,
    /// A preferred day is not a weekday name.
    UnknownWeekday,
    /// A registrar's consecutive-shift bound is zero.
    InvalidConsecutiveLimit,
    /// A shift arrives with registrars already assigned.
    PreassignedShift,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the inputs of a rostering run.
///
/// Checks:
/// 1. No duplicate registrar IDs
/// 2. No duplicate shift IDs
/// 3. Leave periods are not inverted
/// 4. Registrar consecutive-shift bounds are at least 1
/// 5. Preferred days are weekday names
/// 6. Shifts end after they start and have positive, finite paid hours
/// 7. `day_of_week` matches `date`
/// 8. Every shift type is known to `config`
/// 9. No shift is pre-assigned
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    registrars: &[Registrar],
    shifts: &[Shift],
    config: &RosterConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut registrar_ids = HashSet::new();
    for r in registrars {
        if !registrar_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate registrar ID: {}", r.id),
            ));
        }

        for leave in &r.leave_requests {
            if leave.end_date < leave.start_date {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidLeavePeriod,
                    format!(
                        "Registrar '{}' has leave ending {} before it starts {}",
                        r.id, leave.end_date, leave.start_date
                    ),
                ));
            }
        }

        if r.max_consecutive_shifts == Some(0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConsecutiveLimit,
                format!("Registrar '{}' has max_consecutive_shifts of 0", r.id),
            ));
        }

        for day in &r.preferred_days {
            if !WEEKDAYS.iter().any(|w| w.eq_ignore_ascii_case(day)) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownWeekday,
                    format!("Registrar '{}' prefers unknown day '{}'", r.id, day),
                ));
            }
        }
    }

    let mut shift_ids = HashSet::new();
    for s in shifts {
        if !shift_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift ID: {}", s.id),
            ));
        }

        if s.end_time <= s.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidShiftWindow,
                format!(
                    "Shift '{}' ends at {} which is not after its start {}",
                    s.id, s.end_time, s.start_time
                ),
            ));
        }

        if !s.duration_hours.is_finite() || s.duration_hours <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Shift '{}' has duration {} hours", s.id, s.duration_hours),
            ));
        }

        let expected_day = weekday_name(s.date.weekday());
        if !s.day_of_week.eq_ignore_ascii_case(expected_day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::WeekdayMismatch,
                format!(
                    "Shift '{}' is dated {} ({}) but labelled '{}'",
                    s.id, s.date, expected_day, s.day_of_week
                ),
            ));
        }

        if !config.is_known_shift_type(&s.shift_type) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownShiftType,
                format!(
                    "Shift '{}' has shift type '{}' which is not defined in shift_types",
                    s.id, s.shift_type
                ),
            ));
        }

        if !s.assigned_registrars.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::PreassignedShift,
                format!(
                    "Shift '{}' already has {} registrar(s) assigned",
                    s.id,
                    s.assigned_registrars.len()
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
