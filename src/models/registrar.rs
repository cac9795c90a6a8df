//! Registrar model.
//!
//! Registrars are the staff members being rostered. Each carries contract
//! details, soft preferences (nights, weekends, weekdays), and approved
//! leave. Registrars are read-only for the duration of a run.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A staff member eligible for shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registrar {
    /// Unique registrar identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Clinical specialty.
    pub specialty: String,
    /// Seniority tier (e.g. "Junior", "Senior").
    pub seniority: String,
    /// Contracted weekly hours.
    pub contract_hours: u32,
    /// Personal consecutive-shift bound. `None` = use the configured default.
    #[serde(default)]
    pub max_consecutive_shifts: Option<u32>,
    /// Prefers night work.
    #[serde(default)]
    pub prefers_nights: bool,
    /// Prefers weekend work.
    #[serde(default)]
    pub prefers_weekends: bool,
    /// Preferred weekdays, lowercase (e.g. "monday").
    #[serde(default)]
    pub preferred_days: BTreeSet<String>,
    /// Approved leave, in the order supplied.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
}

/// An approved leave period. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Free-text reason (e.g. "Annual Leave", "Conference").
    #[serde(default)]
    pub reason: String,
}

impl Registrar {
    /// Creates a registrar with no preferences or leave.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            specialty: String::new(),
            seniority: String::new(),
            contract_hours: 40,
            max_consecutive_shifts: None,
            prefers_nights: false,
            prefers_weekends: false,
            preferred_days: BTreeSet::new(),
            leave_requests: Vec::new(),
        }
    }

    /// Sets the specialty.
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = specialty.into();
        self
    }

    /// Sets the seniority tier.
    pub fn with_seniority(mut self, seniority: impl Into<String>) -> Self {
        self.seniority = seniority.into();
        self
    }

    /// Sets contracted weekly hours.
    pub fn with_contract_hours(mut self, hours: u32) -> Self {
        self.contract_hours = hours;
        self
    }

    /// Sets the personal consecutive-shift bound.
    pub fn with_max_consecutive_shifts(mut self, max: u32) -> Self {
        self.max_consecutive_shifts = Some(max);
        self
    }

    /// Marks the registrar as preferring nights.
    pub fn preferring_nights(mut self) -> Self {
        self.prefers_nights = true;
        self
    }

    /// Marks the registrar as preferring weekends.
    pub fn preferring_weekends(mut self) -> Self {
        self.prefers_weekends = true;
        self
    }

    /// Adds a preferred weekday.
    pub fn with_preferred_day(mut self, day: impl Into<String>) -> Self {
        self.preferred_days.insert(day.into().to_lowercase());
        self
    }

    /// Adds an approved leave period.
    pub fn with_leave(
        mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
    ) -> Self {
        self.leave_requests.push(LeaveRequest {
            start_date,
            end_date,
            reason: reason.into(),
        });
        self
    }

    /// Whether any leave period covers `date`.
    pub fn is_on_leave(&self, date: NaiveDate) -> bool {
        self.leave_requests.iter().any(|l| l.covers(date))
    }

    /// Whether `day` (a weekday name) is a preferred day.
    pub fn prefers_day(&self, day: &str) -> bool {
        self.preferred_days
            .iter()
            .any(|d| d.eq_ignore_ascii_case(day))
    }

    /// Effective consecutive-shift bound.
    pub fn consecutive_limit(&self, default: u32) -> u32 {
        self.max_consecutive_shifts.unwrap_or(default)
    }
}

impl LeaveRequest {
    /// Whether `date` falls inside this period (inclusive).
    #[inline]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of days covered.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
