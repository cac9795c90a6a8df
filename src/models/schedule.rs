//! Working schedule.
//!
//! The schedule maps each registrar to the shifts committed to them so far
//! in a run. It only grows: commitments are appended and never removed.
//! One instance exists per run and is owned by the engine; the validator
//! and scorer read it by reference.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use super::{Shift, ShiftType};

/// A shift committed to a registrar.
///
/// Snapshot of the shift fields the constraint checks need.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Committed shift ID.
    pub shift_id: String,
    /// Registrar the shift is committed to.
    pub registrar_id: String,
    /// Shift date.
    pub date: NaiveDate,
    /// Shift type.
    pub shift_type: ShiftType,
    /// Start timestamp.
    pub start_time: NaiveDateTime,
    /// End timestamp.
    pub end_time: NaiveDateTime,
    /// Paid hours.
    pub duration_hours: f64,
}

impl Assignment {
    /// Creates an assignment of `shift` to `registrar_id`.
    pub fn new(registrar_id: impl Into<String>, shift: &Shift) -> Self {
        Self {
            shift_id: shift.id.clone(),
            registrar_id: registrar_id.into(),
            date: shift.date,
            shift_type: shift.shift_type.clone(),
            start_time: shift.start_time,
            end_time: shift.end_time,
            duration_hours: shift.duration_hours,
        }
    }
}

/// Per-run registrar → committed shifts map.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    committed: HashMap<String, Vec<Assignment>>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a schedule from staffed shifts.
    ///
    /// Shifts are replayed in start order, so each registrar's list ends up
    /// in the same order the engine committed it.
    pub fn from_shifts(shifts: &[Shift]) -> Self {
        let mut ordered: Vec<&Shift> = shifts.iter().collect();
        ordered.sort_by_key(|s| s.start_time);

        let mut schedule = Self::new();
        for shift in ordered {
            for registrar in &shift.assigned_registrars {
                schedule.commit(&registrar.id, shift);
            }
        }
        schedule
    }

    /// Commits `shift` to a registrar.
    pub fn commit(&mut self, registrar_id: &str, shift: &Shift) {
        self.committed
            .entry(registrar_id.to_string())
            .or_default()
            .push(Assignment::new(registrar_id, shift));
    }

    /// Shifts committed to a registrar, in commit order.
    pub fn shifts_for(&self, registrar_id: &str) -> &[Assignment] {
        self.committed
            .get(registrar_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of shifts committed to a registrar.
    pub fn shift_count(&self, registrar_id: &str) -> usize {
        self.shifts_for(registrar_id).len()
    }

    /// Most recent commitment for a registrar.
    pub fn last_for(&self, registrar_id: &str) -> Option<&Assignment> {
        self.shifts_for(registrar_id).last()
    }

    /// Whether `shift_id` is committed to `registrar_id`.
    pub fn is_committed(&self, registrar_id: &str, shift_id: &str) -> bool {
        self.shifts_for(registrar_id)
            .iter()
            .any(|a| a.shift_id == shift_id)
    }

    /// Total number of commitments across all registrars.
    pub fn assignment_count(&self) -> usize {
        self.committed.values().map(Vec::len).sum()
    }

    /// Iterates all commitments, grouped by registrar (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Assignment])> {
        self.committed
            .iter()
            .map(|(id, list)| (id.as_str(), list.as_slice()))
    }
}
