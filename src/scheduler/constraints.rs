//! Hard-constraint validator.
//!
//! Decides whether a registrar may legally take a shift, given only the
//! shifts already committed to that registrar. Checks run in a fixed order
//! and stop at the first failure:
//!
//! | # | Check | Rejects when |
//! |---|-------|--------------|
//! | 1 | Leave | shift date inside any leave period (inclusive) |
//! | 2 | Consecutive shifts | the run of ≤1-day-apart commitments ending at the shift date already equals the bound |
//! | 3 | Minimum rest | any commitment overlaps, or leaves less than `min_rest_hours` |
//! | 4 | Weekly hours | same-week hours plus this shift exceed `max_weekly_hours` |
//! | 5 | Weekly nights | night shift and same-week nights plus one exceed `max_night_shifts_per_week` |
//!
//! Weeks are ISO weeks (Monday start).
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering",
//! Journal of Scheduling 7(6)

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::config::RosterConfig;
use crate::models::{hours_between, Assignment, Registrar, Schedule, Shift};

/// Why a registrar cannot take a shift.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    /// The shift falls inside approved leave.
    #[error("On approved leave ({reason})")]
    OnLeave { reason: String },

    /// Taking the shift would exceed the consecutive-shift bound.
    #[error("Exceeds max consecutive shifts ({max})")]
    ConsecutiveShifts { max: u32 },

    /// A committed shift overlaps or ends too close to this one.
    #[error("Insufficient rest around shift '{conflicting_shift}' ({gap_hours:.1}h, need {required_hours}h)")]
    InsufficientRest {
        conflicting_shift: String,
        gap_hours: f64,
        required_hours: f64,
    },

    /// Weekly paid hours would exceed the cap.
    #[error("Exceeds weekly hour limit ({max_hours}h, would be {would_be:.1}h)")]
    WeeklyHours { max_hours: f64, would_be: f64 },

    /// Weekly night shifts would exceed the cap.
    #[error("Exceeds weekly night shift limit ({max})")]
    WeeklyNightShifts { max: u32 },
}

/// Hard-constraint validator.
///
/// Stateless apart from the borrowed configuration; every check reads
/// only the candidate registrar's own commitments.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintValidator<'a> {
    config: &'a RosterConfig,
}

impl<'a> ConstraintValidator<'a> {
    /// Creates a validator for `config`.
    pub fn new(config: &'a RosterConfig) -> Self {
        Self { config }
    }

    /// Checks whether `registrar` may take `shift`.
    pub fn check(
        &self,
        registrar: &Registrar,
        shift: &Shift,
        schedule: &Schedule,
    ) -> Result<(), Rejection> {
        let committed = schedule.shifts_for(&registrar.id);

        self.check_leave(registrar, shift)?;
        self.check_consecutive(registrar, shift, committed)?;
        self.check_rest(shift, committed)?;
        self.check_weekly_hours(shift, committed)?;
        if self.config.is_night_family(&shift.shift_type) {
            self.check_weekly_nights(shift, committed)?;
        }
        Ok(())
    }

    /// Convenience wrapper over [`check`](Self::check).
    pub fn is_valid(&self, registrar: &Registrar, shift: &Shift, schedule: &Schedule) -> bool {
        self.check(registrar, shift, schedule).is_ok()
    }

    fn check_leave(&self, registrar: &Registrar, shift: &Shift) -> Result<(), Rejection> {
        match registrar
            .leave_requests
            .iter()
            .find(|leave| leave.covers(shift.date))
        {
            Some(leave) => Err(Rejection::OnLeave {
                reason: leave.reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn check_consecutive(
        &self,
        registrar: &Registrar,
        shift: &Shift,
        committed: &[Assignment],
    ) -> Result<(), Rejection> {
        let max = registrar.consecutive_limit(self.config.hard_constraints.max_consecutive_shifts);
        if consecutive_run(shift.date, committed) >= max as usize {
            return Err(Rejection::ConsecutiveShifts { max });
        }
        Ok(())
    }

    fn check_rest(&self, shift: &Shift, committed: &[Assignment]) -> Result<(), Rejection> {
        let required = self.config.hard_constraints.min_rest_hours;
        for prior in committed {
            let gap = rest_gap_hours(prior, shift);
            if gap <= 0.0 || gap < required {
                return Err(Rejection::InsufficientRest {
                    conflicting_shift: prior.shift_id.clone(),
                    gap_hours: gap,
                    required_hours: required,
                });
            }
        }
        Ok(())
    }

    fn check_weekly_hours(&self, shift: &Shift, committed: &[Assignment]) -> Result<(), Rejection> {
        let max_hours = self.config.hard_constraints.max_weekly_hours;
        let would_be = shift.duration_hours
            + same_week(shift.date, committed)
                .map(|a| a.duration_hours)
                .sum::<f64>();
        if would_be > max_hours {
            return Err(Rejection::WeeklyHours {
                max_hours,
                would_be,
            });
        }
        Ok(())
    }

    fn check_weekly_nights(&self, shift: &Shift, committed: &[Assignment]) -> Result<(), Rejection> {
        let max = self.config.hard_constraints.max_night_shifts_per_week;
        let nights = 1 + same_week(shift.date, committed)
            .filter(|a| self.config.is_night_family(&a.shift_type))
            .count();
        if nights > max as usize {
            return Err(Rejection::WeeklyNightShifts { max });
        }
        Ok(())
    }
}

/// Length of the chain of commitments ending at `date`.
///
/// Walks commitments dated on or before `date`, newest first. Each link
/// must be at most one calendar day before the previous one; the walk
/// stops at the first larger gap. Several shifts on one day each count.
fn consecutive_run(date: NaiveDate, committed: &[Assignment]) -> usize {
    let mut dates: Vec<NaiveDate> = committed
        .iter()
        .map(|a| a.date)
        .filter(|d| *d <= date)
        .collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let mut anchor = date;
    let mut run = 0;
    for d in dates {
        if (anchor - d).num_days() > 1 {
            break;
        }
        run += 1;
        anchor = d;
    }
    run
}

/// Hours between a commitment and a candidate shift, whichever comes first.
///
/// Zero or negative when the two intervals touch or overlap.
fn rest_gap_hours(prior: &Assignment, shift: &Shift) -> f64 {
    if prior.start_time <= shift.start_time {
        hours_between(prior.end_time, shift.start_time)
    } else {
        hours_between(shift.end_time, prior.start_time)
    }
}

fn same_week<'c>(
    date: NaiveDate,
    committed: &'c [Assignment],
) -> impl Iterator<Item = &'c Assignment> + 'c {
    let week = date.iso_week();
    committed.iter().filter(move |a| a.date.iso_week() == week)
}
