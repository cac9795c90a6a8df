//! Run statistics and coverage violations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FairnessSummary;
use crate::models::{Shift, ShiftType};

/// Reason recorded for every under-staffed shift.
pub const INSUFFICIENT_REGISTRARS: &str = "Insufficient eligible registrars";

/// Outcome counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Shifts processed.
    pub total_shifts: usize,
    /// Shifts that reached their required staff count.
    pub scheduled_shifts: usize,
    /// Shifts left short.
    pub unscheduled_shifts: usize,
    /// One entry per under-staffed shift, in processing order.
    pub constraint_violations: Vec<CoverageViolation>,
    /// Per-registrar workload.
    pub fairness_metrics: FairnessSummary,
}

/// A shift that could not be fully staffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageViolation {
    /// Shift ID.
    pub shift_id: String,
    /// Shift type.
    pub shift_type: ShiftType,
    /// Shift date.
    pub date: NaiveDate,
    /// Registrars required.
    pub required: u32,
    /// Registrars actually assigned.
    pub assigned: u32,
    /// Human-readable reason.
    pub reason: String,
}

impl CoverageViolation {
    /// Records an under-staffed shift.
    pub fn insufficient(shift: &Shift) -> Self {
        Self {
            shift_id: shift.id.clone(),
            shift_type: shift.shift_type.clone(),
            date: shift.date,
            required: shift.required_staff,
            assigned: shift.assigned_registrars.len() as u32,
            reason: INSUFFICIENT_REGISTRARS.to_string(),
        }
    }

    /// Registrars still needed.
    pub fn shortfall(&self) -> u32 {
        self.required.saturating_sub(self.assigned)
    }
}

impl Statistics {
    /// Empty statistics for a run over `total_shifts` shifts.
    pub fn new(total_shifts: usize) -> Self {
        Self {
            total_shifts,
            ..Default::default()
        }
    }

    /// Records the outcome of one processed shift.
    pub fn record(&mut self, shift: &Shift) {
        if shift.is_fully_staffed() {
            self.scheduled_shifts += 1;
        } else {
            self.unscheduled_shifts += 1;
            self.constraint_violations
                .push(CoverageViolation::insufficient(shift));
        }
    }

    /// Fraction of shifts fully staffed (0.0..1.0). An empty run counts as fully covered.
    pub fn coverage_rate(&self) -> f64 {
        if self.total_shifts == 0 {
            1.0
        } else {
            self.scheduled_shifts as f64 / self.total_shifts as f64
        }
    }

    /// Whether every shift was fully staffed.
    pub fn is_fully_covered(&self) -> bool {
        self.unscheduled_shifts == 0
    }

    /// Total registrar slots left unfilled.
    pub fn total_shortfall(&self) -> u32 {
        self.constraint_violations
            .iter()
            .map(CoverageViolation::shortfall)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_timestamp, AssignedRegistrar};

    fn shift(id: &str, required: u32, assigned: usize) -> Shift {
        let mut s = Shift::new(
            id,
            "day",
            parse_timestamp("2024-06-03 08:00").unwrap(),
            parse_timestamp("2024-06-03 16:00").unwrap(),
        )
        .with_required_staff(required);
        for i in 0..assigned {
            s.assigned_registrars.push(AssignedRegistrar {
                id: format!("R{i}"),
                name: String::new(),
                seniority: String::new(),
            });
        }
        s
    }

    #[test]
    fn test_record_counts() {
        let mut stats = Statistics::new(3);
        stats.record(&shift("S1", 2, 2));
        stats.record(&shift("S2", 3, 1));
        stats.record(&shift("S3", 0, 0));

        assert_eq!(stats.scheduled_shifts, 2);
        assert_eq!(stats.unscheduled_shifts, 1);
        assert_eq!(
            stats.scheduled_shifts + stats.unscheduled_shifts,
            stats.total_shifts
        );

        let v = &stats.constraint_violations[0];
        assert_eq!(v.shift_id, "S2");
        assert_eq!(v.required, 3);
        assert_eq!(v.assigned, 1);
        assert_eq!(v.reason, INSUFFICIENT_REGISTRARS);
        assert_eq!(stats.total_shortfall(), 2);
        assert!(!stats.is_fully_covered());
    }

    #[test]
    fn test_coverage_rate() {
        let mut stats = Statistics::new(4);
        stats.record(&shift("S1", 1, 1));
        stats.record(&shift("S2", 1, 0));
        stats.record(&shift("S3", 1, 1));
        stats.record(&shift("S4", 1, 1));
        assert!((stats.coverage_rate() - 0.75).abs() < 1e-10);

        assert!((Statistics::new(0).coverage_rate() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_statistics_json_shape() {
        let mut stats = Statistics::new(1);
        stats.record(&shift("S1", 2, 1));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["unscheduled_shifts"], 1);
        assert_eq!(json["constraint_violations"][0]["shift_type"], "day");
        assert_eq!(json["constraint_violations"][0]["date"], "2024-06-03");
    }
}
