//! Workload fairness metrics.
//!
//! Summarizes how the final schedule spreads work across registrars.
//! Fairness is measured after the fact; the scorer's load-balancing term
//! is the only thing pushing toward an even spread during a run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total shifts | Shifts committed to the registrar |
//! | Night shifts | Night-family shifts committed |
//! | Weekend shifts | Weekend-family shifts committed |
//! | Total hours | Sum of paid hours committed |
//!
//! Every input registrar appears in every map, with zeros if unassigned.
//! Maps are ordered by registrar ID so serialized output is stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::RosterConfig;
use crate::models::{Registrar, Schedule};

/// Per-registrar workload distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FairnessSummary {
    /// Total shifts per registrar.
    pub total_shifts_per_registrar: BTreeMap<String, usize>,
    /// Night-family shifts per registrar.
    pub night_shifts_per_registrar: BTreeMap<String, usize>,
    /// Weekend-family shifts per registrar.
    pub weekend_shifts_per_registrar: BTreeMap<String, usize>,
    /// Paid hours per registrar.
    pub total_hours_per_registrar: BTreeMap<String, f64>,
}

/// Min / max / mean of one metric across registrars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
}

impl Spread {
    /// Computes the spread of `values`. `None` if empty.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        if count == 0 {
            return None;
        }
        Some(Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }

    /// `max - min`.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

impl FairnessSummary {
    /// Reduces a schedule to per-registrar workload counts.
    ///
    /// # Arguments
    /// * `schedule` - The final schedule.
    /// * `registrars` - Every registrar in the run (unassigned ones report zeros).
    /// * `config` - Used to classify night-family shift types.
    pub fn calculate(schedule: &Schedule, registrars: &[Registrar], config: &RosterConfig) -> Self {
        let mut summary = Self::default();

        for registrar in registrars {
            let shifts = schedule.shifts_for(&registrar.id);
            let id = registrar.id.clone();

            let nights = shifts
                .iter()
                .filter(|a| config.is_night_family(&a.shift_type))
                .count();
            let weekends = shifts
                .iter()
                .filter(|a| config.is_weekend_family(&a.shift_type))
                .count();
            let hours: f64 = shifts.iter().map(|a| a.duration_hours).sum();

            summary
                .total_shifts_per_registrar
                .insert(id.clone(), shifts.len());
            summary.night_shifts_per_registrar.insert(id.clone(), nights);
            summary.weekend_shifts_per_registrar.insert(id.clone(), weekends);
            summary.total_hours_per_registrar.insert(id, hours);
        }

        summary
    }

    /// Spread of total shift counts.
    pub fn shift_spread(&self) -> Option<Spread> {
        Spread::of(self.total_shifts_per_registrar.values().map(|&n| n as f64))
    }

    /// Spread of night shift counts.
    pub fn night_spread(&self) -> Option<Spread> {
        Spread::of(self.night_shifts_per_registrar.values().map(|&n| n as f64))
    }

    /// Spread of weekend shift counts.
    pub fn weekend_spread(&self) -> Option<Spread> {
        Spread::of(self.weekend_shifts_per_registrar.values().map(|&n| n as f64))
    }

    /// Spread of paid hours.
    pub fn hours_spread(&self) -> Option<Spread> {
        Spread::of(self.total_hours_per_registrar.values().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HardConstraints;
    use crate::models::{parse_timestamp, Shift};

    fn shift(id: &str, kind: &str, start: &str, end: &str) -> Shift {
        Shift::new(
            id,
            kind,
            parse_timestamp(start).unwrap(),
            parse_timestamp(end).unwrap(),
        )
    }

    fn config() -> RosterConfig {
        RosterConfig::new(HardConstraints::new(5, 11.0, 48.0, 3))
    }

    #[test]
    fn test_fairness_counts() {
        let registrars = vec![
            Registrar::new("R1", "A"),
            Registrar::new("R2", "B"),
            Registrar::new("R3", "C"),
        ];
        let mut schedule = Schedule::new();
        schedule.commit("R1", &shift("D", "day", "2024-06-03 08:00", "2024-06-03 16:00"));
        schedule.commit("R1", &shift("N", "night", "2024-06-04 22:00", "2024-06-05 08:00"));
        schedule.commit("R2", &shift("WN", "weekend_night", "2024-06-08 22:00", "2024-06-09 08:00"));
        schedule.commit("R2", &shift("WD", "weekend_day", "2024-06-09 08:00", "2024-06-09 20:00"));

        let f = FairnessSummary::calculate(&schedule, &registrars, &config());
        assert_eq!(f.total_shifts_per_registrar["R1"], 2);
        assert_eq!(f.night_shifts_per_registrar["R1"], 1);
        assert_eq!(f.weekend_shifts_per_registrar["R1"], 0);
        assert!((f.total_hours_per_registrar["R1"] - 18.0).abs() < 1e-10);

        assert_eq!(f.night_shifts_per_registrar["R2"], 1);
        assert_eq!(f.weekend_shifts_per_registrar["R2"], 2);
        assert!((f.total_hours_per_registrar["R2"] - 22.0).abs() < 1e-10);

        // Unassigned registrar reports zeros
        assert_eq!(f.total_shifts_per_registrar["R3"], 0);
        assert_eq!(f.total_hours_per_registrar["R3"], 0.0);
    }

    #[test]
    fn test_fairness_ignores_unknown_registrars() {
        let mut schedule = Schedule::new();
        schedule.commit("GHOST", &shift("D", "day", "2024-06-03 08:00", "2024-06-03 16:00"));
        let f = FairnessSummary::calculate(&schedule, &[Registrar::new("R1", "A")], &config());
        assert_eq!(f.total_shifts_per_registrar.len(), 1);
        assert!(!f.total_shifts_per_registrar.contains_key("GHOST"));
    }

    #[test]
    fn test_spread() {
        let s = Spread::of([2.0, 4.0, 6.0]).unwrap();
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 6.0);
        assert!((s.mean - 4.0).abs() < 1e-10);
        assert!((s.range() - 4.0).abs() < 1e-10);
        assert!(Spread::of(std::iter::empty()).is_none());
    }

    #[test]
    fn test_summary_spreads() {
        let registrars = vec![Registrar::new("R1", "A"), Registrar::new("R2", "B")];
        let mut schedule = Schedule::new();
        schedule.commit("R1", &shift("D1", "day", "2024-06-03 08:00", "2024-06-03 16:00"));
        schedule.commit("R1", &shift("D2", "day", "2024-06-04 08:00", "2024-06-04 16:00"));

        let f = FairnessSummary::calculate(&schedule, &registrars, &config());
        let shifts = f.shift_spread().unwrap();
        assert_eq!((shifts.min, shifts.max), (0.0, 2.0));
        assert!((shifts.mean - 1.0).abs() < 1e-10);
        assert!((f.hours_spread().unwrap().max - 16.0).abs() < 1e-10);
        assert_eq!(f.night_spread().unwrap().max, 0.0);
        assert_eq!(f.weekend_spread().unwrap().max, 0.0);
    }

    #[test]
    fn test_empty_summary() {
        let f = FairnessSummary::calculate(&Schedule::new(), &[], &config());
        assert!(f.total_shifts_per_registrar.is_empty());
        assert!(f.shift_spread().is_none());
    }
}
