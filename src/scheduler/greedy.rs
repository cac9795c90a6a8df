//! Greedy shift assignment.
//!
//! # Algorithm
//!
//! 1. Validate inputs; any structural problem aborts the run.
//! 2. Stable-sort shifts by start time.
//! 3. For each shift, keep the registrars the constraint validator accepts
//!    against the schedule built so far.
//! 4. Score the survivors, rank best-first, settle ties with the
//!    [`TieBreaker`].
//! 5. Commit the top `required_staff` (or all survivors if fewer).
//! 6. Record the shift as scheduled or, if short, as a coverage violation.
//!
//! Commitments are final. A shift is never revisited, even if a later
//! decision would have freed a better registrar; this is a single-pass
//! heuristic, not a solver.
//!
//! # Complexity
//! O(s · r · k) where s=shifts, r=registrars, k=shifts committed per registrar.
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering", §4 (constructive heuristics)

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use super::constraints::ConstraintValidator;
use super::scoring::{rank, Candidate, CandidateScorer, TieBreaker};
use super::{FairnessSummary, Statistics};
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::models::{AssignedRegistrar, Registrar, Schedule, Shift};
use crate::validation::validate_input;

/// Greedy, single-pass rostering engine.
///
/// # Example
///
/// ```
/// use u_roster::config::{HardConstraints, RosterConfig};
/// use u_roster::models::{parse_timestamp, Registrar, Shift};
/// use u_roster::scheduler::GreedyScheduler;
///
/// let config = RosterConfig::new(HardConstraints::new(5, 11.0, 48.0, 3));
/// let registrars = vec![Registrar::new("REG001", "Dr. Ada Shaw")];
/// let shifts = vec![Shift::new(
///     "SHIFT0001",
///     "day",
///     parse_timestamp("2024-06-03 08:00").unwrap(),
///     parse_timestamp("2024-06-03 16:00").unwrap(),
/// )];
///
/// let scheduler = GreedyScheduler::new(config);
/// let (shifts, stats) = scheduler.schedule(&registrars, shifts).unwrap();
/// assert_eq!(shifts[0].assigned_registrars[0].id, "REG001");
/// assert_eq!(stats.scheduled_shifts, 1);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyScheduler {
    config: RosterConfig,
    tie_breaker: TieBreaker,
}

impl GreedyScheduler {
    /// Creates a scheduler with the default tie-breaker.
    pub fn new(config: RosterConfig) -> Self {
        Self {
            config,
            tie_breaker: TieBreaker::default(),
        }
    }

    /// Sets the tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Staffs `shifts` from `registrars`.
    ///
    /// Returns the shifts in processing (start-time) order with
    /// `assigned_registrars` filled in, plus run statistics.
    ///
    /// # Errors
    /// [`RosterError::Config`] if the configuration is out of range;
    /// [`RosterError::InvalidInput`] if registrars or shifts fail
    /// validation. Under-staffed shifts are not errors.
    pub fn schedule(
        &self,
        registrars: &[Registrar],
        mut shifts: Vec<Shift>,
    ) -> Result<(Vec<Shift>, Statistics)> {
        self.config.validate()?;
        validate_input(registrars, &shifts, &self.config).map_err(RosterError::InvalidInput)?;

        shifts.sort_by_key(|s| s.start_time);

        let validator = ConstraintValidator::new(&self.config);
        let scorer = CandidateScorer::new(&self.config);
        let mut jitter = match self.tie_breaker {
            TieBreaker::SeededJitter { seed } => Some(SmallRng::seed_from_u64(seed)),
            TieBreaker::ById | TieBreaker::InputOrder => None,
        };

        let mut schedule = Schedule::new();
        let mut statistics = Statistics::new(shifts.len());

        for shift in shifts.iter_mut() {
            let mut candidates = Vec::new();
            for (index, registrar) in registrars.iter().enumerate() {
                if let Err(rejection) = validator.check(registrar, shift, &schedule) {
                    trace!(shift = %shift.id, registrar = %registrar.id, %rejection, "Candidate rejected");
                    continue;
                }
                let mut score = scorer.score(registrar, shift, &schedule);
                if let Some(rng) = jitter.as_mut() {
                    score += rng.random::<f64>();
                }
                candidates.push(Candidate {
                    index,
                    registrar,
                    score,
                });
            }

            rank(&mut candidates, self.tie_breaker);

            for candidate in candidates.iter().take(shift.required_staff as usize) {
                schedule.commit(&candidate.registrar.id, shift);
                shift
                    .assigned_registrars
                    .push(AssignedRegistrar::from(candidate.registrar));
            }

            debug!(
                shift = %shift.id,
                shift_type = %shift.shift_type,
                feasible = candidates.len(),
                assigned = shift.assigned_registrars.len(),
                required = shift.required_staff,
                "Shift processed"
            );
            if !shift.is_fully_staffed() {
                warn!(
                    shift = %shift.id,
                    date = %shift.date,
                    assigned = shift.assigned_registrars.len(),
                    required = shift.required_staff,
                    "Shift under-staffed"
                );
            }
            statistics.record(shift);
        }

        statistics.fairness_metrics = FairnessSummary::calculate(&schedule, registrars, &self.config);

        info!(
            total = statistics.total_shifts,
            scheduled = statistics.scheduled_shifts,
            unscheduled = statistics.unscheduled_shifts,
            coverage = statistics.coverage_rate(),
            "Schedule generated"
        );

        Ok((shifts, statistics))
    }
}

/// Staffs `shifts` from `registrars` under `config`.
///
/// Shorthand for [`GreedyScheduler::new`] followed by
/// [`GreedyScheduler::schedule`] with the default tie-breaker.
pub fn generate_schedule(
    registrars: &[Registrar],
    shifts: Vec<Shift>,
    config: &RosterConfig,
) -> Result<(Vec<Shift>, Statistics)> {
    GreedyScheduler::new(config.clone()).schedule(registrars, shifts)
}


#[cfg(test)]
mod properties {
    use std::collections::{BTreeMap, HashSet};

    use chrono::{Datelike, Duration, NaiveDate, Weekday};
    use proptest::prelude::*;

    use super::*;
    use crate::config::HardConstraints;
    use crate::models::hours_between;

    type RegistrarParams = (bool, bool, Option<(i64, i64)>, Option<u32>);
    type ShiftParams = (i64, usize, u32);

    fn base() -> NaiveDate {
        // Monday
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn build_registrars(params: &[RegistrarParams]) -> Vec<Registrar> {
        params
            .iter()
            .enumerate()
            .map(|(i, &(nights, weekends, leave, max_consec))| {
                let mut r = Registrar::new(format!("R{i}"), format!("Registrar {i}"));
                if nights {
                    r = r.preferring_nights();
                }
                if weekends {
                    r = r.preferring_weekends();
                }
                if let Some((offset, len)) = leave {
                    let start = base() + Duration::days(offset);
                    r = r.with_leave(start, start + Duration::days(len), "Leave");
                }
                if let Some(max) = max_consec {
                    r = r.with_max_consecutive_shifts(max);
                }
                r
            })
            .collect()
    }

    fn build_shifts(params: &[ShiftParams]) -> Vec<Shift> {
        params
            .iter()
            .enumerate()
            .map(|(i, &(day, kind, required))| {
                let date = base() + Duration::days(day);
                let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
                let (tag, start_hour, hours) = match (kind, weekend) {
                    (0, false) => ("day", 8, 8),
                    (0, true) => ("weekend_day", 8, 12),
                    (1, _) => ("evening", 14, 8),
                    (_, false) => ("night", 22, 10),
                    (_, true) => ("weekend_night", 22, 10),
                };
                let start = date.and_hms_opt(start_hour, 0, 0).unwrap();
                Shift::new(format!("S{i:03}"), tag, start, start + Duration::hours(hours))
                    .with_required_staff(required)
            })
            .collect()
    }

    fn registrar_params() -> impl Strategy<Value = RegistrarParams> {
        (
            any::<bool>(),
            any::<bool>(),
            prop::option::of((0i64..14, 0i64..4)),
            prop::option::of(1u32..6),
        )
    }

    fn tie_breaker() -> impl Strategy<Value = TieBreaker> {
        prop_oneof![
            Just(TieBreaker::ById),
            Just(TieBreaker::InputOrder),
            any::<u64>().prop_map(|seed| TieBreaker::SeededJitter { seed }),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn schedule_respects_hard_constraints(
            registrar_params in prop::collection::vec(registrar_params(), 0..6),
            shift_params in prop::collection::vec((0i64..14, 0usize..3, 0u32..4), 0..30),
            max_consecutive in 1u32..6,
            min_rest in 0u32..13,
            max_weekly in 8u32..60,
            max_nights in 0u32..4,
            tie_breaker in tie_breaker(),
        ) {
            let config = RosterConfig::new(HardConstraints::new(
                max_consecutive,
                min_rest as f64,
                max_weekly as f64,
                max_nights,
            ));
            let registrars = build_registrars(&registrar_params);
            let shifts = build_shifts(&shift_params);
            let scheduler = GreedyScheduler::new(config.clone()).with_tie_breaker(tie_breaker);

            let (out, stats) = scheduler.schedule(&registrars, shifts.clone()).unwrap();

            // Count conservation
            prop_assert_eq!(out.len(), shifts.len());
            prop_assert_eq!(stats.total_shifts, shifts.len());
            prop_assert_eq!(stats.scheduled_shifts + stats.unscheduled_shifts, stats.total_shifts);
            prop_assert_eq!(stats.constraint_violations.len(), stats.unscheduled_shifts);

            let mut assigned_total = 0usize;
            for shift in &out {
                let ids: HashSet<&str> =
                    shift.assigned_registrars.iter().map(|r| r.id.as_str()).collect();
                prop_assert_eq!(ids.len(), shift.assigned_registrars.len());
                prop_assert!(shift.assigned_registrars.len() <= shift.required_staff as usize);
                assigned_total += shift.assigned_registrars.len();
            }
            let fairness_total: usize =
                stats.fairness_metrics.total_shifts_per_registrar.values().sum();
            prop_assert_eq!(assigned_total, fairness_total);

            let schedule = Schedule::from_shifts(&out);
            for registrar in &registrars {
                let committed = schedule.shifts_for(&registrar.id);

                for a in committed {
                    prop_assert!(!registrar.is_on_leave(a.date));
                }

                // Committed lists are in start order
                for (i, earlier) in committed.iter().enumerate() {
                    for later in &committed[i + 1..] {
                        let gap = hours_between(earlier.end_time, later.start_time);
                        prop_assert!(gap > 0.0);
                        prop_assert!(gap >= min_rest as f64);
                    }
                }

                let mut hours: BTreeMap<_, f64> = BTreeMap::new();
                let mut nights: BTreeMap<_, u32> = BTreeMap::new();
                for a in committed {
                    let week = a.date.iso_week();
                    *hours.entry(week).or_default() += a.duration_hours;
                    if config.is_night_family(&a.shift_type) {
                        *nights.entry(week).or_default() += 1;
                    }
                }
                for h in hours.values() {
                    prop_assert!(*h <= max_weekly as f64 + 1e-9);
                }
                for n in nights.values() {
                    prop_assert!(*n <= max_nights);
                }

                let limit = registrar.consecutive_limit(max_consecutive) as usize;
                let mut run = 0usize;
                let mut previous: Option<NaiveDate> = None;
                for a in committed {
                    run = match previous {
                        Some(p) if (a.date - p).num_days() <= 1 => run + 1,
                        _ => 1,
                    };
                    prop_assert!(run <= limit);
                    previous = Some(a.date);
                }
            }
        }

        #[test]
        fn identical_inputs_give_identical_output(
            registrar_params in prop::collection::vec(registrar_params(), 0..6),
            shift_params in prop::collection::vec((0i64..14, 0usize..3, 0u32..4), 0..30),
            tie_breaker in tie_breaker(),
        ) {
            let config = RosterConfig::new(HardConstraints::new(5, 11.0, 48.0, 3));
            let registrars = build_registrars(&registrar_params);
            let shifts = build_shifts(&shift_params);
            let scheduler = GreedyScheduler::new(config).with_tie_breaker(tie_breaker);

            let (a, stats_a) = scheduler.schedule(&registrars, shifts.clone()).unwrap();
            let (b, stats_b) = scheduler.schedule(&registrars, shifts).unwrap();
            prop_assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
            prop_assert_eq!(serde_json::to_string(&stats_a).unwrap(), serde_json::to_string(&stats_b).unwrap());
        }
    }
}
