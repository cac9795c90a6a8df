//! Candidate scoring.
//!
//! Ranks feasible registrars for a shift. Higher scores win. The score is
//! a sum of independent terms:
//!
//! | Term | Default | Applies when |
//! |------|---------|--------------|
//! | Load balance | −2 × committed | always |
//! | Night preference | +10 | night-family shift, registrar prefers nights |
//! | Weekend preference | +8 | weekend-family shift, registrar prefers weekends |
//! | Preferred day | +5 | shift weekday in registrar's preferred days |
//! | Night run | −15 | night-family shift right after a night-family commitment |
//!
//! Weights come from [`ScoringWeights`](crate::config::ScoringWeights).
//! Scores are deterministic; ties are settled by [`TieBreaker`].

use std::cmp::Ordering;

use crate::config::RosterConfig;
use crate::models::{Registrar, Schedule, Shift};

/// How candidates with equal scores are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreaker {
    /// Registrar ID, lexicographic (default).
    #[default]
    ById,
    /// Registrar input order.
    InputOrder,
    /// Adds a `[0, 1)` perturbation from an RNG seeded with `seed`.
    ///
    /// Varies who wins close calls while staying reproducible for a given
    /// seed. Remaining exact ties fall back to registrar ID.
    SeededJitter { seed: u64 },
}

/// Per-term score contributions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    /// Load-balancing term (≤ 0).
    pub load_balance: f64,
    /// Night preference bonus.
    pub night_preference: f64,
    /// Weekend preference bonus.
    pub weekend_preference: f64,
    /// Preferred weekday bonus.
    pub preferred_day: f64,
    /// Back-to-back night penalty (≤ 0).
    pub night_run: f64,
}

impl ScoreBreakdown {
    /// Sum of all terms.
    pub fn total(&self) -> f64 {
        self.load_balance
            + self.night_preference
            + self.weekend_preference
            + self.preferred_day
            + self.night_run
    }
}

/// Scores feasible candidates for a shift.
#[derive(Debug, Clone, Copy)]
pub struct CandidateScorer<'a> {
    config: &'a RosterConfig,
}

impl<'a> CandidateScorer<'a> {
    /// Creates a scorer for `config`.
    pub fn new(config: &'a RosterConfig) -> Self {
        Self { config }
    }

    /// Scores `registrar` for `shift`. Higher is better.
    pub fn score(&self, registrar: &Registrar, shift: &Shift, schedule: &Schedule) -> f64 {
        self.breakdown(registrar, shift, schedule).total()
    }

    /// Individual score terms for `registrar` on `shift`.
    pub fn breakdown(
        &self,
        registrar: &Registrar,
        shift: &Shift,
        schedule: &Schedule,
    ) -> ScoreBreakdown {
        let w = &self.config.soft_constraints;
        let is_night = self.config.is_night_family(&shift.shift_type);
        let mut b = ScoreBreakdown {
            load_balance: -w.load_balance_penalty * schedule.shift_count(&registrar.id) as f64,
            ..Default::default()
        };

        if is_night && registrar.prefers_nights {
            b.night_preference = w.night_preference_bonus;
        }
        if self.config.is_weekend_family(&shift.shift_type) && registrar.prefers_weekends {
            b.weekend_preference = w.weekend_preference_bonus;
        }
        if registrar.prefers_day(&shift.day_of_week) {
            b.preferred_day = w.preferred_day_bonus;
        }
        if is_night
            && schedule
                .last_for(&registrar.id)
                .is_some_and(|last| self.config.is_night_family(&last.shift_type))
        {
            b.night_run = -w.consecutive_night_penalty;
        }
        b
    }
}

/// A feasible candidate awaiting ranking.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate<'r> {
    /// Position in the registrar input slice.
    pub index: usize,
    pub registrar: &'r Registrar,
    pub score: f64,
}

/// Orders candidates best-first, settling equal scores with `tie_breaker`.
pub(crate) fn rank(candidates: &mut [Candidate<'_>], tie_breaker: TieBreaker) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| match tie_breaker {
                TieBreaker::InputOrder => a.index.cmp(&b.index),
                TieBreaker::ById | TieBreaker::SeededJitter { .. } => {
                    a.registrar.id.cmp(&b.registrar.id)
                }
            })
    });
}
