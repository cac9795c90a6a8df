//! Greedy roster construction and fairness metrics.
//!
//! # Pipeline
//!
//! | Stage | Component | Role |
//! |-------|-----------|------|
//! | Filter | [`ConstraintValidator`] | Hard constraints: leave, consecutive shifts, rest, weekly caps |
//! | Rank | [`CandidateScorer`] | Soft preferences and load balancing |
//! | Commit | [`GreedyScheduler`] | Shift-by-shift, best-first, no backtracking |
//! | Summarize | [`FairnessSummary`], [`Statistics`] | Coverage and workload spread |
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of applications, methods and models"

mod constraints;
mod explain;
mod fairness;
mod greedy;
mod scoring;
mod stats;

pub use constraints::{ConstraintValidator, Rejection};
pub use explain::explain_assignment;
pub use fairness::{FairnessSummary, Spread};
pub use greedy::{generate_schedule, GreedyScheduler};
pub use scoring::{CandidateScorer, ScoreBreakdown, TieBreaker};
pub use stats::{CoverageViolation, Statistics, INSUFFICIENT_REGISTRARS};
