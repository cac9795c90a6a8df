//! Human-readable assignment explanations.

use super::scoring::CandidateScorer;
use crate::config::RosterConfig;
use crate::models::{Registrar, Schedule, Shift};

/// Explains why `registrar` was placed on `shift`.
///
/// Lists the preference terms that scored for the pair, then the
/// registrar's load in `schedule`. Pass the final schedule (for example
/// [`Schedule::from_shifts`] over the engine's output) to report the load
/// the way the run ended.
///
/// # Example
///
/// ```
/// use u_roster::config::{HardConstraints, RosterConfig};
/// use u_roster::models::{parse_timestamp, Registrar, Schedule, Shift};
/// use u_roster::scheduler::explain_assignment;
///
/// let config = RosterConfig::new(HardConstraints::new(5, 11.0, 48.0, 3));
/// let owl = Registrar::new("R1", "Dr. Owl").preferring_nights();
/// let night = Shift::new(
///     "N1",
///     "night",
///     parse_timestamp("2024-06-04 22:00").unwrap(),
///     parse_timestamp("2024-06-05 08:00").unwrap(),
/// );
///
/// let text = explain_assignment(&owl, &night, &Schedule::new(), &config);
/// assert_eq!(
///     text,
///     "Assigned because they prefers night shifts, had 0 shifts assigned (fair distribution)"
/// );
/// ```
pub fn explain_assignment(
    registrar: &Registrar,
    shift: &Shift,
    schedule: &Schedule,
    config: &RosterConfig,
) -> String {
    let terms = CandidateScorer::new(config).breakdown(registrar, shift, schedule);
    let mut reasons = Vec::new();

    if terms.night_preference != 0.0 {
        reasons.push("prefers night shifts".to_string());
    }
    if terms.weekend_preference != 0.0 {
        reasons.push("prefers weekend work".to_string());
    }
    if terms.preferred_day != 0.0 {
        reasons.push(format!("requested to work {}s", shift.day_of_week));
    }
    reasons.push(format!(
        "had {} shifts assigned (fair distribution)",
        schedule.shift_count(&registrar.id)
    ));

    format!("Assigned because they {}", reasons.join(", "))
}
