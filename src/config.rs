//! Rostering configuration.
//!
//! Mirrors the `constraints.yaml` layout used by rota planners:
//!
//! ```yaml
//! hard_constraints:
//!   max_consecutive_shifts: 5
//!   min_rest_hours: 11
//!   max_weekly_hours: 48
//!   max_night_shifts_per_week: 3
//!   min_registrars_per_shift:
//!     day: 3
//!     night: 2
//! soft_constraints:
//!   night_preference_bonus: 10
//! shift_types:
//!   on_call:
//!     start_hour: 17
//!     end_hour: 9
//!     duration_hours: 16
//!     night: true
//! ```
//!
//! Every `hard_constraints` limit is required; a missing key fails the load
//! instead of falling back to a default. `soft_constraints` may be omitted,
//! in which case [`ScoringWeights::default`] applies.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::models::ShiftType;

/// Complete configuration for a rostering run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Limits that make an assignment illegal when breached.
    pub hard_constraints: HardConstraints,
    /// Candidate scoring weights.
    #[serde(default)]
    pub soft_constraints: ScoringWeights,
    /// Shift type definitions, keyed by tag.
    ///
    /// Required for custom tags; optional for the built-in ones.
    #[serde(default)]
    pub shift_types: BTreeMap<String, ShiftTypeDefinition>,
}

/// Hard constraint limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardConstraints {
    /// Default consecutive-shift bound for registrars without their own.
    pub max_consecutive_shifts: u32,
    /// Minimum hours between the end of one shift and the start of the next.
    pub min_rest_hours: f64,
    /// Maximum paid hours per Monday-start week.
    pub max_weekly_hours: f64,
    /// Maximum night-family shifts per Monday-start week.
    pub max_night_shifts_per_week: u32,
    /// Staffing level per shift type. Read by shift suppliers, not the engine.
    #[serde(default)]
    pub min_registrars_per_shift: BTreeMap<String, u32>,
}

/// Candidate scoring weights.
///
/// All values are magnitudes; penalties are subtracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Subtracted once per shift already committed to the candidate.
    pub load_balance_penalty: f64,
    /// Night-family shift and the registrar prefers nights.
    pub night_preference_bonus: f64,
    /// Weekend-family shift and the registrar prefers weekends.
    pub weekend_preference_bonus: f64,
    /// Shift falls on one of the registrar's preferred weekdays.
    pub preferred_day_bonus: f64,
    /// Night shift directly after the registrar's previous night shift.
    pub consecutive_night_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            load_balance_penalty: 2.0,
            night_preference_bonus: 10.0,
            weekend_preference_bonus: 8.0,
            preferred_day_bonus: 5.0,
            consecutive_night_penalty: 15.0,
        }
    }
}

/// Shift type template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftTypeDefinition {
    /// Start hour (0-23).
    #[serde(default)]
    pub start_hour: Option<u32>,
    /// End hour (0-23). Earlier than `start_hour` means the shift ends next day.
    #[serde(default)]
    pub end_hour: Option<u32>,
    /// Paid hours.
    #[serde(default)]
    pub duration_hours: Option<f64>,
    /// Desirability weight.
    #[serde(default)]
    pub desirability_score: f64,
    /// Counts as night work. Only consulted for custom tags.
    #[serde(default)]
    pub night: bool,
}

impl HardConstraints {
    /// Creates hard limits with no per-type staffing levels.
    pub fn new(
        max_consecutive_shifts: u32,
        min_rest_hours: f64,
        max_weekly_hours: f64,
        max_night_shifts_per_week: u32,
    ) -> Self {
        Self {
            max_consecutive_shifts,
            min_rest_hours,
            max_weekly_hours,
            max_night_shifts_per_week,
            min_registrars_per_shift: BTreeMap::new(),
        }
    }

    /// Sets the staffing level for a shift type.
    pub fn with_staffing(mut self, shift_type: impl Into<ShiftType>, count: u32) -> Self {
        self.min_registrars_per_shift
            .insert(shift_type.into().as_str().to_string(), count);
        self
    }
}

impl RosterConfig {
    /// Creates a configuration with default scoring weights.
    pub fn new(hard_constraints: HardConstraints) -> Self {
        Self {
            hard_constraints,
            soft_constraints: ScoringWeights::default(),
            shift_types: BTreeMap::new(),
        }
    }

    /// Sets the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.soft_constraints = weights;
        self
    }

    /// Adds a shift type definition.
    pub fn with_shift_type(mut self, tag: impl Into<String>, def: ShiftTypeDefinition) -> Self {
        self.shift_types.insert(tag.into(), def);
        self
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&raw)?;
        debug!(path = %path.display(), shift_types = config.shift_types.len(), "Loaded roster config");
        Ok(config)
    }

    /// Checks that every limit is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hard = &self.hard_constraints;
        if hard.max_consecutive_shifts == 0 {
            return Err(ConfigError::invalid(
                "hard_constraints.max_consecutive_shifts",
                "must be at least 1",
            ));
        }
        if !hard.min_rest_hours.is_finite() || hard.min_rest_hours < 0.0 {
            return Err(ConfigError::invalid(
                "hard_constraints.min_rest_hours",
                format!("must be a non-negative number, got {}", hard.min_rest_hours),
            ));
        }
        if !hard.max_weekly_hours.is_finite() || hard.max_weekly_hours <= 0.0 {
            return Err(ConfigError::invalid(
                "hard_constraints.max_weekly_hours",
                format!("must be a positive number, got {}", hard.max_weekly_hours),
            ));
        }

        let w = &self.soft_constraints;
        for (key, value) in [
            ("load_balance_penalty", w.load_balance_penalty),
            ("night_preference_bonus", w.night_preference_bonus),
            ("weekend_preference_bonus", w.weekend_preference_bonus),
            ("preferred_day_bonus", w.preferred_day_bonus),
            ("consecutive_night_penalty", w.consecutive_night_penalty),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(
                    format!("soft_constraints.{key}"),
                    "must be finite",
                ));
            }
        }

        for (tag, def) in &self.shift_types {
            for (field, hour) in [("start_hour", def.start_hour), ("end_hour", def.end_hour)] {
                if hour.is_some_and(|h| h > 23) {
                    return Err(ConfigError::invalid(
                        format!("shift_types.{tag}.{field}"),
                        "must be between 0 and 23",
                    ));
                }
            }
            if def.duration_hours.is_some_and(|h| !h.is_finite() || h <= 0.0) {
                return Err(ConfigError::invalid(
                    format!("shift_types.{tag}.duration_hours"),
                    "must be a positive number",
                ));
            }
        }

        for tag in self.hard_constraints.min_registrars_per_shift.keys() {
            if !self.is_known_shift_type(&ShiftType::from(tag.as_str())) {
                return Err(ConfigError::UnknownShiftType(tag.clone()));
            }
        }

        Ok(())
    }

    /// Whether `shift_type` is usable with this configuration.
    pub fn is_known_shift_type(&self, shift_type: &ShiftType) -> bool {
        shift_type.is_builtin() || self.shift_types.contains_key(shift_type.as_str())
    }

    /// Night family: `night`, `weekend_night`, and custom tags declared with `night: true`.
    pub fn is_night_family(&self, shift_type: &ShiftType) -> bool {
        match shift_type {
            ShiftType::Custom(tag) => self.shift_types.get(tag).is_some_and(|def| def.night),
            builtin => builtin.is_builtin_night(),
        }
    }

    /// Weekend family: any tag containing "weekend".
    pub fn is_weekend_family(&self, shift_type: &ShiftType) -> bool {
        shift_type.is_weekend()
    }

    /// Configured staffing level for a shift type.
    ///
    /// Fails when the type has no entry; there is no fallback level.
    pub fn required_staff_for(&self, shift_type: &ShiftType) -> Result<u32, ConfigError> {
        self.hard_constraints
            .min_registrars_per_shift
            .get(shift_type.as_str())
            .copied()
            .ok_or_else(|| ConfigError::MissingStaffingLevel(shift_type.to_string()))
    }
}
