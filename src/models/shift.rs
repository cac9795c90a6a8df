//! Shift model.
//!
//! A shift is a dated, time-bounded unit of required staffing. Shifts are
//! supplied fully formed; the engine only ever touches
//! `assigned_registrars`.
//!
//! # Time Model
//! Timestamps are naive local wall-clock times. A night shift belongs to
//! the calendar `date` on which it starts, even though it ends the next day.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use super::Registrar;

/// A shift to be staffed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    /// Unique shift identifier.
    pub id: String,
    /// Calendar date the shift starts on.
    pub date: NaiveDate,
    /// Lowercase weekday name of `date` (e.g. "monday").
    pub day_of_week: String,
    /// Shift type tag.
    pub shift_type: ShiftType,
    /// Start timestamp.
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    /// End timestamp.
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
    /// Paid duration in hours (counted against weekly caps).
    pub duration_hours: f64,
    /// Number of registrars needed.
    pub required_staff: u32,
    /// Desirability weight carried through from the shift template.
    #[serde(default)]
    pub desirability_score: f64,
    /// Registrars committed to this shift. Filled in by the engine.
    #[serde(default)]
    pub assigned_registrars: Vec<AssignedRegistrar>,
}

/// A registrar reference recorded on a staffed shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedRegistrar {
    /// Registrar ID.
    pub id: String,
    /// Registrar name (denormalized for display).
    pub name: String,
    /// Seniority tier (denormalized for display).
    pub seniority: String,
}

/// Shift type tag.
///
/// The five built-in tags cover the usual hospital rota. Any other tag is
/// kept as `Custom` and must be declared in the configuration's
/// `shift_types` table, which decides whether it is night work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShiftType {
    Day,
    Evening,
    Night,
    WeekendDay,
    WeekendNight,
    /// Configuration-defined tag.
    Custom(String),
}

impl ShiftType {
    /// Tag as written in input records.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Day => "day",
            Self::Evening => "evening",
            Self::Night => "night",
            Self::WeekendDay => "weekend_day",
            Self::WeekendNight => "weekend_night",
            Self::Custom(tag) => tag,
        }
    }

    /// Whether this is one of the built-in tags.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Whether this is a built-in night tag.
    ///
    /// Custom tags are classified by
    /// [`RosterConfig::is_night_family`](crate::config::RosterConfig::is_night_family).
    pub fn is_builtin_night(&self) -> bool {
        matches!(self, Self::Night | Self::WeekendNight)
    }

    /// Weekend family: any tag containing "weekend".
    pub fn is_weekend(&self) -> bool {
        self.as_str().contains("weekend")
    }
}

impl From<&str> for ShiftType {
    fn from(tag: &str) -> Self {
        match tag {
            "day" => Self::Day,
            "evening" => Self::Evening,
            "night" => Self::Night,
            "weekend_day" => Self::WeekendDay,
            "weekend_night" => Self::WeekendNight,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for ShiftType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "day" | "evening" | "night" | "weekend_day" | "weekend_night" => {
                Self::from(tag.as_str())
            }
            _ => Self::Custom(tag),
        }
    }
}

impl From<ShiftType> for String {
    fn from(shift_type: ShiftType) -> Self {
        match shift_type {
            ShiftType::Custom(tag) => tag,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Shift {
    /// Creates a shift spanning `[start_time, end_time)`.
    ///
    /// `date` and `day_of_week` are derived from the start, and the
    /// duration from the span. One registrar is required by default.
    pub fn new(
        id: impl Into<String>,
        shift_type: impl Into<ShiftType>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        let date = start_time.date();
        Self {
            id: id.into(),
            date,
            day_of_week: weekday_name(date.weekday()).to_string(),
            shift_type: shift_type.into(),
            start_time,
            end_time,
            duration_hours: hours_between(start_time, end_time),
            required_staff: 1,
            desirability_score: 0.0,
            assigned_registrars: Vec::new(),
        }
    }

    /// Sets the required staff count.
    pub fn with_required_staff(mut self, required_staff: u32) -> Self {
        self.required_staff = required_staff;
        self
    }

    /// Overrides the paid duration.
    pub fn with_duration_hours(mut self, duration_hours: f64) -> Self {
        self.duration_hours = duration_hours;
        self
    }

    /// Sets the desirability weight.
    pub fn with_desirability(mut self, score: f64) -> Self {
        self.desirability_score = score;
        self
    }

    /// Whether enough registrars are assigned.
    pub fn is_fully_staffed(&self) -> bool {
        self.assigned_registrars.len() >= self.required_staff as usize
    }

    /// Whether a registrar is assigned to this shift.
    pub fn has_registrar(&self, registrar_id: &str) -> bool {
        self.assigned_registrars.iter().any(|r| r.id == registrar_id)
    }
}

impl From<&Registrar> for AssignedRegistrar {
    fn from(registrar: &Registrar) -> Self {
        Self {
            id: registrar.id.clone(),
            name: registrar.name.clone(),
            seniority: registrar.seniority.clone(),
        }
    }
}

/// Lowercase English weekday name.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Signed number of hours from `from` to `to`.
#[inline]
pub(crate) fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}

/// Parses a shift timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM`, `YYYY-MM-DD HH:MM:SS`, and the ISO-8601
/// `T`-separated forms of both.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    timestamp::FORMATS[1..].iter().fold(
        NaiveDateTime::parse_from_str(raw, timestamp::FORMATS[0]),
        |parsed, format| parsed.or_else(|_| NaiveDateTime::parse_from_str(raw, format)),
    )
}

mod timestamp {
    use chrono::{NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let format = if ts.second() == 0 { FORMATS[0] } else { FORMATS[1] };
        serializer.serialize_str(&ts.format(format).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> NaiveDateTime {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn test_shift_builder_derives_calendar_fields() {
        let s = Shift::new("S1", "night", ts("2024-06-07 22:00"), ts("2024-06-08 08:00"))
            .with_required_staff(2)
            .with_desirability(-3.0);

        assert_eq!(s.date, NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
        assert_eq!(s.day_of_week, "friday");
        assert_eq!(s.shift_type, ShiftType::Night);
        assert!((s.duration_hours - 10.0).abs() < 1e-10);
        assert_eq!(s.required_staff, 2);
        assert!(!s.is_fully_staffed());
    }

    #[test]
    fn test_shift_type_tags() {
        assert_eq!(ShiftType::from("weekend_night"), ShiftType::WeekendNight);
        assert_eq!(
            ShiftType::from("on_call".to_string()),
            ShiftType::Custom("on_call".into())
        );
        assert!(ShiftType::WeekendDay.is_weekend());
        assert!(!ShiftType::WeekendDay.is_builtin_night());
        assert!(ShiftType::WeekendNight.is_builtin_night());
        assert!(ShiftType::Custom("weekend_on_call".into()).is_weekend());
        assert!(!ShiftType::Custom("x".into()).is_builtin());
        assert_eq!(ShiftType::Evening.to_string(), "evening");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(ts("2024-06-01 08:00"), expected);
        assert_eq!(ts("2024-06-01T08:00"), expected);
        assert_eq!(ts("2024-06-01T08:00:00"), expected);
        assert!(parse_timestamp("2024-06-01").is_err());
        assert!(parse_timestamp("01/06/2024 08:00").is_err());
    }

    #[test]
    fn test_shift_json_shape() {
        let json = r#"{
            "id": "SHIFT0001",
            "date": "2024-06-03",
            "day_of_week": "monday",
            "shift_type": "day",
            "start_time": "2024-06-03 08:00",
            "end_time": "2024-06-03 16:00",
            "duration_hours": 8,
            "required_staff": 3,
            "desirability_score": 5
        }"#;
        let s: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(s.shift_type, ShiftType::Day);
        assert!(s.assigned_registrars.is_empty());

        let out = serde_json::to_value(&s).unwrap();
        assert_eq!(out["start_time"], "2024-06-03 08:00");
        assert_eq!(out["shift_type"], "day");
    }

    #[test]
    fn test_malformed_timestamp_rejected() {
        let json = r#"{
            "id": "S", "date": "2024-06-03", "day_of_week": "monday",
            "shift_type": "day", "start_time": "tomorrow morning",
            "end_time": "2024-06-03 16:00", "duration_hours": 8, "required_staff": 1
        }"#;
        let err = serde_json::from_str::<Shift>(json).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }

    #[test]
    fn test_malformed_date_rejected() {
        let json = r#"{
            "id": "S", "date": "2024-13-03", "day_of_week": "monday",
            "shift_type": "day", "start_time": "2024-06-03 08:00",
            "end_time": "2024-06-03 16:00", "duration_hours": 8, "required_staff": 1
        }"#;
        assert!(serde_json::from_str::<Shift>(json).is_err());
    }
}
