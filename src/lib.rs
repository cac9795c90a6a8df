//! Staff rostering for the U-Engine ecosystem.
//!
//! Assigns registrars to hospital shifts under hard labour constraints,
//! ranks eligible staff by soft preferences, and reports coverage and
//! workload fairness.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Registrar`, `Shift`, `ShiftType`,
//!   `Schedule`, `Assignment`
//! - **`config`**: Hard constraints, scoring weights, shift type table (YAML)
//! - **`validation`**: Input integrity checks (duplicate IDs, shift windows, unknown types)
//! - **`scheduler`**: Constraint validator, candidate scorer, greedy engine,
//!   fairness summary
//! - **`error`**: Crate error types
//!
//! # Example
//!
//! ```
//! use u_roster::config::RosterConfig;
//! use u_roster::models::{parse_timestamp, Registrar, Shift};
//! use u_roster::generate_schedule;
//!
//! let config = RosterConfig::from_yaml_str(
//!     "hard_constraints:\n  max_consecutive_shifts: 5\n  min_rest_hours: 11\n  \
//!      max_weekly_hours: 48\n  max_night_shifts_per_week: 3\n",
//! )
//! .unwrap();
//!
//! let registrars = vec![
//!     Registrar::new("REG001", "Dr. Ada Shaw"),
//!     Registrar::new("REG002", "Dr. Ben Osei").preferring_nights(),
//! ];
//! let shifts = vec![Shift::new(
//!     "SHIFT0001",
//!     "night",
//!     parse_timestamp("2024-06-03 22:00").unwrap(),
//!     parse_timestamp("2024-06-04 08:00").unwrap(),
//! )];
//!
//! let (shifts, stats) = generate_schedule(&registrars, shifts, &config).unwrap();
//! assert_eq!(shifts[0].assigned_registrars[0].id, "REG002");
//! assert!(stats.is_fully_covered());
//! ```
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of applications, methods and models"

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::RosterConfig;
pub use error::{ConfigError, Result, RosterError};
pub use scheduler::{explain_assignment, generate_schedule, GreedyScheduler, Statistics};
