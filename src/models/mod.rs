//! Rostering domain models.
//!
//! Provides the data types for a rostering run: the staff being rostered,
//! the shifts to be staffed, and the working schedule the engine builds.
//!
//! # Domain Mappings
//!
//! | u-roster | Hospital | Retail | Transport |
//! |----------|----------|--------|-----------|
//! | Registrar | Doctor | Store Assistant | Driver |
//! | Shift | Ward Shift | Till Shift | Duty |
//! | Schedule | Rota | Staff Plan | Duty Roster |

mod registrar;
mod schedule;
mod shift;

pub use registrar::{LeaveRequest, Registrar};
pub use schedule::{Assignment, Schedule};
pub(crate) use shift::hours_between;
pub use shift::{parse_timestamp, weekday_name, AssignedRegistrar, Shift, ShiftType};
