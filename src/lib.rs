//! # prescription_deadline
//!
//! Statute-of-limitations deadlines for administrative infractions.
//!
//! Given the date an infraction process was initiated, [`compute`] returns the
//! prescription deadline for each severity tier (1, 2 and 5 years), after
//! adding the administrative grace period and skipping the suspension windows
//! during which the term does not run.
//!
//! ```
//! use prescription_deadline::{CalendarDate, InfractionTier, compute};
//!
//! let initial: CalendarDate = "01/03/2022".parse().unwrap();
//! let result = compute(initial).unwrap();
//! assert_eq!(result.get(InfractionTier::Minor).day_first().to_string(), "20/08/2023");
//! ```
//!
//! ## Modules
//!
//! - [`CalendarDate`]: validated Gregorian dates, parsing and day arithmetic
//! - [`FixedWindow`] / [`AnnualWindow`]: one-off and recurring suspension windows
//! - [`DayAdder`]: term counting across suspension windows
//! - [`PrescriptionEngine`]: the deadline pipeline and its [`PrescriptionRules`]

mod adder;
mod consts;
mod date;
mod engine;
mod error;
mod prelude;
mod types;
mod window;

pub use adder::{DayAdder, SuspensionMode};
pub use consts::*;
pub use date::{CalendarDate, DayFirst};
pub use engine::{
    InfractionTier, PrescriptionEngine, PrescriptionResult, PrescriptionRules, TierCorrection,
    TierDurations, compute,
};
pub use error::{ParseError, PrescriptionError};
pub use types::{Day, Month, MonthDay, Year, days_in_month, is_leap_year};
pub use window::{AnnualWindow, DateRange, FixedWindow, RangeError};
