//! Error types for date parsing and deadline computation.

use crate::{CalendarDate, MAX_MONTH, MAX_YEAR, prelude::*};

/// Rejection of a calendar date at the input boundary.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Failure of a deadline computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrescriptionError {
    /// Day arithmetic left the representable calendar (years 1-9999).
    #[error("Date arithmetic overflow: {date} shifted by {days} days leaves years 1-{max}", max = MAX_YEAR)]
    Overflow { date: CalendarDate, days: i64 },

    /// Error parsing the initiating date.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Rules document could not be loaded.
    #[error("Invalid prescription rules: {0}")]
    InvalidRules(String),
}

impl PrescriptionError {
    pub(crate) fn overflow(date: CalendarDate, days: impl Into<i64>) -> Self {
        Self::Overflow {
            date,
            days: days.into(),
        }
    }
}
