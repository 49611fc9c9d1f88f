//! Gregorian calendar dates with whole-day arithmetic.

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{Day, Month, Year, days_in_month, roll_over};
use crate::{
    DATE_SEPARATOR, DAY_FIRST_SEPARATOR, DECEMBER, JANUARY, MIN_DAY, ParseError, prelude::*,
};

/// A calendar date with no time-of-day component.
///
/// Every value is a real Gregorian date between `0001-01-01` and `9999-12-31`.
/// Arithmetic is checked and returns `None` when a result would leave that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

/// Renders a [`CalendarDate`] as zero-padded `DD/MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(fmt = "{}/{}/{}", "_0.day", "_0.month", "_0.year")]
pub struct DayFirst(CalendarDate);

impl CalendarDate {
    /// Creates a date from raw components.
    ///
    /// # Errors
    /// Returns `ParseError` if any component is out of range for the calendar.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
            day:   Day::new(day, year, month)?,
        })
    }

    /// Compile-time constructor for known-good constants.
    pub(crate) const fn from_ymd_const(year: u16, month: u8, day: u8) -> Self {
        Self {
            year:  Year::new_const(year),
            month: Month::new_const(month),
            day:   Day::new_const(day, year, month),
        }
    }

    pub const fn year(self) -> u16 {
        self.year.get()
    }

    pub const fn month(self) -> u8 {
        self.month.get()
    }

    pub const fn day(self) -> u8 {
        self.day.get()
    }

    /// Returns the components as a `(year, month, day)` tuple.
    pub const fn to_ymd(self) -> (u16, u8, u8) {
        (self.year(), self.month(), self.day())
    }

    /// Display adapter for the day-first presentation format.
    pub const fn day_first(self) -> DayFirst {
        DayFirst(self)
    }

    /// The following calendar day, or `None` after `9999-12-31`.
    pub fn succ(self) -> Option<Self> {
        let (year, month, day) = self.to_ymd();
        if day < days_in_month(year, month) {
            Self::from_ymd(year, month, day + 1).ok()
        } else if month == DECEMBER {
            Self::from_ymd(year.checked_add(1)?, JANUARY, MIN_DAY).ok()
        } else {
            Self::from_ymd(year, month + 1, MIN_DAY).ok()
        }
    }

    pub fn checked_add_days(self, days: u32) -> Option<Self> {
        self.to_naive()?
            .checked_add_days(Days::new(u64::from(days)))
            .and_then(|date| Self::try_from(date).ok())
    }

    pub fn checked_sub_days(self, days: u32) -> Option<Self> {
        self.to_naive()?
            .checked_sub_days(Days::new(u64::from(days)))
            .and_then(|date| Self::try_from(date).ok())
    }

    /// Moves the date forward by whole years, keeping month and day.
    ///
    /// February 29 lands on March 1 when the target year is not a leap year.
    pub fn add_years(self, years: u16) -> Option<Self> {
        let target = self.year().checked_add(years)?;
        let (year, month, day) = roll_over(target, self.month(), self.day());
        Self::from_ymd(year, month, day).ok()
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: Self) -> Option<i64> {
        Some(
            self.to_naive()?
                .signed_duration_since(earlier.to_naive()?)
                .num_days(),
        )
    }

    fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year()),
            u32::from(self.month()),
            u32::from(self.day()),
        )
    }

    fn parse_component<T: FromStr>(part: &str, width: Option<usize>) -> Result<T, ParseError> {
        let digits_only = !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        let width_ok = width.is_none_or(|w| part.len() == w);
        if !digits_only || !width_ok {
            return Err(ParseError::InvalidFormat(part.to_owned()));
        }
        part.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(part.to_owned()))
    }

    /// `YYYY-MM-DD`
    fn parse_iso(parts: &[&str]) -> Result<Self, ParseError> {
        let [year, month, day] = parts else {
            return Err(ParseError::InvalidFormat(parts.join("-")));
        };
        let year = Self::parse_component::<u16>(year, None)?;
        let month = Self::parse_component::<u8>(month, None)?;
        let day = Self::parse_component::<u8>(day, None)?;
        Self::from_ymd(year, month, day)
    }

    /// `DD/MM/YYYY`, fixed widths
    fn parse_day_first(parts: &[&str]) -> Result<Self, ParseError> {
        let [day, month, year] = parts else {
            return Err(ParseError::InvalidFormat(parts.join("/")));
        };
        let day = Self::parse_component::<u8>(day, Some(2))?;
        let month = Self::parse_component::<u8>(month, Some(2))?;
        let year = Self::parse_component::<u16>(year, Some(4))?;
        Self::from_ymd(year, month, day)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(date.year()).map_err(|_| {
            ParseError::InvalidFormat(format!("year {} out of range", date.year()))
        })?;
        let month = u8::try_from(date.month()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        let day = u8::try_from(date.day()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        Self::from_ymd(year, month, day)
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_slash = trimmed.contains(DAY_FIRST_SEPARATOR);

        if has_hyphen && has_slash {
            return Err(ParseError::InvalidFormat(format!(
                "Mixed delimiters ({DATE_SEPARATOR} and {DAY_FIRST_SEPARATOR})"
            )));
        }

        if has_hyphen {
            let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
            Self::parse_iso(&parts)
        } else if has_slash {
            let parts: Vec<&str> = trimmed.split(DAY_FIRST_SEPARATOR).collect();
            Self::parse_day_first(&parts)
        } else {
            Err(ParseError::InvalidFormat(trimmed.to_owned()))
        }
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
