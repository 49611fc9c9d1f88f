use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_DAY, REFERENCE_LEAP_YEAR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;
use std::str::FromStr;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Compile-time constructor; an out-of-range value fails const evaluation.
    pub(crate) const fn new_const(value: u16) -> Self {
        assert!(value <= MAX_YEAR, "year out of range");
        match NonZeroU16::new(value) {
            Some(non_zero) => Self(non_zero),
            None => panic!("year must be non-zero"),
        }
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.get())
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    pub(crate) const fn new_const(value: u8) -> Self {
        assert!(value <= MAX_MONTH, "month out of range");
        match NonZeroU8::new(value) {
            Some(non_zero) => Self(non_zero),
            None => panic!("month must be non-zero"),
        }
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

/// A day-of-month value, validated against a concrete year and month on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and valid for the given year and month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or invalid for the given year and month.
    pub fn new(value: u8, year: u16, month: u8) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            month,
            day: value,
            year,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if month == 0 || month > MAX_MONTH || value > days_in_month(year, month) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    pub(crate) const fn new_const(value: u8, year: u16, month: u8) -> Self {
        assert!(value <= days_in_month(year, month), "day out of range for month");
        match NonZeroU8::new(value) {
            Some(non_zero) => Self(non_zero),
            None => panic!("day must be non-zero"),
        }
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

/// A month/day anchor that recurs every year, e.g. `12-20`.
///
/// February 29 is accepted. When resolved in a non-leap year it rolls over
/// to March 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{month}-{day}")]
pub struct MonthDay {
    month: Month,
    day:   Day,
}

impl MonthDay {
    /// # Errors
    /// Returns `ParseError` if the month is out of range or the day can never occur in it.
    pub fn new(month: u8, day: u8) -> Result<Self, ParseError> {
        let month_nz = Month::new(month)?;
        let day_nz = Day::new(day, REFERENCE_LEAP_YEAR, month)?;
        Ok(Self {
            month: month_nz,
            day:   day_nz,
        })
    }

    pub(crate) const fn new_const(month: u8, day: u8) -> Self {
        Self {
            month: Month::new_const(month),
            day:   Day::new_const(day, REFERENCE_LEAP_YEAR, month),
        }
    }

    pub const fn month(self) -> u8 {
        self.month.get()
    }

    pub const fn day(self) -> u8 {
        self.day.get()
    }
}

impl FromStr for MonthDay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let (month, day) = trimmed
            .split_once(DATE_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))?;
        let month = month
            .trim()
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))?;
        let day = day
            .trim()
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))?;
        Self::new(month, day)
    }
}

impl Serialize for MonthDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Clamps a day-of-month that overflowed its month onto the first day of the next month.
/// Only ever needed for February 29 in non-leap years.
pub(crate) const fn roll_over(year: u16, month: u8, day: u8) -> (u16, u8, u8) {
    if day <= days_in_month(year, month) {
        (year, month, day)
    } else if month == MAX_MONTH {
        (year + 1, 1, MIN_DAY)
    } else {
        (year, month + 1, MIN_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2021).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid() {
        assert!(matches!(Year::new(0), Err(ParseError::InvalidYear(0))));
        assert!(matches!(Year::new(10000), Err(ParseError::InvalidYear(10000))));
    }

    #[test]
    fn test_year_display_is_padded() {
        assert_eq!(Year::new(2024).unwrap().to_string(), "2024");
        assert_eq!(Year::new(33).unwrap().to_string(), "0033");
    }

    #[test]
    fn test_year_serde() {
        let year = Year::new(2024).unwrap();
        let json = serde_json::to_string(&year).unwrap();
        assert_eq!(json, "2024");
        let parsed: Year = serde_json::from_str(&json).unwrap();
        assert_eq!(year, parsed);
        assert!(serde_json::from_str::<Year>("0").is_err());
    }

    #[test]
    fn test_month_bounds() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
    }

    #[test]
    fn test_day_validated_against_month() {
        assert!(Day::new(31, 2021, 7).is_ok());
        assert!(Day::new(31, 2021, 6).is_err());
        assert!(Day::new(0, 2021, 6).is_err());
        assert!(Day::new(29, 2024, 2).is_ok());
        assert!(Day::new(29, 2023, 2).is_err());
        assert!(Day::new(1, 2023, 13).is_err());
    }

    #[test]
    fn test_century_leap_rules() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(Year::new(2020).unwrap().is_leap());
    }

    #[test]
    fn test_month_day_parse_and_display() {
        let md: MonthDay = "12-20".parse().unwrap();
        assert_eq!((md.month(), md.day()), (12, 20));
        assert_eq!(md.to_string(), "12-20");
        assert_eq!("1-5".parse::<MonthDay>().unwrap().to_string(), "01-05");
    }

    #[test]
    fn test_month_day_accepts_leap_day() {
        assert!(MonthDay::new(2, 29).is_ok());
        assert!(MonthDay::new(2, 30).is_err());
        assert!(MonthDay::new(4, 31).is_err());
        assert!(matches!("".parse::<MonthDay>(), Err(ParseError::EmptyInput)));
        assert!(matches!("1220".parse::<MonthDay>(), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_month_day_ordering() {
        let jan20 = MonthDay::new(1, 20).unwrap();
        let dec20 = MonthDay::new(12, 20).unwrap();
        let dec21 = MonthDay::new(12, 21).unwrap();
        assert!(jan20 < dec20);
        assert!(dec20 < dec21);
    }

    #[test]
    fn test_month_day_serde() {
        let md = MonthDay::new(8, 2).unwrap();
        let json = serde_json::to_string(&md).unwrap();
        assert_eq!(json, r#""08-02""#);
        let parsed: MonthDay = serde_json::from_str(&json).unwrap();
        assert_eq!(md, parsed);
        assert!(serde_json::from_str::<MonthDay>(r#""13-01""#).is_err());
    }

    #[test]
    fn test_roll_over() {
        assert_eq!(roll_over(2023, 2, 29), (2023, 3, 1));
        assert_eq!(roll_over(2024, 2, 29), (2024, 2, 29));
        assert_eq!(roll_over(2023, 12, 31), (2023, 12, 31));
    }
}
