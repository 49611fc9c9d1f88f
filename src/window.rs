use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, MonthDay, ParseError, RANGE_SEPARATOR, prelude::*};

/// A closed interval of calendar dates.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date range and window construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// A window's landing date does not lie after the window.
    #[error("Landing date {target} must fall after window {range}")]
    TargetInsideWindow { range: DateRange, target: CalendarDate },

    /// Error parsing date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub(crate) const fn new_const(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Checks if the range contains a given date (both ends inclusive)
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.trim().parse::<CalendarDate>()?;
                let end = end_str.trim().parse::<CalendarDate>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A one-off suspension window with a fixed landing date.
///
/// Any date inside the window collapses onto `target`, the first day the term
/// runs again. Dates outside pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FixedWindow {
    range:  DateRange,
    target: CalendarDate,
}

#[derive(Deserialize)]
struct FixedWindowRepr {
    range:  DateRange,
    target: CalendarDate,
}

impl FixedWindow {
    /// # Errors
    /// Returns `RangeError::TargetInsideWindow` unless `target` is after the range end.
    pub fn new(range: DateRange, target: CalendarDate) -> Result<Self, RangeError> {
        if target <= range.end() {
            return Err(RangeError::TargetInsideWindow { range, target });
        }
        Ok(Self { range, target })
    }

    pub(crate) const fn new_const(range: DateRange, target: CalendarDate) -> Self {
        Self { range, target }
    }

    pub const fn range(&self) -> DateRange {
        self.range
    }

    pub const fn target(&self) -> CalendarDate {
        self.target
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.range.contains(date)
    }

    /// Moves a date inside the window onto the landing date.
    ///
    /// Shifting by the day count between the date and the landing date always
    /// lands exactly on the landing date, so the shift is expressed directly.
    pub fn adjust(&self, date: CalendarDate) -> CalendarDate {
        if self.contains(date) { self.target } else { date }
    }
}

impl<'de> Deserialize<'de> for FixedWindow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = FixedWindowRepr::deserialize(deserializer)?;
        Self::new(repr.range, repr.target).map_err(serde::de::Error::custom)
    }
}

/// A window that recurs every year between two month/day anchors.
///
/// When `start` is later in the year than `end` the window wraps the new year,
/// e.g. `12-20..01-20`: each occurrence opens in December of one year and closes
/// in January of the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display(fmt = "{start}..{end}")]
pub struct AnnualWindow {
    start: MonthDay,
    end:   MonthDay,
}

impl AnnualWindow {
    pub const fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> MonthDay {
        self.start
    }

    pub const fn end(&self) -> MonthDay {
        self.end
    }

    fn wraps(&self) -> bool {
        self.start > self.end
    }

    fn anchor(date: CalendarDate) -> MonthDay {
        MonthDay::new_const(date.month(), date.day())
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        let md = Self::anchor(date);
        if self.wraps() {
            md >= self.start || md <= self.end
        } else {
            self.start <= md && md <= self.end
        }
    }

    /// Year in which the occurrence containing (or next to) `date` opens.
    /// For a wrapping window and a date in its January tail this is the previous year.
    pub fn occurrence_year(&self, date: CalendarDate) -> i32 {
        let year = i32::from(date.year());
        if self.wraps() && Self::anchor(date) <= self.end { year - 1 } else { year }
    }

    fn opening_year(&self, date: CalendarDate) -> Option<u16> {
        u16::try_from(self.occurrence_year(date)).ok()
    }

    fn resolve(anchor: MonthDay, year: u16) -> Option<CalendarDate> {
        let (year, month, day) = crate::types::roll_over(year, anchor.month(), anchor.day());
        CalendarDate::from_ymd(year, month, day).ok()
    }

    /// First day of the occurrence that contains `date`.
    pub fn period_start(&self, date: CalendarDate) -> Option<CalendarDate> {
        Self::resolve(self.start, self.opening_year(date)?)
    }

    /// Day after the occurrence that contains `date` closes.
    pub fn reopening(&self, date: CalendarDate) -> Option<CalendarDate> {
        let opening = self.opening_year(date)?;
        let closing = if self.wraps() {
            opening.checked_add(1)?
        } else {
            opening
        };
        Self::resolve(self.end, closing)?.succ()
    }

    /// Replaces a date inside the window with the reopening day.
    pub fn snap(&self, date: CalendarDate) -> Option<CalendarDate> {
        if self.contains(date) {
            self.reopening(date)
        } else {
            Some(date)
        }
    }

    /// Remaps a date inside the window past the reopening day, keeping its
    /// offset from the window start.
    pub fn shift(&self, date: CalendarDate) -> Option<CalendarDate> {
        if !self.contains(date) {
            return Some(date);
        }
        let elapsed = date.days_since(self.period_start(date)?)?;
        self.reopening(date)?
            .checked_add_days(u32::try_from(elapsed).ok()?)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::consts::{YEAR_END_END, YEAR_END_START};

    fn date(year: u16, month: u8, day: u8) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).unwrap()
    }

    fn pandemic() -> FixedWindow {
        FixedWindow::new(
            DateRange::new(date(2020, 6, 29), date(2021, 11, 13)).unwrap(),
            date(2021, 11, 14),
        )
        .unwrap()
    }

    fn year_end() -> AnnualWindow {
        AnnualWindow::new(
            MonthDay::new(YEAR_END_START.0, YEAR_END_START.1).unwrap(),
            MonthDay::new(YEAR_END_END.0, YEAR_END_END.1).unwrap(),
        )
    }

    fn any_date() -> impl Strategy<Value = CalendarDate> {
        (1990u16..2060, 1u8..=12, 1u8..=31).prop_map(|(y, m, d)| {
            let d = d.min(crate::types::days_in_month(y, m));
            CalendarDate::from_ymd(y, m, d).unwrap()
        })
    }

    #[test]
    fn test_new_range_cases() {
        assert!(DateRange::new(date(2020, 1, 1), date(2020, 1, 1)).is_ok());
        assert!(DateRange::new(date(2020, 1, 1), date(2021, 1, 1)).is_ok());
        let result = DateRange::new(date(2021, 1, 1), date(2020, 1, 1));
        assert!(matches!(result, Err(RangeError::InvalidRange { .. })));
    }

    #[test]
    fn test_range_contains() {
        let range = DateRange::new(date(2020, 6, 29), date(2021, 11, 13)).unwrap();
        assert!(range.contains(date(2020, 6, 29)));
        assert!(range.contains(date(2021, 11, 13)));
        assert!(!range.contains(date(2020, 6, 28)));
        assert!(!range.contains(date(2021, 11, 14)));
    }

    #[test]
    fn test_range_from_str_and_display() {
        let range: DateRange = "2020-06-29/2021-11-13".parse().unwrap();
        assert_eq!(range.start(), date(2020, 6, 29));
        assert_eq!(range.end(), date(2021, 11, 13));
        assert_eq!(range.to_string(), "2020-06-29/2021-11-13");

        assert!(matches!(
            "2021-11-13/2020-06-29".parse::<DateRange>(),
            Err(RangeError::InvalidRange { .. })
        ));
        assert!(matches!(
            "2020-06-29".parse::<DateRange>(),
            Err(RangeError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2020-06-29/2020-07-01/2020-08-01".parse::<DateRange>(),
            Err(RangeError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2020-06-31/2020-07-01".parse::<DateRange>(),
            Err(RangeError::ParseError(_))
        ));
    }

    #[test]
    fn test_fixed_window_target_must_follow_range() {
        let range = DateRange::new(date(2020, 6, 29), date(2021, 11, 13)).unwrap();
        assert!(matches!(
            FixedWindow::new(range, date(2021, 11, 13)),
            Err(RangeError::TargetInsideWindow { .. })
        ));
        assert!(FixedWindow::new(range, date(2021, 11, 14)).is_ok());
    }

    #[test]
    fn test_fixed_window_serde() {
        let json = serde_json::to_string(&pandemic()).unwrap();
        assert_eq!(json, r#"{"range":"2020-06-29/2021-11-13","target":"2021-11-14"}"#);
        let parsed: FixedWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pandemic());

        let bad = r#"{"range":"2020-06-29/2021-11-13","target":"2020-07-01"}"#;
        assert!(serde_json::from_str::<FixedWindow>(bad).is_err());
    }

    #[test]
    fn test_pandemic_adjust_edges() {
        let window = pandemic();
        assert_eq!(window.adjust(date(2020, 6, 28)), date(2020, 6, 28));
        assert_eq!(window.adjust(date(2020, 6, 29)), date(2021, 11, 14));
        assert_eq!(window.adjust(date(2021, 3, 1)), date(2021, 11, 14));
        assert_eq!(window.adjust(date(2021, 11, 13)), date(2021, 11, 14));
        assert_eq!(window.adjust(date(2021, 11, 14)), date(2021, 11, 14));
    }

    #[test]
    fn test_year_end_contains() {
        let window = year_end();
        assert!(window.contains(date(2022, 12, 20)));
        assert!(window.contains(date(2022, 12, 31)));
        assert!(window.contains(date(2023, 1, 1)));
        assert!(window.contains(date(2023, 1, 20)));
        assert!(!window.contains(date(2022, 12, 19)));
        assert!(!window.contains(date(2023, 1, 21)));
        assert!(!window.contains(date(2023, 7, 1)));
    }

    #[test]
    fn test_year_end_period_bounds() {
        let window = year_end();
        assert_eq!(window.period_start(date(2023, 1, 5)), Some(date(2022, 12, 20)));
        assert_eq!(window.period_start(date(2022, 12, 25)), Some(date(2022, 12, 20)));
        assert_eq!(window.reopening(date(2023, 1, 5)), Some(date(2023, 1, 21)));
        assert_eq!(window.reopening(date(2022, 12, 25)), Some(date(2023, 1, 21)));
    }

    #[test]
    fn test_occurrence_year() {
        let window = year_end();
        assert_eq!(window.occurrence_year(date(2022, 12, 20)), 2022);
        assert_eq!(window.occurrence_year(date(2023, 1, 20)), 2022);
        assert_eq!(window.occurrence_year(date(2023, 1, 21)), 2023);
        assert_eq!(window.occurrence_year(date(2023, 7, 1)), 2023);
        assert_eq!(window.occurrence_year(date(2023, 12, 19)), 2023);
        assert_eq!(window.occurrence_year(date(1, 1, 5)), 0);
        assert_eq!(window.occurrence_year(date(1, 1, 21)), 1);
    }

    #[test]
    fn test_year_end_snap_is_direct() {
        let window = year_end();
        assert_eq!(window.snap(date(2022, 12, 20)), Some(date(2023, 1, 21)));
        assert_eq!(window.snap(date(2023, 1, 20)), Some(date(2023, 1, 21)));
        assert_eq!(window.snap(date(2022, 12, 19)), Some(date(2022, 12, 19)));
    }

    #[test]
    fn test_year_end_shift_preserves_offset() {
        let window = year_end();
        assert_eq!(window.shift(date(2022, 12, 20)), Some(date(2023, 1, 21)));
        assert_eq!(window.shift(date(2022, 12, 31)), Some(date(2023, 2, 1)));
        assert_eq!(window.shift(date(2023, 1, 1)), Some(date(2023, 2, 2)));
        assert_eq!(window.shift(date(2023, 1, 20)), Some(date(2023, 2, 21)));
        assert_eq!(window.shift(date(2023, 3, 3)), Some(date(2023, 3, 3)));
    }

    #[test]
    fn test_non_wrapping_window() {
        let july = AnnualWindow::new(MonthDay::new(7, 2).unwrap(), MonthDay::new(7, 31).unwrap());
        assert!(!july.contains(date(2022, 7, 1)));
        assert!(july.contains(date(2022, 7, 2)));
        assert!(july.contains(date(2022, 7, 31)));
        assert!(!july.contains(date(2022, 8, 1)));
        assert_eq!(july.reopening(date(2022, 7, 15)), Some(date(2022, 8, 1)));
        assert_eq!(july.shift(date(2022, 7, 3)), Some(date(2022, 8, 2)));
    }

    #[test]
    fn test_year_end_edges_of_calendar() {
        let window = year_end();
        assert_eq!(window.period_start(date(1, 1, 5)), None);
        assert_eq!(window.snap(date(9999, 12, 25)), None);
    }

    #[test]
    fn test_annual_window_serde() {
        let json = serde_json::to_string(&year_end()).unwrap();
        assert_eq!(json, r#"{"start":"12-20","end":"01-20"}"#);
        let parsed: AnnualWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, year_end());
        assert_eq!(parsed.to_string(), "12-20..01-20");
    }

    proptest! {
        #[test]
        fn pandemic_adjust_collapses_or_passes_through(d in any_date()) {
            let window = pandemic();
            let adjusted = window.adjust(d);
            if window.contains(d) {
                prop_assert_eq!(adjusted, date(2021, 11, 14));
            } else {
                prop_assert_eq!(adjusted, d);
            }
        }

        #[test]
        fn year_end_shift_is_idempotent(d in any_date()) {
            let window = year_end();
            let once = window.shift(d).unwrap();
            prop_assert_eq!(window.shift(once), Some(once));
            prop_assert!(!window.contains(once));
        }

        #[test]
        fn year_end_snap_leaves_window(d in any_date()) {
            let window = year_end();
            let snapped = window.snap(d).unwrap();
            prop_assert!(!window.contains(snapped));
            prop_assert!(snapped >= d);
        }
    }
}
