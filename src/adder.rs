//! Day-by-day term counting across suspension windows.

use tracing::trace;

use crate::{AnnualWindow, CalendarDate, FixedWindow};

/// Whether recurring suspension windows stop the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SuspensionMode {
    /// Every calendar day consumes the budget.
    #[default]
    Ignore,
    /// Each newly entered annual window is jumped over without consuming budget.
    Skip,
}

/// Adds calendar days to a date, honouring suspension windows.
#[derive(Debug, Clone, Copy)]
pub struct DayAdder<'a> {
    fixed_windows:  &'a [FixedWindow],
    annual_windows: &'a [AnnualWindow],
    skip_days:      u32,
}

impl<'a> DayAdder<'a> {
    pub const fn new(
        fixed_windows: &'a [FixedWindow],
        annual_windows: &'a [AnnualWindow],
        skip_days: u32,
    ) -> Self {
        Self {
            fixed_windows,
            annual_windows,
            skip_days,
        }
    }

    /// Walks `days` counted days forward from `start`, then moves the result out
    /// of any fixed window.
    ///
    /// With [`SuspensionMode::Skip`], the first day seen inside each annual
    /// window occurrence triggers a jump of `skip_days` that costs nothing. If
    /// the jump would land inside a window again it is abandoned and the walk
    /// advances a single counted day instead.
    ///
    /// Returns `None` if the walk leaves the representable calendar.
    pub fn add_days(
        &self,
        start: CalendarDate,
        days: u32,
        mode: SuspensionMode,
    ) -> Option<CalendarDate> {
        let mut current = start;
        let mut remaining = days;
        let mut last_period: Option<(usize, i32)> = None;

        while remaining > 0 {
            let period = match mode {
                SuspensionMode::Skip => self.period_of(current),
                SuspensionMode::Ignore => None,
            };

            match period {
                Some(key) if last_period != Some(key) => {
                    last_period = Some(key);
                    let jumped = current.checked_add_days(self.skip_days)?;
                    if self.in_annual_window(jumped) {
                        trace!(from = %current, rejected = %jumped, "suspension skip rejected");
                        current = current.succ()?;
                        remaining -= 1;
                    } else {
                        trace!(from = %current, to = %jumped, "suspension skip accepted");
                        current = jumped;
                    }
                },
                _ => {
                    current = current.succ()?;
                    remaining -= 1;
                },
            }
        }

        Some(self.leave_fixed_windows(current))
    }

    pub fn leave_fixed_windows(&self, date: CalendarDate) -> CalendarDate {
        self.fixed_windows
            .iter()
            .fold(date, |date, window| window.adjust(date))
    }

    fn in_annual_window(&self, date: CalendarDate) -> bool {
        self.annual_windows.iter().any(|window| window.contains(date))
    }

    /// Identifies the annual window occurrence containing `date`, if any.
    fn period_of(&self, date: CalendarDate) -> Option<(usize, i32)> {
        self.annual_windows
            .iter()
            .enumerate()
            .find(|(_, window)| window.contains(date))
            .map(|(index, window)| (index, window.occurrence_year(date)))
    }
}
