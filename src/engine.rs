//! Statute-of-limitations deadlines for administrative infractions.
//!
//! The computation is a fixed pipeline over one initiating date:
//!
//! 1. move the date out of any one-off window (the pandemic suspension)
//! 2. add the grace period, counting every day
//! 3. push the grace deadline a year for initiating dates in the extension span
//! 4. snap a grace deadline inside an annual window to the reopening day
//! 5. per tier, count the tier term across annual windows, remap a result that
//!    falls inside one, then apply the tier's calendar corrections
//!
//! Every constant involved lives in [`PrescriptionRules`], so additional
//! windows can be configured without touching the walk itself.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::consts::{
    GRACE_EXTENSION_END, GRACE_EXTENSION_START, GRACE_PERIOD_DAYS, JULY_CORRECTION_END,
    JULY_CORRECTION_START, JULY_MEDIUM_CORRECTION_DAYS, MEDIUM_TIER_DAYS, MINOR_TIER_DAYS,
    PANDEMIC_END, PANDEMIC_START, PANDEMIC_TARGET, SEVERE_TIER_DAYS, SUSPENSION_SKIP_DAYS,
    YEAR_END_END, YEAR_END_START,
};
use crate::{
    AnnualWindow, CalendarDate, DateRange, DayAdder, FixedWindow, MonthDay, PrescriptionError,
    SuspensionMode, prelude::*,
};

/// Severity class of an infraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfractionTier {
    #[display(fmt = "Minor infraction (1 year)")]
    Minor,
    #[display(fmt = "Medium infraction (2 years)")]
    Medium,
    #[display(fmt = "Severe infraction (5 years)")]
    Severe,
}

impl InfractionTier {
    /// All tiers, in result order.
    pub const ALL: [Self; 3] = [Self::Minor, Self::Medium, Self::Severe];

    /// Nominal length of the prescriptive term in years.
    pub const fn years(self) -> u8 {
        match self {
            Self::Minor => 1,
            Self::Medium => 2,
            Self::Severe => 5,
        }
    }
}

/// Base term of each tier, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierDurations {
    pub minor:  u32,
    pub medium: u32,
    pub severe: u32,
}

impl TierDurations {
    pub const fn days(&self, tier: InfractionTier) -> u32 {
        match tier {
            InfractionTier::Minor => self.minor,
            InfractionTier::Medium => self.medium,
            InfractionTier::Severe => self.severe,
        }
    }
}

impl Default for TierDurations {
    fn default() -> Self {
        Self {
            minor:  MINOR_TIER_DAYS,
            medium: MEDIUM_TIER_DAYS,
            severe: SEVERE_TIER_DAYS,
        }
    }
}

/// Days taken off one tier's deadline when the initiating date falls in `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierCorrection {
    pub tier:   InfractionTier,
    pub window: AnnualWindow,
    pub days:   u32,
}

impl TierCorrection {
    /// Medium-tier infractions initiated between July 2 and July 31 end 32 days earlier.
    pub const JULY_MEDIUM: Self = Self {
        tier:   InfractionTier::Medium,
        window: AnnualWindow::new(
            MonthDay::new_const(JULY_CORRECTION_START.0, JULY_CORRECTION_START.1),
            MonthDay::new_const(JULY_CORRECTION_END.0, JULY_CORRECTION_END.1),
        ),
        days:   JULY_MEDIUM_CORRECTION_DAYS,
    };
}

const PANDEMIC: FixedWindow = FixedWindow::new_const(
    DateRange::new_const(
        CalendarDate::from_ymd_const(PANDEMIC_START.0, PANDEMIC_START.1, PANDEMIC_START.2),
        CalendarDate::from_ymd_const(PANDEMIC_END.0, PANDEMIC_END.1, PANDEMIC_END.2),
    ),
    CalendarDate::from_ymd_const(PANDEMIC_TARGET.0, PANDEMIC_TARGET.1, PANDEMIC_TARGET.2),
);

const YEAR_END: AnnualWindow = AnnualWindow::new(
    MonthDay::new_const(YEAR_END_START.0, YEAR_END_START.1),
    MonthDay::new_const(YEAR_END_END.0, YEAR_END_END.1),
);

const GRACE_EXTENSION: AnnualWindow = AnnualWindow::new(
    MonthDay::new_const(GRACE_EXTENSION_START.0, GRACE_EXTENSION_START.1),
    MonthDay::new_const(GRACE_EXTENSION_END.0, GRACE_EXTENSION_END.1),
);

/// Every legal constant the computation depends on.
///
/// `Default` gives the rules currently in force. Missing fields in a JSON
/// document fall back to those defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrescriptionRules {
    /// Administrative period added before any tier term, counted day by day.
    pub grace_period_days:    u32,
    /// Initiating dates in this span push the grace deadline one year later.
    pub grace_extension:      AnnualWindow,
    /// Length of the free jump over an annual suspension window.
    pub suspension_skip_days: u32,
    /// One-off windows, applied in order.
    pub fixed_windows:        Vec<FixedWindow>,
    /// Recurring windows during which the term does not run.
    pub annual_windows:       Vec<AnnualWindow>,
    pub tiers:                TierDurations,
    pub corrections:          Vec<TierCorrection>,
}

impl Default for PrescriptionRules {
    fn default() -> Self {
        Self {
            grace_period_days:    GRACE_PERIOD_DAYS,
            grace_extension:      GRACE_EXTENSION,
            suspension_skip_days: SUSPENSION_SKIP_DAYS,
            fixed_windows:        vec![PANDEMIC],
            annual_windows:       vec![YEAR_END],
            tiers:                TierDurations::default(),
            corrections:          vec![TierCorrection::JULY_MEDIUM],
        }
    }
}

impl PrescriptionRules {
    /// Loads rules from JSON, defaulting any field the document leaves out.
    ///
    /// # Errors
    /// Returns `PrescriptionError::InvalidRules` if the document is malformed or
    /// contains an invalid date, window or anchor.
    pub fn from_json(json: &str) -> Result<Self, PrescriptionError> {
        serde_json::from_str(json).map_err(|e| PrescriptionError::InvalidRules(e.to_string()))
    }
}

/// Deadline per tier for one initiating date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrescriptionResult {
    pub minor:  CalendarDate,
    pub medium: CalendarDate,
    pub severe: CalendarDate,
}

impl PrescriptionResult {
    pub const fn get(&self, tier: InfractionTier) -> CalendarDate {
        match tier {
            InfractionTier::Minor => self.minor,
            InfractionTier::Medium => self.medium,
            InfractionTier::Severe => self.severe,
        }
    }

    /// Tier deadlines ordered Minor, Medium, Severe.
    pub fn iter(&self) -> impl Iterator<Item = (InfractionTier, CalendarDate)> + '_ {
        InfractionTier::ALL
            .into_iter()
            .map(move |tier| (tier, self.get(tier)))
    }
}

/// Computes prescription deadlines under a set of [`PrescriptionRules`].
#[derive(Debug, Clone, Default)]
pub struct PrescriptionEngine {
    rules: PrescriptionRules,
}

impl PrescriptionEngine {
    pub const fn new(rules: PrescriptionRules) -> Self {
        Self { rules }
    }

    pub const fn rules(&self) -> &PrescriptionRules {
        &self.rules
    }

    fn adder(&self) -> DayAdder<'_> {
        DayAdder::new(
            &self.rules.fixed_windows,
            &self.rules.annual_windows,
            self.rules.suspension_skip_days,
        )
    }

    /// The deadline every tier term starts from: the grace period with the
    /// August extension and the year-end snap applied.
    ///
    /// # Errors
    /// Returns `PrescriptionError::Overflow` if the arithmetic leaves years 1-9999.
    pub fn grace_deadline(&self, initial: CalendarDate) -> Result<CalendarDate, PrescriptionError> {
        let normalized = self.adder().leave_fixed_windows(initial);
        self.grace_deadline_from(initial, normalized)
    }

    fn grace_deadline_from(
        &self,
        initial: CalendarDate,
        normalized: CalendarDate,
    ) -> Result<CalendarDate, PrescriptionError> {
        let grace = self.rules.grace_period_days;
        let mut deadline = self
            .adder()
            .add_days(normalized, grace, SuspensionMode::Ignore)
            .ok_or_else(|| PrescriptionError::overflow(normalized, grace))?;

        if self.rules.grace_extension.contains(initial) {
            deadline = deadline
                .add_years(1)
                .ok_or_else(|| PrescriptionError::overflow(deadline, 365))?;
        }

        for window in &self.rules.annual_windows {
            if window.contains(deadline) {
                deadline = window
                    .snap(deadline)
                    .ok_or_else(|| PrescriptionError::overflow(deadline, 1))?;
                break;
            }
        }

        Ok(deadline)
    }

    fn tier_deadline(
        &self,
        tier: InfractionTier,
        initial: CalendarDate,
        grace_deadline: CalendarDate,
    ) -> Result<CalendarDate, PrescriptionError> {
        let term = self.rules.tiers.days(tier);
        let mut deadline = self
            .adder()
            .add_days(grace_deadline, term, SuspensionMode::Skip)
            .ok_or_else(|| PrescriptionError::overflow(grace_deadline, term))?;

        for window in &self.rules.annual_windows {
            if window.contains(deadline) {
                deadline = window
                    .shift(deadline)
                    .ok_or_else(|| PrescriptionError::overflow(deadline, 1))?;
                break;
            }
        }

        for correction in &self.rules.corrections {
            if correction.tier == tier && correction.window.contains(initial) {
                deadline = deadline
                    .checked_sub_days(correction.days)
                    .ok_or_else(|| PrescriptionError::overflow(deadline, -i64::from(correction.days)))?;
            }
        }

        trace!(%tier, deadline = %deadline, "tier deadline");
        Ok(deadline)
    }

    /// Computes the deadline of every tier for an infraction initiated on `initial`.
    ///
    /// Day arithmetic runs on the date after leaving any one-off window; the
    /// grace extension and tier corrections test `initial` as given.
    ///
    /// # Errors
    /// Returns `PrescriptionError::Overflow` if the arithmetic leaves years 1-9999.
    #[instrument(level = "debug", skip(self))]
    pub fn compute(&self, initial: CalendarDate) -> Result<PrescriptionResult, PrescriptionError> {
        let normalized = self.adder().leave_fixed_windows(initial);
        let grace_deadline = self.grace_deadline_from(initial, normalized)?;
        debug!(normalized = %normalized, grace_deadline = %grace_deadline, "grace period resolved");

        Ok(PrescriptionResult {
            minor:  self.tier_deadline(InfractionTier::Minor, initial, grace_deadline)?,
            medium: self.tier_deadline(InfractionTier::Medium, initial, grace_deadline)?,
            severe: self.tier_deadline(InfractionTier::Severe, initial, grace_deadline)?,
        })
    }
}

/// Computes deadlines under the default rules.
///
/// # Errors
/// Returns `PrescriptionError::Overflow` for initiating dates so late that a
/// deadline would fall after year 9999.
pub fn compute(initial: CalendarDate) -> Result<PrescriptionResult, PrescriptionError> {
    PrescriptionEngine::default().compute(initial)
}
