/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// A leap year, used to validate month/day anchors that recur every year
pub(crate) const REFERENCE_LEAP_YEAR: u16 = 2000;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Day-first separator (DD/MM/YYYY, the presentation format)
pub const DAY_FIRST_SEPARATOR: char = '/';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';

/// Administrative grace period added before any tier term starts
pub const GRACE_PERIOD_DAYS: u32 = 140;

/// Legal length of one year-end suspension, skipped in a single jump
pub const SUSPENSION_SKIP_DAYS: u32 = 32;

/// Base term of a minor infraction (1 year)
pub const MINOR_TIER_DAYS: u32 = 365;
/// Base term of a medium infraction (2 years)
pub const MEDIUM_TIER_DAYS: u32 = 730;
/// Base term of a severe infraction (5 years, one leap day included)
pub const SEVERE_TIER_DAYS: u32 = 1826;

/// Days removed from the medium tier for infractions initiated in July
pub const JULY_MEDIUM_CORRECTION_DAYS: u32 = 32;

/// Pandemic suspension: first suspended day
pub const PANDEMIC_START: (u16, u8, u8) = (2020, 6, 29);
/// Pandemic suspension: last suspended day
pub const PANDEMIC_END: (u16, u8, u8) = (2021, 11, 13);
/// Pandemic suspension: landing date for anything inside the window
pub const PANDEMIC_TARGET: (u16, u8, u8) = (2021, 11, 14);

/// Year-end suspension opens on this (month, day)
pub const YEAR_END_START: (u8, u8) = (12, 20);
/// Year-end suspension closes on this (month, day) of the following year
pub const YEAR_END_END: (u8, u8) = (1, 20);

/// Initiating dates in this (month, day) span push the grace deadline one year
pub const GRACE_EXTENSION_START: (u8, u8) = (8, 2);
/// Last day of the grace extension span
pub const GRACE_EXTENSION_END: (u8, u8) = (8, 13);

/// First day of the July span that triggers the medium-tier correction
pub const JULY_CORRECTION_START: (u8, u8) = (7, 2);
/// Last day of the July correction span
pub const JULY_CORRECTION_END: (u8, u8) = (7, 31);
