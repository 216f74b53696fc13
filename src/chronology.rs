//! Stateless rules of the Jalali calendar: the intercalation rule, month
//! and year lengths, and the epoch-day bridge shared with the ISO
//! calendar. Everything here is a pure function of its arguments.

use crate::consts::{
    DAYS_IN_MONTH, EPOCH_DOM, EPOCH_MONTH, EPOCH_YEAR, ESFAND, ESFAND_DAYS_LEAP, FIRST_HALF_DAYS,
    MAX_MONTH, MAX_YEAR, MIN_YEAR, NON_LEAP_CORRECTION,
};
use crate::error::DateError;
use crate::prelude::*;
use crate::temporal::DateField;

/// Identity of the calendar system a temporal value belongs to.
///
/// Cross-calendar operations go through the epoch-day bridge; everything
/// else requires matching identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Chronology {
    /// The proleptic Jalali (Persian civil) calendar.
    #[display(fmt = "Jalali")]
    Jalali,
    /// The proleptic Gregorian calendar used as the interchange format.
    #[display(fmt = "ISO")]
    Iso,
}

/// Days in one 33-year intercalation cycle (25 common + 8 leap years).
const CYCLE_DAYS: i64 = 365 * 33 + 8;

/// Checks whether the 33-year cycle wrongly marks `year` as leap.
const fn is_non_leap_correction(year: i32) -> bool {
    let mut i = 0;
    while i < NON_LEAP_CORRECTION.len() {
        if NON_LEAP_CORRECTION[i] == year {
            return true;
        }
        i += 1;
    }
    false
}

/// Checks whether a Jalali year is a leap year.
///
/// Uses the 33-year arithmetic cycle, corrected by a fixed table of years
/// where the astronomical calendar (solar transit at the 52.5°E meridian)
/// diverges from the cycle: a listed year loses its leap day to the year
/// that follows it.
pub const fn is_leap_year(year: i32) -> bool {
    if year >= NON_LEAP_CORRECTION[0] && is_non_leap_correction(year) {
        return false;
    }
    if year > NON_LEAP_CORRECTION[0] && is_non_leap_correction(year - 1) {
        return true;
    }
    (25 * year as i64 + 11).rem_euclid(33) < 8
}

/// Returns the number of days in a Jalali year, 365 or 366.
pub const fn year_length(year: i32) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Returns the number of days in a month of the given year.
pub const fn month_length(year: i32, month: u8) -> u8 {
    debug_assert!(month >= 1 && month <= MAX_MONTH);
    if month == ESFAND && is_leap_year(year) {
        ESFAND_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Day-of-year of a month/day pair, counted from 1.
///
/// The first six months have 31 days each and the rest 30 (29 for a
/// common Esfand), so the offset splits at the half-year mark.
pub const fn day_of_year(month: u8, day: u8) -> u16 {
    debug_assert!(month >= 1 && month <= MAX_MONTH);
    let m = month as u16;
    let offset = if m <= 6 {
        31 * (m - 1)
    } else {
        FIRST_HALF_DAYS + 30 * (m - 7)
    };
    offset + day as u16
}

/// Month and day-of-month of a day-of-year, the inverse of
/// [`day_of_year`]. Input must be in `1..=366`.
pub const fn from_day_of_year(doy: u16) -> (u8, u8) {
    debug_assert!(doy >= 1 && doy <= 366);
    if doy <= FIRST_HALF_DAYS {
        (((doy - 1) / 31) as u8 + 1, ((doy - 1) % 31) as u8 + 1)
    } else {
        let rest = doy - FIRST_HALF_DAYS - 1;
        ((rest / 30) as u8 + 7, (rest % 30) as u8 + 1)
    }
}

/// Days from the start of year 1 to the start of `year` (negative for
/// earlier years).
///
/// `floor((8*(year-1) + 29) / 33)` counts the leap years of the pure
/// 33-year cycle up to and including `year - 1`; when `year - 1` is a
/// correction year the cycle over-counts its leap day by one, so it is
/// given back here.
const fn days_before_year(year: i64) -> i64 {
    let prev = year - 1;
    let mut days = 365 * prev + (8 * prev + 29).div_euclid(33);
    if prev >= NON_LEAP_CORRECTION[0] as i64
        && prev <= NON_LEAP_CORRECTION[NON_LEAP_CORRECTION.len() - 1] as i64
        && is_non_leap_correction(prev as i32)
    {
        days -= 1;
    }
    days
}

/// Fixed day number, where day 1 is Farvardin 1st of year 1.
const fn fixed_day(year: i32, month: u8, day: u8) -> i64 {
    days_before_year(year as i64) + day_of_year(month, day) as i64
}

/// Fixed day number of the Unix epoch (1970-01-01 is Dey 11th, 1348).
const UNIX_EPOCH_FIXED: i64 = fixed_day(EPOCH_YEAR, EPOCH_MONTH, EPOCH_DOM);

/// Smallest supported epoch day (Farvardin 1st of [`MIN_YEAR`]).
pub const MIN_EPOCH_DAY: i64 = date_to_epoch_day(MIN_YEAR, 1, 1);

/// Largest supported epoch day (last day of [`MAX_YEAR`]).
pub const MAX_EPOCH_DAY: i64 = date_to_epoch_day(MAX_YEAR, ESFAND, month_length(MAX_YEAR, ESFAND));

/// Converts a valid Jalali date to its epoch day (days since the
/// Gregorian 1970-01-01).
pub const fn date_to_epoch_day(year: i32, month: u8, day: u8) -> i64 {
    fixed_day(year, month, day) - UNIX_EPOCH_FIXED
}

/// Converts an epoch day back to a Jalali `(year, month, day)` triple,
/// the inverse of [`date_to_epoch_day`] over the supported range.
pub fn epoch_day_to_date(epoch_day: i64) -> Result<(i32, u8, u8), DateError> {
    if !(MIN_EPOCH_DAY..=MAX_EPOCH_DAY).contains(&epoch_day) {
        return Err(DateError::OutOfRange {
            field: DateField::EpochDay,
            value: epoch_day,
            min: MIN_EPOCH_DAY,
            max: MAX_EPOCH_DAY,
        });
    }
    let fixed = epoch_day + UNIX_EPOCH_FIXED;

    // First approximation from the cycle length; the correction table can
    // push the true year start a day or two either way, so settle exactly.
    let mut year = 1 + (33 * (fixed - 1)).div_euclid(CYCLE_DAYS);
    loop {
        let before = days_before_year(year);
        if fixed <= before {
            year -= 1;
        } else if fixed > before + year_length(year as i32) as i64 {
            year += 1;
        } else {
            let (month, day) = from_day_of_year((fixed - before) as u16);
            return Ok((year as i32, month, day));
        }
    }
}
