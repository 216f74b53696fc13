//! The proleptic Gregorian (ISO) interchange value type.
//!
//! This is the other side of the epoch-day bridge: a minimal date that
//! exposes year, month-of-year and day-of-month under the ISO
//! chronology, enough for cross-calendar `from_temporal`/`adjust_into`
//! flow. It is not a full protocol citizen; era and day-of-year
//! queries stay with the Jalali types.

use std::fmt;
use std::str::FromStr;

use crate::chronology::Chronology;
use crate::consts::{MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR};
use crate::date::JalaliDate;
use crate::error::DateError;
use crate::fmt::{parse_error, parse_two_digits, parse_year_prefix, strip_separator, write_year};
use crate::temporal::{DateField, Temporal, TemporalAccessor, ValueRange};

/// Days in each Gregorian month (index 0 unused; February non-leap)
const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Checks the Gregorian 4/100/400 leap-year rule, prolepticly.
pub const fn is_iso_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn month_length(year: i32, month: u8) -> u8 {
    debug_assert!(month >= 1 && month <= MAX_MONTH);
    if month == 2 && is_iso_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Epoch day of a valid Gregorian date, via the 400-year era encoding.
const fn to_epoch_day(year: i32, month: u8, day: u8) -> i64 {
    let shifted_year = if month <= 2 {
        year as i64 - 1
    } else {
        year as i64
    };
    let era = shifted_year.div_euclid(400);
    let year_of_era = shifted_year - era * 400;
    let m = month as i64;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100
        + (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5
        + day as i64
        - 1;
    era * 146_097 + day_of_era - 719_468
}

const MIN_EPOCH_DAY: i64 = to_epoch_day(MIN_YEAR, 1, 1);
const MAX_EPOCH_DAY: i64 = to_epoch_day(MAX_YEAR, 12, 31);

/// Gregorian date of an epoch day, the inverse of [`to_epoch_day`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn from_epoch_day(epoch_day: i64) -> Result<(i32, u8, u8), DateError> {
    if !(MIN_EPOCH_DAY..=MAX_EPOCH_DAY).contains(&epoch_day) {
        return Err(DateError::OutOfRange {
            field: DateField::EpochDay,
            value: epoch_day,
            min: MIN_EPOCH_DAY,
            max: MAX_EPOCH_DAY,
        });
    }
    let shifted = epoch_day + 719_468;
    let era = shifted.div_euclid(146_097);
    let day_of_era = shifted - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let mp = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    Ok((year as i32, month, day))
}

/// An immutable date on the proleptic Gregorian calendar, such as
/// `2021-03-21`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    year: i32,
    month: u8,
    day: u8,
}

impl IsoDate {
    /// Obtains a date from year, month and day-of-month.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if any field is out of bounds,
    /// including a day beyond the Gregorian month's length.
    pub fn of(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        DateField::Year.check_valid_value(i64::from(year))?;
        DateField::MonthOfYear.check_valid_value(i64::from(month))?;
        let length = month_length(year, month);
        if !(MIN_DAY..=length).contains(&day) {
            return Err(DateError::OutOfRange {
                field: DateField::DayOfMonth,
                value: i64::from(day),
                min: i64::from(MIN_DAY),
                max: i64::from(length),
            });
        }
        Ok(Self { year, month, day })
    }

    /// Obtains the date of the given epoch day.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` outside the supported year range.
    pub fn from_epoch_day(epoch_day: i64) -> Result<Self, DateError> {
        let (year, month, day) = from_epoch_day(epoch_day)?;
        Ok(Self { year, month, day })
    }

    /// Parses the canonical `[sign]YYYY-MM-DD` form.
    ///
    /// # Errors
    /// Returns `DateError::Parse` on malformed text or an invalid
    /// decoded date.
    pub fn parse(text: &str) -> Result<Self, DateError> {
        text.parse()
    }

    /// Returns the year.
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month-of-year, 1 to 12.
    #[inline]
    pub const fn month_value(&self) -> u8 {
        self.month
    }

    /// Returns the day-of-month, 1 to 31.
    #[inline]
    pub const fn day_of_month(&self) -> u8 {
        self.day
    }

    /// Returns the epoch day of this date.
    pub const fn to_epoch_day(&self) -> i64 {
        to_epoch_day(self.year, self.month, self.day)
    }

    /// Returns the length of the month in days.
    pub const fn length_of_month(&self) -> u8 {
        month_length(self.year, self.month)
    }

    const fn proleptic_month(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn resolve_previous_valid(year: i32, month: u8, day: u8) -> Self {
        let day = day.min(month_length(year, month));
        Self { year, month, day }
    }
}

impl TemporalAccessor for IsoDate {
    fn chronology(&self) -> Chronology {
        Chronology::Iso
    }

    fn is_supported(&self, field: DateField) -> bool {
        matches!(
            field,
            DateField::Year
                | DateField::MonthOfYear
                | DateField::DayOfMonth
                | DateField::ProlepticMonth
                | DateField::EpochDay
        )
    }

    fn range(&self, field: DateField) -> Result<ValueRange, DateError> {
        match field {
            DateField::DayOfMonth => Ok(ValueRange::of(1, i64::from(self.length_of_month()))),
            DateField::EpochDay => Ok(ValueRange::of(MIN_EPOCH_DAY, MAX_EPOCH_DAY)),
            DateField::Year | DateField::MonthOfYear | DateField::ProlepticMonth => {
                Ok(field.value_range())
            }
            DateField::DayOfYear | DateField::YearOfEra | DateField::Era => {
                Err(DateError::UnsupportedField(field))
            }
        }
    }

    fn get_long(&self, field: DateField) -> Result<i64, DateError> {
        match field {
            DateField::Year => Ok(i64::from(self.year)),
            DateField::MonthOfYear => Ok(i64::from(self.month)),
            DateField::DayOfMonth => Ok(i64::from(self.day)),
            DateField::ProlepticMonth => Ok(self.proleptic_month()),
            DateField::EpochDay => Ok(self.to_epoch_day()),
            DateField::DayOfYear | DateField::YearOfEra | DateField::Era => {
                Err(DateError::UnsupportedField(field))
            }
        }
    }
}

impl Temporal for IsoDate {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn with_field(&self, field: DateField, value: i64) -> Result<Self, DateError> {
        field.check_valid_value(value)?;
        match field {
            DateField::Year => Ok(Self::resolve_previous_valid(
                value as i32,
                self.month,
                self.day,
            )),
            DateField::MonthOfYear => Ok(Self::resolve_previous_valid(
                self.year,
                value as u8,
                self.day,
            )),
            DateField::DayOfMonth => Self::of(self.year, self.month, value as u8),
            DateField::ProlepticMonth => {
                let year = DateField::Year.check_valid_value(value.div_euclid(12))?;
                Ok(Self::resolve_previous_valid(
                    year as i32,
                    value.rem_euclid(12) as u8 + 1,
                    self.day,
                ))
            }
            DateField::EpochDay => Self::from_epoch_day(value),
            DateField::DayOfYear | DateField::YearOfEra | DateField::Era => {
                Err(DateError::UnsupportedField(field))
            }
        }
    }
}

impl TryFrom<JalaliDate> for IsoDate {
    type Error = DateError;

    /// Crosses the epoch-day bridge; fails only near the extreme ends
    /// of the year range where the calendars' bounds diverge.
    fn try_from(value: JalaliDate) -> Result<Self, Self::Error> {
        Self::from_epoch_day(value.to_epoch_day())
    }
}

impl TryFrom<IsoDate> for JalaliDate {
    type Error = DateError;

    fn try_from(value: IsoDate) -> Result<Self, Self::Error> {
        Self::from_epoch_day(value.to_epoch_day())
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for IsoDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, rest) = parse_year_prefix(s, s)?;
        let rest = strip_separator(s, rest)?;
        let Some((month_text, rest)) = rest.split_at_checked(2) else {
            return Err(parse_error(s, "expected two-digit month"));
        };
        let month = parse_two_digits(s, month_text, "month")?;
        let rest = strip_separator(s, rest)?;
        let day = parse_two_digits(s, rest, "day")?;
        Self::of(year, month, day).map_err(|e| e.into_parse(s))
    }
}

impl serde::Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
