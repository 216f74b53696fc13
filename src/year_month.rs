use std::fmt;
use std::str::FromStr;

use crate::chronology::{self, Chronology};
use crate::consts::{MAX_MONTH, MAX_YEAR, MIN_DAY};
use crate::date::JalaliDate;
use crate::error::DateError;
use crate::fmt::{parse_two_digits, parse_year_prefix, strip_separator, write_year};
use crate::month::JalaliMonth;
use crate::temporal::{DateField, DateUnit, Temporal, TemporalAccessor, ValueRange};

/// An immutable Jalali year-month, such as `1400-07`.
///
/// Stores a year and a month without a day. Any field derivable from the
/// pair (era, year-of-era, proleptic-month) can be queried through the
/// field protocol; month-granularity arithmetic goes through the
/// proleptic-month encoding. Two values with equal fields are
/// interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliYearMonth {
    year: i32,
    month: u8,
}

impl JalaliYearMonth {
    /// Obtains a year-month from a year and an ordinal month.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if either field is out of bounds.
    pub fn of(year: i32, month: u8) -> Result<Self, DateError> {
        DateField::Year.check_valid_value(i64::from(year))?;
        DateField::MonthOfYear.check_valid_value(i64::from(month))?;
        Ok(Self { year, month })
    }

    /// Obtains a year-month from a year and a [`JalaliMonth`].
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the year is out of bounds.
    pub fn of_month(year: i32, month: JalaliMonth) -> Result<Self, DateError> {
        DateField::Year.check_valid_value(i64::from(year))?;
        Ok(Self {
            year,
            month: month.value(),
        })
    }

    /// Both fields already validated by the caller.
    pub(crate) const fn from_parts(year: i32, month: u8) -> Self {
        debug_assert!(month >= 1 && month <= MAX_MONTH);
        Self { year, month }
    }

    /// Obtains a year-month from any temporal value.
    ///
    /// A Jalali-chronology value must expose the year and month-of-year
    /// fields; anything else is reduced to a [`JalaliDate`] over the
    /// epoch-day bridge first.
    ///
    /// # Errors
    /// Returns `DateError::Conversion` when neither path applies.
    pub fn from_temporal<T: TemporalAccessor>(value: &T) -> Result<Self, DateError> {
        let extracted = if value.chronology() == Chronology::Jalali {
            Self::extract(value)
        } else {
            JalaliDate::reduce(value).map(|date| date.year_month())
        };
        extracted.map_err(|source| DateError::conversion("JalaliYearMonth", source))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn extract<T: TemporalAccessor>(value: &T) -> Result<Self, DateError> {
        let year = value.get(DateField::Year)?;
        let month = value.get(DateField::MonthOfYear)?;
        Self::of(year, month as u8)
    }

    /// Parses the canonical `[sign]YYYY-MM` form.
    ///
    /// # Errors
    /// Returns `DateError::Parse` on malformed text or an invalid
    /// decoded pair.
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

    /// Returns the month as a [`JalaliMonth`].
    pub fn month(&self) -> JalaliMonth {
        match JalaliMonth::of(self.month) {
            Ok(month) => month,
            // month is validated at construction
            Err(_) => unreachable!(),
        }
    }

    /// `year * 12 + month - 1`; total order over all year-months.
    const fn proleptic_month(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    /// Checks if the year is a leap year.
    pub const fn is_leap_year(&self) -> bool {
        chronology::is_leap_year(self.year)
    }

    /// Checks if the day-of-month would be valid for this year-month.
    pub fn is_valid_day(&self, day: u8) -> bool {
        (MIN_DAY..=self.length_of_month()).contains(&day)
    }

    /// Returns the length of the month in days.
    pub const fn length_of_month(&self) -> u8 {
        chronology::month_length(self.year, self.month)
    }

    /// Returns the length of the year in days, 365 or 366.
    pub const fn length_of_year(&self) -> u16 {
        chronology::year_length(self.year)
    }

    /// Returns a copy with the year replaced, month unchanged.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the year is out of bounds.
    pub fn with_year(&self, year: i32) -> Result<Self, DateError> {
        DateField::Year.check_valid_value(i64::from(year))?;
        Ok(Self {
            year,
            month: self.month,
        })
    }

    /// Returns a copy with the month replaced, year unchanged.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the month is out of bounds.
    pub fn with_month(&self, month: u8) -> Result<Self, DateError> {
        DateField::MonthOfYear.check_valid_value(i64::from(month))?;
        Ok(Self {
            year: self.year,
            month,
        })
    }

    /// Returns a copy with the amount of the unit added.
    ///
    /// Month-based units ride the proleptic-month encoding; eras flip
    /// the sign of the year while preserving year-of-era and only admit
    /// a resulting era of 0 or 1.
    ///
    /// # Errors
    /// `DateError::Overflow` if the amount/unit multiplication
    /// overflows, `DateError::OutOfRange` if the result leaves the
    /// supported year range, `DateError::UnsupportedUnit` for day-based
    /// units.
    pub fn plus(&self, amount: i64, unit: DateUnit) -> Result<Self, DateError> {
        match unit {
            DateUnit::Months => self.plus_months(amount),
            DateUnit::Years => self.plus_years(amount),
            DateUnit::Decades => self.plus_years(
                amount
                    .checked_mul(10)
                    .ok_or(DateError::Overflow("decades-to-years multiplication"))?,
            ),
            DateUnit::Centuries => self.plus_years(
                amount
                    .checked_mul(100)
                    .ok_or(DateError::Overflow("centuries-to-years multiplication"))?,
            ),
            DateUnit::Millennia => self.plus_years(
                amount
                    .checked_mul(1_000)
                    .ok_or(DateError::Overflow("millennia-to-years multiplication"))?,
            ),
            DateUnit::Eras => {
                let era = self.get_long(DateField::Era)?;
                let target = era
                    .checked_add(amount)
                    .ok_or(DateError::Overflow("era addition"))?;
                self.with_field(DateField::Era, target)
            }
            DateUnit::Days | DateUnit::Weeks => Err(DateError::UnsupportedUnit(unit)),
        }
    }

    /// Returns a copy with the amount of the unit subtracted.
    ///
    /// Defined as `plus(-amount)`, except that the most negative amount
    /// is added in two steps to avoid negation overflow.
    ///
    /// # Errors
    /// As [`Self::plus`].
    pub fn minus(&self, amount: i64, unit: DateUnit) -> Result<Self, DateError> {
        if amount == i64::MIN {
            self.plus(i64::MAX, unit)?.plus(1, unit)
        } else {
            self.plus(-amount, unit)
        }
    }

    /// Returns a copy with months added, rolling the year as needed.
    ///
    /// # Errors
    /// `DateError::Overflow` on proleptic-month overflow,
    /// `DateError::OutOfRange` past the supported year range.
    pub fn plus_months(&self, months: i64) -> Result<Self, DateError> {
        if months == 0 {
            return Ok(*self);
        }
        let total = self
            .proleptic_month()
            .checked_add(months)
            .ok_or(DateError::Overflow("month addition"))?;
        Self::of_proleptic_month(total)
    }

    /// Returns a copy with years added, month unchanged.
    ///
    /// # Errors
    /// As [`Self::plus_months`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn plus_years(&self, years: i64) -> Result<Self, DateError> {
        if years == 0 {
            return Ok(*self);
        }
        let year = i64::from(self.year)
            .checked_add(years)
            .ok_or(DateError::Overflow("year addition"))?;
        let year = DateField::Year.check_valid_value(year)?;
        Ok(Self {
            year: year as i32,
            month: self.month,
        })
    }

    /// Mirror of [`Self::plus_months`].
    ///
    /// # Errors
    /// As [`Self::plus_months`].
    pub fn minus_months(&self, months: i64) -> Result<Self, DateError> {
        if months == i64::MIN {
            self.plus_months(i64::MAX)?.plus_months(1)
        } else {
            self.plus_months(-months)
        }
    }

    /// Mirror of [`Self::plus_years`].
    ///
    /// # Errors
    /// As [`Self::plus_years`].
    pub fn minus_years(&self, years: i64) -> Result<Self, DateError> {
        if years == i64::MIN {
            self.plus_years(i64::MAX)?.plus_years(1)
        } else {
            self.plus_years(-years)
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn of_proleptic_month(proleptic_month: i64) -> Result<Self, DateError> {
        let year = DateField::Year.check_valid_value(proleptic_month.div_euclid(12))?;
        Ok(Self {
            year: year as i32,
            month: proleptic_month.rem_euclid(12) as u8 + 1,
        })
    }

    /// Signed count of whole units from this year-month to `end`
    /// (negative when `end` is earlier).
    ///
    /// Month-based units divide the proleptic-month difference,
    /// truncating toward zero; eras compare era ordinals.
    ///
    /// # Errors
    /// `DateError::Conversion` if `end` cannot be reduced to a
    /// year-month, `DateError::UnsupportedUnit` for day-based units.
    pub fn until<T: TemporalAccessor>(&self, end: &T, unit: DateUnit) -> Result<i64, DateError> {
        let end = Self::from_temporal(end)?;
        if unit == DateUnit::Eras {
            return Ok(end.get_long(DateField::Era)? - self.get_long(DateField::Era)?);
        }
        match unit.month_count() {
            // exact: proleptic months cannot overflow for in-range years
            Some(months_per_unit) => {
                Ok((end.proleptic_month() - self.proleptic_month()) / months_per_unit)
            }
            None => Err(DateError::UnsupportedUnit(unit)),
        }
    }

    /// Combines this year-month with a day-of-month to form a date.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the day is invalid for this
    /// year-month.
    pub fn at_day(&self, day: u8) -> Result<JalaliDate, DateError> {
        JalaliDate::of(self.year, self.month, day)
    }

    /// Returns the last valid date of this year-month.
    pub fn at_end_of_month(&self) -> JalaliDate {
        JalaliDate::from_parts(self.year, self.month, self.length_of_month())
    }

    /// Adjusts a Jalali temporal value to this proleptic-month.
    ///
    /// # Errors
    /// Returns `DateError::ChronologyMismatch` when the target belongs
    /// to another calendar system.
    pub fn adjust_into<T: Temporal>(&self, temporal: &T) -> Result<T, DateError> {
        if temporal.chronology() != Chronology::Jalali {
            return Err(DateError::ChronologyMismatch {
                expected: Chronology::Jalali,
                found: temporal.chronology(),
            });
        }
        temporal.with_field(DateField::ProlepticMonth, self.proleptic_month())
    }

    /// Checks if this year-month is before the other.
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    /// Checks if this year-month is after the other.
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl TemporalAccessor for JalaliYearMonth {
    fn chronology(&self) -> Chronology {
        Chronology::Jalali
    }

    fn is_supported(&self, field: DateField) -> bool {
        matches!(
            field,
            DateField::Year
                | DateField::MonthOfYear
                | DateField::ProlepticMonth
                | DateField::YearOfEra
                | DateField::Era
        )
    }

    fn range(&self, field: DateField) -> Result<ValueRange, DateError> {
        match field {
            // the years of the before-era gain the year-zero slot
            DateField::YearOfEra if self.year <= 0 => {
                Ok(ValueRange::of(1, i64::from(MAX_YEAR) + 1))
            }
            DateField::YearOfEra => Ok(ValueRange::of(1, i64::from(MAX_YEAR))),
            DateField::Year
            | DateField::MonthOfYear
            | DateField::ProlepticMonth
            | DateField::Era => Ok(field.value_range()),
            DateField::DayOfMonth | DateField::DayOfYear | DateField::EpochDay => {
                Err(DateError::UnsupportedField(field))
            }
        }
    }

    fn get_long(&self, field: DateField) -> Result<i64, DateError> {
        match field {
            DateField::MonthOfYear => Ok(i64::from(self.month)),
            DateField::ProlepticMonth => Ok(self.proleptic_month()),
            DateField::YearOfEra => Ok(i64::from(if self.year < 1 {
                1 - self.year
            } else {
                self.year
            })),
            DateField::Year => Ok(i64::from(self.year)),
            DateField::Era => Ok(i64::from(self.year >= 1)),
            DateField::DayOfMonth | DateField::DayOfYear | DateField::EpochDay => {
                Err(DateError::UnsupportedField(field))
            }
        }
    }
}

impl Temporal for JalaliYearMonth {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn with_field(&self, field: DateField, value: i64) -> Result<Self, DateError> {
        field.check_valid_value(value)?;
        match field {
            DateField::MonthOfYear => self.with_month(value as u8),
            DateField::ProlepticMonth => self.plus_months(value - self.proleptic_month()),
            DateField::YearOfEra => self.with_year(if self.year < 1 {
                (1 - value) as i32
            } else {
                value as i32
            }),
            DateField::Year => self.with_year(value as i32),
            DateField::Era => {
                if self.get_long(DateField::Era)? == value {
                    Ok(*self)
                } else {
                    self.with_year(1 - self.year)
                }
            }
            DateField::DayOfMonth | DateField::DayOfYear | DateField::EpochDay => {
                Err(DateError::UnsupportedField(field))
            }
        }
    }
}

impl fmt::Display for JalaliYearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:02}", self.month)
    }
}

impl FromStr for JalaliYearMonth {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, rest) = parse_year_prefix(s, s)?;
        let rest = strip_separator(s, rest)?;
        let month = parse_two_digits(s, rest, "month")?;
        Self::of(year, month).map_err(|e| e.into_parse(s))
    }
}

impl serde::Serialize for JalaliYearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for JalaliYearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
