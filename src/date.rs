use std::fmt;
use std::str::FromStr;

use crate::chronology::{self, Chronology};
use crate::consts::{MAX_MONTH, MIN_DAY};
use crate::era::JalaliEra;
use crate::error::DateError;
use crate::fmt::{parse_error, parse_two_digits, parse_year_prefix, strip_separator, write_year};
use crate::month::JalaliMonth;
use crate::temporal::{DateField, DateUnit, Temporal, TemporalAccessor, ValueRange};
use crate::year_month::JalaliYearMonth;

/// Seconds per day, for the injected-clock constructor.
const SECONDS_PER_DAY: i64 = 86_400;

/// An immutable date on the proleptic Jalali calendar, such as
/// `1400-07-15`.
///
/// Construction validates the day against the month's length for the
/// year, so no value ever holds an impossible combination. The epoch-day
/// encoding (days since the Gregorian 1970-01-01) is the bridge for
/// day-granularity arithmetic and for conversion to and from the ISO
/// calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDate {
    year: i32,
    month: u8,
    day: u8,
}

impl JalaliDate {
    /// Obtains a date from year, month and day-of-month.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if any field is out of bounds,
    /// including a day beyond the month's length for that year.
    pub fn of(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        DateField::Year.check_valid_value(i64::from(year))?;
        DateField::MonthOfYear.check_valid_value(i64::from(month))?;
        let length = chronology::month_length(year, month);
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

    /// All fields already validated by the caller.
    pub(crate) const fn from_parts(year: i32, month: u8, day: u8) -> Self {
        debug_assert!(month >= 1 && month <= MAX_MONTH);
        debug_assert!(day >= 1 && day <= 31);
        Self { year, month, day }
    }

    /// Obtains the date of the given epoch day.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the epoch day falls outside
    /// the supported year range.
    pub fn from_epoch_day(epoch_day: i64) -> Result<Self, DateError> {
        let (year, month, day) = chronology::epoch_day_to_date(epoch_day)?;
        Ok(Self { year, month, day })
    }

    /// Obtains the date containing an instant supplied as seconds since
    /// the Unix epoch.
    ///
    /// The caller owns time acquisition; this crate never reads a clock.
    ///
    /// # Errors
    /// As [`Self::from_epoch_day`].
    pub fn from_unix_timestamp(seconds: i64) -> Result<Self, DateError> {
        Self::from_epoch_day(seconds.div_euclid(SECONDS_PER_DAY))
    }

    /// Obtains a date from any temporal value.
    ///
    /// A Jalali-chronology value must expose year, month-of-year and
    /// day-of-month; any other calendar crosses over its epoch-day
    /// field.
    ///
    /// # Errors
    /// Returns `DateError::Conversion` when neither path applies.
    pub fn from_temporal<T: TemporalAccessor>(value: &T) -> Result<Self, DateError> {
        Self::reduce(value).map_err(|source| DateError::conversion("JalaliDate", source))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn reduce<T: TemporalAccessor>(value: &T) -> Result<Self, DateError> {
        if value.chronology() == Chronology::Jalali {
            let year = value.get(DateField::Year)?;
            let month = value.get(DateField::MonthOfYear)?;
            let day = value.get(DateField::DayOfMonth)?;
            Self::of(year, month as u8, day as u8)
        } else {
            Self::from_epoch_day(value.get_long(DateField::EpochDay)?)
        }
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

    /// Returns the month as a [`JalaliMonth`].
    pub fn month(&self) -> JalaliMonth {
        match JalaliMonth::of(self.month) {
            Ok(month) => month,
            // month is validated at construction
            Err(_) => unreachable!(),
        }
    }

    /// Returns the day-of-month, 1 to 31.
    #[inline]
    pub const fn day_of_month(&self) -> u8 {
        self.day
    }

    /// Returns the day-of-year, 1 to 365 or 366.
    pub const fn day_of_year(&self) -> u16 {
        chronology::day_of_year(self.month, self.day)
    }

    /// Returns the era this date's year belongs to.
    pub const fn era(&self) -> JalaliEra {
        JalaliEra::of_year(self.year)
    }

    /// Returns the year-month part of this date.
    pub fn year_month(&self) -> JalaliYearMonth {
        JalaliYearMonth::from_parts(self.year, self.month)
    }

    /// Returns the epoch day of this date.
    pub const fn to_epoch_day(&self) -> i64 {
        chronology::date_to_epoch_day(self.year, self.month, self.day)
    }

    const fn proleptic_month(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    /// Checks if the year is a leap year.
    pub const fn is_leap_year(&self) -> bool {
        chronology::is_leap_year(self.year)
    }

    /// Returns the length of the month in days.
    pub const fn length_of_month(&self) -> u8 {
        chronology::month_length(self.year, self.month)
    }

    /// Returns the length of the year in days, 365 or 366.
    pub const fn length_of_year(&self) -> u16 {
        chronology::year_length(self.year)
    }

    /// Largest day-of-month valid for the target month, keeping the rest.
    fn resolve_previous_valid(year: i32, month: u8, day: u8) -> Self {
        let day = day.min(chronology::month_length(year, month));
        Self { year, month, day }
    }

    /// Returns a copy with the year replaced.
    ///
    /// The day-of-month resolves down to the last valid day when the
    /// target Esfand is shorter.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the year is out of bounds.
    pub fn with_year(&self, year: i32) -> Result<Self, DateError> {
        if year == self.year {
            return Ok(*self);
        }
        DateField::Year.check_valid_value(i64::from(year))?;
        Ok(Self::resolve_previous_valid(year, self.month, self.day))
    }

    /// Returns a copy with the month replaced, resolving the day down
    /// when needed.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the month is out of bounds.
    pub fn with_month(&self, month: u8) -> Result<Self, DateError> {
        if month == self.month {
            return Ok(*self);
        }
        DateField::MonthOfYear.check_valid_value(i64::from(month))?;
        Ok(Self::resolve_previous_valid(self.year, month, self.day))
    }

    /// Returns a copy with the day-of-month replaced, strictly
    /// validated.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the day is invalid for the
    /// year-month.
    pub fn with_day_of_month(&self, day: u8) -> Result<Self, DateError> {
        if day == self.day {
            return Ok(*self);
        }
        Self::of(self.year, self.month, day)
    }

    /// Returns a copy with the day-of-year replaced, strictly
    /// validated.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the day-of-year exceeds the
    /// year's length.
    pub fn with_day_of_year(&self, day_of_year: u16) -> Result<Self, DateError> {
        if day_of_year == self.day_of_year() {
            return Ok(*self);
        }
        let length = self.length_of_year();
        if !(1..=length).contains(&day_of_year) {
            return Err(DateError::OutOfRange {
                field: DateField::DayOfYear,
                value: i64::from(day_of_year),
                min: 1,
                max: i64::from(length),
            });
        }
        let (month, day) = chronology::from_day_of_year(day_of_year);
        Ok(Self {
            year: self.year,
            month,
            day,
        })
    }

    /// Returns a copy with the amount of the unit added.
    ///
    /// # Errors
    /// `DateError::Overflow` if the amount/unit multiplication
    /// overflows, `DateError::OutOfRange` if the result leaves the
    /// supported range.
    pub fn plus(&self, amount: i64, unit: DateUnit) -> Result<Self, DateError> {
        match unit {
            DateUnit::Days => self.plus_days(amount),
            DateUnit::Weeks => self.plus_days(
                amount
                    .checked_mul(7)
                    .ok_or(DateError::Overflow("weeks-to-days multiplication"))?,
            ),
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
        }
    }

    /// Returns a copy with the amount of the unit subtracted.
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

    /// Returns a copy with days added, through the epoch-day encoding.
    ///
    /// # Errors
    /// `DateError::Overflow` on epoch-day overflow,
    /// `DateError::OutOfRange` past the supported range.
    pub fn plus_days(&self, days: i64) -> Result<Self, DateError> {
        if days == 0 {
            return Ok(*self);
        }
        let epoch_day = self
            .to_epoch_day()
            .checked_add(days)
            .ok_or(DateError::Overflow("day addition"))?;
        Self::from_epoch_day(epoch_day)
    }

    /// Returns a copy with weeks added.
    ///
    /// # Errors
    /// As [`Self::plus_days`].
    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, DateError> {
        self.plus_days(
            weeks
                .checked_mul(7)
                .ok_or(DateError::Overflow("weeks-to-days multiplication"))?,
        )
    }

    /// Returns a copy with months added, resolving the day down when
    /// the target month is shorter.
    ///
    /// # Errors
    /// As [`Self::plus_days`].
    pub fn plus_months(&self, months: i64) -> Result<Self, DateError> {
        if months == 0 {
            return Ok(*self);
        }
        let total = self
            .proleptic_month()
            .checked_add(months)
            .ok_or(DateError::Overflow("month addition"))?;
        let year = DateField::Year.check_valid_value(total.div_euclid(12))?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (year, month) = (year as i32, total.rem_euclid(12) as u8 + 1);
        Ok(Self::resolve_previous_valid(year, month, self.day))
    }

    /// Returns a copy with years added, resolving an intercalary day
    /// down when the target year is common.
    ///
    /// # Errors
    /// As [`Self::plus_days`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn plus_years(&self, years: i64) -> Result<Self, DateError> {
        if years == 0 {
            return Ok(*self);
        }
        let year = i64::from(self.year)
            .checked_add(years)
            .ok_or(DateError::Overflow("year addition"))?;
        let year = DateField::Year.check_valid_value(year)?;
        Ok(Self::resolve_previous_valid(year as i32, self.month, self.day))
    }

    /// Mirror of [`Self::plus_days`].
    ///
    /// # Errors
    /// As [`Self::plus_days`].
    pub fn minus_days(&self, days: i64) -> Result<Self, DateError> {
        if days == i64::MIN {
            self.plus_days(i64::MAX)?.plus_days(1)
        } else {
            self.plus_days(-days)
        }
    }

    /// Mirror of [`Self::plus_weeks`].
    ///
    /// # Errors
    /// As [`Self::plus_days`].
    pub fn minus_weeks(&self, weeks: i64) -> Result<Self, DateError> {
        if weeks == i64::MIN {
            self.plus_weeks(i64::MAX)?.plus_weeks(1)
        } else {
            self.plus_weeks(-weeks)
        }
    }

    /// Mirror of [`Self::plus_months`].
    ///
    /// # Errors
    /// As [`Self::plus_days`].
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
    /// As [`Self::plus_days`].
    pub fn minus_years(&self, years: i64) -> Result<Self, DateError> {
        if years == i64::MIN {
            self.plus_years(i64::MAX)?.plus_years(1)
        } else {
            self.plus_years(-years)
        }
    }

    /// Signed count of whole units from this date to `end` (negative
    /// when `end` is earlier).
    ///
    /// Day-based units divide the epoch-day difference; month-based
    /// units count complete months, aware of the day-of-month on both
    /// sides; eras compare era ordinals. All divisions truncate toward
    /// zero.
    ///
    /// # Errors
    /// `DateError::Conversion` if `end` cannot be reduced to a date.
    pub fn until<T: TemporalAccessor>(&self, end: &T, unit: DateUnit) -> Result<i64, DateError> {
        let end = Self::from_temporal(end)?;
        match unit {
            DateUnit::Days => Ok(self.days_until(&end)),
            DateUnit::Weeks => Ok(self.days_until(&end) / 7),
            DateUnit::Months => Ok(self.months_until(&end)),
            DateUnit::Years => Ok(self.months_until(&end) / 12),
            DateUnit::Decades => Ok(self.months_until(&end) / 120),
            DateUnit::Centuries => Ok(self.months_until(&end) / 1_200),
            DateUnit::Millennia => Ok(self.months_until(&end) / 12_000),
            DateUnit::Eras => {
                Ok(end.get_long(DateField::Era)? - self.get_long(DateField::Era)?)
            }
        }
    }

    const fn days_until(&self, end: &Self) -> i64 {
        end.to_epoch_day() - self.to_epoch_day()
    }

    /// Complete months between the dates; the packed day term carries
    /// the day-of-month comparison (32 exceeds every month length).
    const fn months_until(&self, end: &Self) -> i64 {
        let start = self.proleptic_month() * 32 + self.day as i64;
        let finish = end.proleptic_month() * 32 + end.day as i64;
        (finish - start) / 32
    }

    /// Adjusts any temporal value to this date by its epoch day.
    ///
    /// The epoch day is calendar-neutral, so the target may belong to
    /// either chronology.
    ///
    /// # Errors
    /// Propagates the target's own validation failure.
    pub fn adjust_into<T: Temporal>(&self, temporal: &T) -> Result<T, DateError> {
        temporal.with_field(DateField::EpochDay, self.to_epoch_day())
    }

    /// Checks if this date is before the other.
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    /// Checks if this date is after the other.
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl TemporalAccessor for JalaliDate {
    fn chronology(&self) -> Chronology {
        Chronology::Jalali
    }

    fn is_supported(&self, _field: DateField) -> bool {
        true
    }

    fn range(&self, field: DateField) -> Result<ValueRange, DateError> {
        match field {
            DateField::DayOfMonth => Ok(ValueRange::of(1, i64::from(self.length_of_month()))),
            DateField::DayOfYear => Ok(ValueRange::of(1, i64::from(self.length_of_year()))),
            DateField::YearOfEra => self.year_month().range(field),
            _ => Ok(field.value_range()),
        }
    }

    fn get_long(&self, field: DateField) -> Result<i64, DateError> {
        match field {
            DateField::DayOfMonth => Ok(i64::from(self.day)),
            DateField::DayOfYear => Ok(i64::from(self.day_of_year())),
            DateField::EpochDay => Ok(self.to_epoch_day()),
            _ => self.year_month().get_long(field),
        }
    }
}

impl Temporal for JalaliDate {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn with_field(&self, field: DateField, value: i64) -> Result<Self, DateError> {
        field.check_valid_value(value)?;
        match field {
            DateField::DayOfMonth => self.with_day_of_month(value as u8),
            DateField::DayOfYear => self.with_day_of_year(value as u16),
            DateField::EpochDay => Self::from_epoch_day(value),
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
        }
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for JalaliDate {
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

impl serde::Serialize for JalaliDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for JalaliDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_YEAR, MIN_YEAR};
    use crate::iso::IsoDate;

    fn date(year: i32, month: u8, day: u8) -> JalaliDate {
        JalaliDate::of(year, month, day).unwrap()
    }

    #[test]
    fn test_of_validates_day_against_month() {
        struct TestCase {
            year: i32,
            month: u8,
            day: u8,
            valid: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 1400,
                month: 1,
                day: 31,
                valid: true,
                description: "long month upper bound",
            },
            TestCase {
                year: 1400,
                month: 7,
                day: 31,
                valid: false,
                description: "31st of a 30-day month",
            },
            TestCase {
                year: 1399,
                month: 12,
                day: 30,
                valid: true,
                description: "intercalary day of a leap year",
            },
            TestCase {
                year: 1400,
                month: 12,
                day: 30,
                valid: false,
                description: "intercalary day of a common year",
            },
            TestCase {
                year: 1400,
                month: 1,
                day: 0,
                valid: false,
                description: "day zero",
            },
            TestCase {
                year: 1400,
                month: 13,
                day: 1,
                valid: false,
                description: "month thirteen",
            },
        ];

        for case in &cases {
            let result = JalaliDate::of(case.year, case.month, case.day);
            assert_eq!(result.is_ok(), case.valid, "{}", case.description);
            if !case.valid {
                assert!(
                    matches!(result, Err(DateError::OutOfRange { .. })),
                    "{}",
                    case.description
                );
            }
        }
    }

    #[test]
    fn test_epoch_day_round_trip() {
        for value in [
            date(1348, 10, 11),
            date(1399, 12, 30),
            date(1400, 1, 1),
            date(1, 1, 1),
            date(-42, 6, 31),
        ] {
            assert_eq!(
                JalaliDate::from_epoch_day(value.to_epoch_day()).unwrap(),
                value
            );
        }
        assert_eq!(date(1348, 10, 11).to_epoch_day(), 0);
        assert_eq!(date(1400, 1, 1).to_epoch_day(), 18_707);
    }

    #[test]
    fn test_from_unix_timestamp() {
        assert_eq!(JalaliDate::from_unix_timestamp(0).unwrap(), date(1348, 10, 11));
        assert_eq!(
            JalaliDate::from_unix_timestamp(86_399).unwrap(),
            date(1348, 10, 11)
        );
        assert_eq!(
            JalaliDate::from_unix_timestamp(86_400).unwrap(),
            date(1348, 10, 12)
        );
        // negative instants floor toward the previous day
        assert_eq!(
            JalaliDate::from_unix_timestamp(-1).unwrap(),
            date(1348, 10, 10)
        );
    }

    #[test]
    fn test_accessors() {
        let value = date(1400, 7, 15);
        assert_eq!(value.year(), 1400);
        assert_eq!(value.month_value(), 7);
        assert_eq!(value.month(), JalaliMonth::Mehr);
        assert_eq!(value.day_of_month(), 15);
        assert_eq!(value.day_of_year(), 186 + 15);
        assert_eq!(value.era(), JalaliEra::Ap);
        assert_eq!(value.year_month(), JalaliYearMonth::of(1400, 7).unwrap());
        assert_eq!(date(-5, 1, 1).era(), JalaliEra::BeforeAp);
    }

    #[test]
    fn test_day_of_year_boundaries() {
        assert_eq!(date(1400, 1, 1).day_of_year(), 1);
        assert_eq!(date(1400, 12, 29).day_of_year(), 365);
        assert_eq!(date(1399, 12, 30).day_of_year(), 366);
    }

    #[test]
    fn test_get_long_fields() {
        let value = date(1400, 7, 15);
        assert_eq!(value.get_long(DateField::DayOfMonth).unwrap(), 15);
        assert_eq!(value.get_long(DateField::DayOfYear).unwrap(), 201);
        assert_eq!(value.get_long(DateField::EpochDay).unwrap(), value.to_epoch_day());
        assert_eq!(value.get_long(DateField::MonthOfYear).unwrap(), 7);
        assert_eq!(value.get_long(DateField::Year).unwrap(), 1400);
        assert_eq!(value.get_long(DateField::Era).unwrap(), 1);
        assert_eq!(
            value.get_long(DateField::ProlepticMonth).unwrap(),
            1400 * 12 + 6
        );
    }

    #[test]
    fn test_get_rejects_wide_fields() {
        let value = date(1400, 7, 15);
        assert!(matches!(
            value.get(DateField::EpochDay),
            Err(DateError::UnsupportedField(DateField::EpochDay))
        ));
        assert_eq!(value.get(DateField::DayOfMonth).unwrap(), 15);
    }

    #[test]
    fn test_range_refinement() {
        assert_eq!(
            date(1400, 12, 1).range(DateField::DayOfMonth).unwrap(),
            ValueRange::of(1, 29)
        );
        assert_eq!(
            date(1399, 12, 1).range(DateField::DayOfMonth).unwrap(),
            ValueRange::of(1, 30)
        );
        assert_eq!(
            date(1400, 1, 1).range(DateField::DayOfYear).unwrap(),
            ValueRange::of(1, 365)
        );
        assert_eq!(
            date(1399, 1, 1).range(DateField::DayOfYear).unwrap(),
            ValueRange::of(1, 366)
        );
    }

    #[test]
    fn test_with_field() {
        let value = date(1400, 7, 15);
        assert_eq!(
            value.with_field(DateField::DayOfMonth, 1).unwrap(),
            date(1400, 7, 1)
        );
        assert_eq!(
            value.with_field(DateField::DayOfYear, 1).unwrap(),
            date(1400, 1, 1)
        );
        assert_eq!(
            value.with_field(DateField::EpochDay, 0).unwrap(),
            date(1348, 10, 11)
        );
        assert_eq!(
            value.with_field(DateField::MonthOfYear, 1).unwrap(),
            date(1400, 1, 15)
        );
        assert_eq!(
            value.with_field(DateField::Year, 1401).unwrap(),
            date(1401, 7, 15)
        );
        assert_eq!(
            value
                .with_field(DateField::ProlepticMonth, 1399 * 12)
                .unwrap(),
            date(1399, 1, 15)
        );
        assert_eq!(
            value.with_field(DateField::Era, 0).unwrap(),
            date(-1399, 7, 15)
        );
    }

    #[test]
    fn test_with_year_resolves_day() {
        // leap Esfand 30th resolves to the short Esfand's last day
        assert_eq!(
            date(1399, 12, 30).with_year(1400).unwrap(),
            date(1400, 12, 29)
        );
        assert_eq!(
            date(1399, 12, 30).with_year(1403).unwrap(),
            date(1403, 12, 30)
        );
        assert!(date(1400, 1, 1).with_year(MAX_YEAR + 1).is_err());
    }

    #[test]
    fn test_with_month_resolves_day() {
        assert_eq!(date(1400, 1, 31).with_month(7).unwrap(), date(1400, 7, 30));
        assert_eq!(date(1400, 7, 30).with_month(1).unwrap(), date(1400, 1, 30));
        assert!(date(1400, 1, 31).with_month(13).is_err());
    }

    #[test]
    fn test_with_day_strict() {
        assert_eq!(
            date(1400, 7, 15).with_day_of_month(30).unwrap(),
            date(1400, 7, 30)
        );
        assert!(matches!(
            date(1400, 7, 15).with_day_of_month(31),
            Err(DateError::OutOfRange { .. })
        ));

        assert_eq!(
            date(1399, 1, 1).with_day_of_year(366).unwrap(),
            date(1399, 12, 30)
        );
        assert!(matches!(
            date(1400, 1, 1).with_day_of_year(366),
            Err(DateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_plus_days_across_boundaries() {
        assert_eq!(date(1400, 1, 1).plus_days(1).unwrap(), date(1400, 1, 2));
        assert_eq!(date(1400, 6, 31).plus_days(1).unwrap(), date(1400, 7, 1));
        assert_eq!(date(1399, 12, 30).plus_days(1).unwrap(), date(1400, 1, 1));
        assert_eq!(date(1400, 1, 1).plus_days(-1).unwrap(), date(1399, 12, 30));
        assert_eq!(date(1400, 1, 1).plus_days(365).unwrap(), date(1401, 1, 1));
        assert_eq!(date(1400, 1, 1).minus_days(1).unwrap(), date(1399, 12, 30));
    }

    #[test]
    fn test_plus_weeks() {
        assert_eq!(date(1400, 1, 1).plus_weeks(2).unwrap(), date(1400, 1, 15));
        assert_eq!(date(1400, 1, 15).minus_weeks(2).unwrap(), date(1400, 1, 1));
    }

    #[test]
    fn test_plus_months_resolves_day() {
        assert_eq!(date(1400, 1, 15).plus_months(1).unwrap(), date(1400, 2, 15));
        assert_eq!(date(1400, 6, 31).plus_months(1).unwrap(), date(1400, 7, 30));
        assert_eq!(date(1400, 1, 31).plus_months(11).unwrap(), date(1400, 12, 29));
        assert_eq!(date(1400, 1, 15).plus_months(-1).unwrap(), date(1399, 12, 15));
        assert_eq!(date(1400, 1, 15).minus_months(1).unwrap(), date(1399, 12, 15));
    }

    #[test]
    fn test_plus_years_resolves_day() {
        assert_eq!(date(1399, 12, 30).plus_years(1).unwrap(), date(1400, 12, 29));
        assert_eq!(date(1399, 12, 30).plus_years(4).unwrap(), date(1403, 12, 30));
        assert_eq!(date(1400, 7, 15).minus_years(2).unwrap(), date(1398, 7, 15));
    }

    #[test]
    fn test_plus_units() {
        let value = date(1400, 7, 15);
        assert_eq!(value.plus(3, DateUnit::Days).unwrap(), date(1400, 7, 18));
        assert_eq!(value.plus(1, DateUnit::Weeks).unwrap(), date(1400, 7, 22));
        assert_eq!(value.plus(1, DateUnit::Decades).unwrap(), date(1410, 7, 15));
        assert_eq!(value.plus(1, DateUnit::Centuries).unwrap(), date(1500, 7, 15));
        assert_eq!(value.plus(-1, DateUnit::Eras).unwrap(), date(-1399, 7, 15));
        assert_eq!(value.minus(3, DateUnit::Days).unwrap(), date(1400, 7, 12));
    }

    #[test]
    fn test_overflow_errors() {
        let value = date(1400, 7, 15);
        assert!(matches!(
            value.plus(i64::MAX / 3, DateUnit::Weeks),
            Err(DateError::Overflow(_))
        ));
        assert!(matches!(
            value.plus_days(i64::MAX),
            Err(DateError::Overflow(_))
        ));
        assert!(matches!(
            value.minus_days(i64::MIN),
            Err(DateError::Overflow(_))
        ));
        // MAX_YEAR is leap, so its Esfand runs to the 30th
        assert!(matches!(
            date(MAX_YEAR, 12, 30).plus_days(1),
            Err(DateError::OutOfRange { .. })
        ));
        assert!(matches!(
            date(MIN_YEAR, 1, 1).plus_days(-1),
            Err(DateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_until_days_and_weeks() {
        let start = date(1400, 1, 1);
        assert_eq!(start.until(&date(1400, 1, 31), DateUnit::Days).unwrap(), 30);
        assert_eq!(start.until(&date(1401, 1, 1), DateUnit::Days).unwrap(), 365);
        assert_eq!(start.until(&date(1399, 12, 30), DateUnit::Days).unwrap(), -1);
        assert_eq!(start.until(&date(1400, 1, 15), DateUnit::Weeks).unwrap(), 2);
        assert_eq!(start.until(&date(1400, 1, 14), DateUnit::Weeks).unwrap(), 1);
    }

    #[test]
    fn test_until_months_counts_complete_months() {
        let start = date(1400, 1, 15);
        assert_eq!(start.until(&date(1400, 2, 14), DateUnit::Months).unwrap(), 0);
        assert_eq!(start.until(&date(1400, 2, 15), DateUnit::Months).unwrap(), 1);
        assert_eq!(start.until(&date(1399, 12, 15), DateUnit::Months).unwrap(), -1);
        assert_eq!(start.until(&date(1401, 1, 14), DateUnit::Years).unwrap(), 0);
        assert_eq!(start.until(&date(1401, 1, 15), DateUnit::Years).unwrap(), 1);
    }

    #[test]
    fn test_until_eras() {
        assert_eq!(
            date(1400, 1, 1).until(&date(-5, 1, 1), DateUnit::Eras).unwrap(),
            -1
        );
    }

    #[test]
    fn test_until_plus_symmetry() {
        let start = date(1400, 7, 15);
        for k in [-400i64, -1, 0, 1, 33, 365] {
            let moved = start.plus_days(k).unwrap();
            assert_eq!(start.until(&moved, DateUnit::Days).unwrap(), k);
            assert_eq!(moved.until(&start, DateUnit::Days).unwrap(), -k);
        }
    }

    #[test]
    fn test_from_temporal() {
        let value = date(1400, 7, 15);
        assert_eq!(JalaliDate::from_temporal(&value).unwrap(), value);

        // ISO values cross over the epoch-day bridge
        let iso = IsoDate::of(2021, 3, 21).unwrap();
        assert_eq!(JalaliDate::from_temporal(&iso).unwrap(), date(1400, 1, 1));

        // a year-month has no day to reduce from
        let ym = JalaliYearMonth::of(1400, 7).unwrap();
        assert!(matches!(
            JalaliDate::from_temporal(&ym),
            Err(DateError::Conversion { target: "JalaliDate", .. })
        ));
    }

    #[test]
    fn test_adjust_into_crosses_calendars() {
        let value = date(1400, 1, 1);
        let target = IsoDate::of(1970, 1, 1).unwrap();
        let adjusted = value.adjust_into(&target).unwrap();
        assert_eq!(adjusted, IsoDate::of(2021, 3, 21).unwrap());

        let jalali_target = date(1348, 10, 11);
        assert_eq!(value.adjust_into(&jalali_target).unwrap(), value);
    }

    #[test]
    fn test_ordering() {
        assert!(date(1400, 1, 1) < date(1400, 1, 2));
        assert!(date(1400, 1, 31) < date(1400, 2, 1));
        assert!(date(1400, 12, 29) < date(1401, 1, 1));
        assert!(date(1400, 1, 1).is_before(&date(1400, 1, 2)));
        assert!(date(1400, 1, 2).is_after(&date(1400, 1, 1)));
        // ordering agrees with the epoch-day encoding
        let earlier = date(1399, 12, 30);
        let later = date(1400, 1, 1);
        assert_eq!(
            earlier < later,
            earlier.to_epoch_day() < later.to_epoch_day()
        );
    }

    #[test]
    fn test_display_canonical() {
        assert_eq!(date(1400, 7, 15).to_string(), "1400-07-15");
        assert_eq!(date(42, 3, 4).to_string(), "0042-03-04");
        assert_eq!(date(-42, 3, 4).to_string(), "-0042-03-04");
        assert_eq!(date(10_000, 1, 1).to_string(), "+10000-01-01");
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!(JalaliDate::parse("1400-07-15").unwrap(), date(1400, 7, 15));
        assert_eq!(
            JalaliDate::parse("+10000-01-01").unwrap(),
            date(10_000, 1, 1)
        );
        assert_eq!(JalaliDate::parse("-0042-03-04").unwrap(), date(-42, 3, 4));

        for text in [
            "1400-7-15",
            "1400-07-5",
            "1400-07",
            "1400-07-15-",
            "1400-13-01",
            "1400-12-30",
            "1400/07/15",
            "",
        ] {
            assert!(
                matches!(JalaliDate::parse(text), Err(DateError::Parse { .. })),
                "{text:?} must fail to parse"
            );
        }
    }

    #[test]
    fn test_display_parse_round_trip() {
        for value in [
            date(MIN_YEAR, 1, 1),
            date(-999, 12, 29),
            date(0, 6, 31),
            date(1399, 12, 30),
            date(1400, 7, 15),
            date(9_999, 12, 29),
            date(10_000, 1, 1),
            date(MAX_YEAR, 12, 29),
        ] {
            let text = value.to_string();
            assert_eq!(
                JalaliDate::parse(&text).unwrap(),
                value,
                "round trip through {text:?}"
            );
        }
    }

    #[test]
    fn test_serde() {
        let value = date(1400, 7, 15);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#""1400-07-15""#);
        let parsed: JalaliDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);

        let invalid: Result<JalaliDate, _> = serde_json::from_str(r#""1400-12-30""#);
        assert!(invalid.is_err());
    }
}
