use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chronology;
use crate::consts::{MAX_YEAR, MIN_YEAR};
use crate::date::JalaliDate;
use crate::error::DateError;
use crate::fmt::{parse_error, parse_year_prefix, write_year};
use crate::month::JalaliMonth;
use crate::temporal::DateField;
use crate::year_month::JalaliYearMonth;

/// A validated Jalali year in the range `MIN_YEAR..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct JalaliYear(i32);

impl JalaliYear {
    /// Obtains a year, validating it against the supported range.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the value lies outside
    /// `MIN_YEAR..=MAX_YEAR`.
    pub fn of(year: i32) -> Result<Self, DateError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateError::OutOfRange {
                field: DateField::Year,
                value: i64::from(year),
                min: i64::from(MIN_YEAR),
                max: i64::from(MAX_YEAR),
            });
        }
        Ok(Self(year))
    }

    /// Returns the year value.
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Checks if this year is a leap year under the Jalali intercalation
    /// rule.
    pub const fn is_leap(self) -> bool {
        chronology::is_leap_year(self.0)
    }

    /// Returns the length of the year in days, 365 or 366.
    pub const fn length(self) -> u16 {
        chronology::year_length(self.0)
    }

    /// Combines this year with a month.
    pub fn at_month(self, month: JalaliMonth) -> JalaliYearMonth {
        JalaliYearMonth::from_parts(self.0, month.value())
    }

    /// Combines this year with a day-of-year to form a full date.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the day-of-year exceeds this
    /// year's length.
    pub fn at_day(self, day_of_year: u16) -> Result<JalaliDate, DateError> {
        if !(1..=self.length()).contains(&day_of_year) {
            return Err(DateError::OutOfRange {
                field: DateField::DayOfYear,
                value: i64::from(day_of_year),
                min: 1,
                max: i64::from(self.length()),
            });
        }
        let (month, day) = chronology::from_day_of_year(day_of_year);
        Ok(JalaliDate::from_parts(self.0, month, day))
    }
}

impl TryFrom<i32> for JalaliYear {
    type Error = DateError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::of(value)
    }
}

impl From<JalaliYear> for i32 {
    fn from(year: JalaliYear) -> Self {
        year.0
    }
}

impl fmt::Display for JalaliYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.0)
    }
}

impl FromStr for JalaliYear {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, rest) = parse_year_prefix(s, s)?;
        if !rest.is_empty() {
            return Err(parse_error(s, "trailing characters after year"));
        }
        Self::of(year).map_err(|e| e.into_parse(s))
    }
}
