use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_IN_MONTH, ESFAND_DAYS_LEAP, FIRST_HALF_DAYS, MAX_MONTH};
use crate::error::DateError;
use crate::prelude::*;
use crate::temporal::DateField;

/// A month of the Jalali year, Farvardin (1) through Esfand (12).
///
/// This is a pure lookup table: every month knows its ordinal value and
/// its length given a leap-year flag, but performs no arithmetic itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum JalaliMonth {
    #[display(fmt = "Farvardin")]
    Farvardin,
    #[display(fmt = "Ordibehesht")]
    Ordibehesht,
    #[display(fmt = "Khordad")]
    Khordad,
    #[display(fmt = "Tir")]
    Tir,
    #[display(fmt = "Mordad")]
    Mordad,
    #[display(fmt = "Shahrivar")]
    Shahrivar,
    #[display(fmt = "Mehr")]
    Mehr,
    #[display(fmt = "Aban")]
    Aban,
    #[display(fmt = "Azar")]
    Azar,
    #[display(fmt = "Dey")]
    Dey,
    #[display(fmt = "Bahman")]
    Bahman,
    #[display(fmt = "Esfand")]
    Esfand,
}

impl JalaliMonth {
    /// Obtains a month from its ordinal value, 1 (Farvardin) to 12
    /// (Esfand).
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the value is 0 or greater
    /// than 12.
    pub const fn of(value: u8) -> Result<Self, DateError> {
        match value {
            1 => Ok(Self::Farvardin),
            2 => Ok(Self::Ordibehesht),
            3 => Ok(Self::Khordad),
            4 => Ok(Self::Tir),
            5 => Ok(Self::Mordad),
            6 => Ok(Self::Shahrivar),
            7 => Ok(Self::Mehr),
            8 => Ok(Self::Aban),
            9 => Ok(Self::Azar),
            10 => Ok(Self::Dey),
            11 => Ok(Self::Bahman),
            12 => Ok(Self::Esfand),
            _ => Err(DateError::OutOfRange {
                field: DateField::MonthOfYear,
                value: value as i64,
                min: 1,
                max: MAX_MONTH as i64,
            }),
        }
    }

    /// Returns the ordinal value, 1 to 12.
    #[inline]
    pub const fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Returns the length of this month in days.
    ///
    /// Only Esfand varies with the leap-year flag; the first six months
    /// always have 31 days and the rest 30.
    pub const fn length(self, leap_year: bool) -> u8 {
        if matches!(self, Self::Esfand) && leap_year {
            ESFAND_DAYS_LEAP
        } else {
            DAYS_IN_MONTH[self.value() as usize]
        }
    }

    /// Day-of-year of the first day of this month.
    ///
    /// Unlike the ISO calendar this does not depend on the leap-year
    /// flag, because the intercalary day sits at the very end of the
    /// year.
    pub const fn first_day_of_year(self) -> u16 {
        let m = self.value() as u16;
        if m <= 6 {
            31 * (m - 1) + 1
        } else {
            FIRST_HALF_DAYS + 30 * (m - 7) + 1
        }
    }
}

impl TryFrom<u8> for JalaliMonth {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::of(value)
    }
}

impl From<JalaliMonth> for u8 {
    fn from(month: JalaliMonth) -> Self {
        month.value()
    }
}
