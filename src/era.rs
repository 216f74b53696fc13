use serde::{Deserialize, Serialize};

use crate::error::DateError;
use crate::prelude::*;
use crate::temporal::DateField;

/// The two eras of the proleptic Jalali calendar.
///
/// Years greater than or equal to 1 belong to the current era (AP, Anno
/// Persico); years zero and below belong to the era before it, where
/// year-of-era counts backwards as `1 - year`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub enum JalaliEra {
    /// The era before the calendar epoch, numeric value 0.
    #[display(fmt = "BEFORE_AP")]
    BeforeAp,
    /// The current era, numeric value 1.
    #[display(fmt = "AP")]
    Ap,
}

impl JalaliEra {
    /// Obtains an era from its numeric value, 0 or 1.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` for any other value.
    pub const fn of(value: i64) -> Result<Self, DateError> {
        match value {
            0 => Ok(Self::BeforeAp),
            1 => Ok(Self::Ap),
            _ => Err(DateError::OutOfRange {
                field: DateField::Era,
                value,
                min: 0,
                max: 1,
            }),
        }
    }

    /// Era of the given proleptic year.
    pub const fn of_year(year: i32) -> Self {
        if year < 1 { Self::BeforeAp } else { Self::Ap }
    }

    /// Returns the numeric value of the era, 0 or 1.
    #[inline]
    pub const fn value(self) -> i64 {
        match self {
            Self::BeforeAp => 0,
            Self::Ap => 1,
        }
    }
}

impl TryFrom<i64> for JalaliEra {
    type Error = DateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::of(value)
    }
}

impl From<JalaliEra> for i64 {
    fn from(era: JalaliEra) -> Self {
        era.value()
    }
}
