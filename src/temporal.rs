//! The generic field/unit dispatch protocol shared by the calendar value
//! types. Fields and units are closed enumerations dispatched through
//! exhaustive matches; an unrecognized tag is an error value, never a
//! runtime type failure.

use crate::chronology::{Chronology, MAX_EPOCH_DAY, MIN_EPOCH_DAY};
use crate::consts::{MAX_YEAR, MIN_YEAR};
use crate::error::DateError;
use crate::prelude::*;

/// A field addressable through `get`/`get_long`/`with_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DateField {
    /// Day within the month, 1 to the month's length.
    #[display(fmt = "day-of-month")]
    DayOfMonth,
    /// Day within the year, 1 to the year's length.
    #[display(fmt = "day-of-year")]
    DayOfYear,
    /// Days since the Gregorian 1970-01-01, the cross-calendar bridge.
    #[display(fmt = "epoch-day")]
    EpochDay,
    /// Month within the year, 1 to 12.
    #[display(fmt = "month-of-year")]
    MonthOfYear,
    /// `year * 12 + month - 1`, a total order over all year-months.
    #[display(fmt = "proleptic-month")]
    ProlepticMonth,
    /// Year counted within its era, always positive.
    #[display(fmt = "year-of-era")]
    YearOfEra,
    /// The proleptic year.
    #[display(fmt = "year")]
    Year,
    /// The era, 0 (before) or 1 (current).
    #[display(fmt = "era")]
    Era,
}

impl DateField {
    /// The context-free range of valid values for this field.
    ///
    /// Values may refine it ([`TemporalAccessor::range`]): day-of-month
    /// and day-of-year narrow to the actual month/year length, and the
    /// year-of-era upper bound depends on the era.
    pub const fn value_range(self) -> ValueRange {
        match self {
            Self::DayOfMonth => ValueRange::of(1, 31),
            Self::DayOfYear => ValueRange::of(1, 366),
            Self::EpochDay => ValueRange::of(MIN_EPOCH_DAY, MAX_EPOCH_DAY),
            Self::MonthOfYear => ValueRange::of(1, 12),
            Self::ProlepticMonth => {
                ValueRange::of(MIN_YEAR as i64 * 12, MAX_YEAR as i64 * 12 + 11)
            }
            Self::YearOfEra => ValueRange::of(1, MAX_YEAR as i64 + 1),
            Self::Year => ValueRange::of(MIN_YEAR as i64, MAX_YEAR as i64),
            Self::Era => ValueRange::of(0, 1),
        }
    }

    /// Validates a prospective value against the context-free range.
    pub(crate) fn check_valid_value(self, value: i64) -> Result<i64, DateError> {
        self.value_range().check_valid_value(value, self)
    }
}

/// A unit of time addressable through `plus`/`minus`/`until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DateUnit {
    #[display(fmt = "days")]
    Days,
    #[display(fmt = "weeks")]
    Weeks,
    #[display(fmt = "months")]
    Months,
    #[display(fmt = "years")]
    Years,
    #[display(fmt = "decades")]
    Decades,
    #[display(fmt = "centuries")]
    Centuries,
    #[display(fmt = "millennia")]
    Millennia,
    #[display(fmt = "eras")]
    Eras,
}

impl DateUnit {
    /// Months per unit for month-granularity arithmetic; `None` for the
    /// day-based units and eras.
    pub(crate) const fn month_count(self) -> Option<i64> {
        match self {
            Self::Months => Some(1),
            Self::Years => Some(12),
            Self::Decades => Some(120),
            Self::Centuries => Some(1_200),
            Self::Millennia => Some(12_000),
            Self::Days | Self::Weeks | Self::Eras => None,
        }
    }
}

/// The inclusive bounds of valid values for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{min}..={max}")]
pub struct ValueRange {
    min: i64,
    max: i64,
}

impl ValueRange {
    /// Creates a range from inclusive bounds.
    pub const fn of(min: i64, max: i64) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    /// Smallest valid value.
    #[inline]
    pub const fn min(self) -> i64 {
        self.min
    }

    /// Largest valid value.
    #[inline]
    pub const fn max(self) -> i64 {
        self.max
    }

    /// Checks if the value lies within the range.
    #[inline]
    pub const fn is_valid_value(self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Checks if every valid value fits in an `i32`.
    #[inline]
    pub const fn is_int(self) -> bool {
        self.min >= i32::MIN as i64 && self.max <= i32::MAX as i64
    }

    /// Validates a value against the range.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` naming the field when the value
    /// lies outside the bounds.
    pub fn check_valid_value(self, value: i64, field: DateField) -> Result<i64, DateError> {
        if self.is_valid_value(value) {
            Ok(value)
        } else {
            Err(DateError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Validates a value and narrows it to 32 bits.
    ///
    /// # Errors
    /// A field whose range does not fit in an `i32` is reported as
    /// unsupported rather than silently truncated; an in-range check
    /// failure is `DateError::OutOfRange`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn check_valid_int(self, value: i64, field: DateField) -> Result<i32, DateError> {
        if !self.is_int() {
            return Err(DateError::UnsupportedField(field));
        }
        Ok(self.check_valid_value(value, field)? as i32)
    }
}

/// Read access to the fields of a calendar value.
///
/// Implemented by every value type of this crate, including the ISO
/// interchange type, so conversions (`from_temporal`) can reduce any
/// value through its supported fields.
pub trait TemporalAccessor {
    /// Calendar system this value belongs to.
    fn chronology(&self) -> Chronology;

    /// Checks if the field can be queried on this value.
    fn is_supported(&self, field: DateField) -> bool;

    /// Range of valid values for the field, refined by this value.
    ///
    /// # Errors
    /// Returns `DateError::UnsupportedField` for foreign tags.
    fn range(&self, field: DateField) -> Result<ValueRange, DateError>;

    /// Value of the field as an `i64`.
    ///
    /// # Errors
    /// Returns `DateError::UnsupportedField` for foreign tags.
    fn get_long(&self, field: DateField) -> Result<i64, DateError>;

    /// Value of the field as an `i32`.
    ///
    /// # Errors
    /// As [`Self::get_long`], and additionally unsupported when the
    /// field's range exceeds 32 bits (proleptic-month, epoch-day).
    fn get(&self, field: DateField) -> Result<i32, DateError> {
        self.range(field)?.check_valid_int(self.get_long(field)?, field)
    }
}

/// Calendar values that can be rebuilt with one field replaced.
///
/// Targets of the cross-type adjustment protocol (`adjust_into`)
/// implement this alongside [`TemporalAccessor`].
pub trait Temporal: TemporalAccessor + Sized {
    /// Returns a copy with `field` set to `value`; the remaining fields
    /// are held fixed per the field's semantics.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` for an invalid value and
    /// `DateError::UnsupportedField` for a foreign tag.
    fn with_field(&self, field: DateField, value: i64) -> Result<Self, DateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_bounds() {
        let range = ValueRange::of(1, 12);
        assert_eq!(range.min(), 1);
        assert_eq!(range.max(), 12);
        assert!(range.is_valid_value(1));
        assert!(range.is_valid_value(12));
        assert!(!range.is_valid_value(0));
        assert!(!range.is_valid_value(13));
    }

    #[test]
    fn test_check_valid_value() {
        let range = DateField::MonthOfYear.value_range();
        assert_eq!(range.check_valid_value(7, DateField::MonthOfYear).unwrap(), 7);
        assert!(matches!(
            range.check_valid_value(13, DateField::MonthOfYear),
            Err(DateError::OutOfRange {
                field: DateField::MonthOfYear,
                value: 13,
                ..
            })
        ));
    }

    #[test]
    fn test_check_valid_int_rejects_wide_ranges() {
        // Proleptic-month and epoch-day never fit in 32 bits, so `get`
        // must refuse them instead of truncating.
        let wide = DateField::ProlepticMonth.value_range();
        assert!(!wide.is_int());
        assert!(matches!(
            wide.check_valid_int(0, DateField::ProlepticMonth),
            Err(DateError::UnsupportedField(DateField::ProlepticMonth))
        ));

        let narrow = DateField::MonthOfYear.value_range();
        assert_eq!(narrow.check_valid_int(7, DateField::MonthOfYear).unwrap(), 7);
    }

    #[test]
    fn test_unit_month_counts() {
        assert_eq!(DateUnit::Months.month_count(), Some(1));
        assert_eq!(DateUnit::Years.month_count(), Some(12));
        assert_eq!(DateUnit::Decades.month_count(), Some(120));
        assert_eq!(DateUnit::Centuries.month_count(), Some(1_200));
        assert_eq!(DateUnit::Millennia.month_count(), Some(12_000));
        assert_eq!(DateUnit::Days.month_count(), None);
        assert_eq!(DateUnit::Eras.month_count(), None);
    }

    #[test]
    fn test_field_display() {
        assert_eq!(DateField::ProlepticMonth.to_string(), "proleptic-month");
        assert_eq!(DateUnit::Millennia.to_string(), "millennia");
    }
}
