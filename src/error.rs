use crate::chronology::Chronology;
use crate::temporal::{DateField, DateUnit};

/// Error type for every fallible calendar operation.
///
/// All conditions are detected eagerly at construction or mutation time;
/// no value ever exists in an invalid state and no result is silently
/// clamped or truncated in place of an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Value outside the valid bounds of a field.
    #[error("invalid value for {field}: {value} (valid: {min}..={max})")]
    OutOfRange {
        field: DateField,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Field tag not supported by the queried value.
    #[error("unsupported field: {0}")]
    UnsupportedField(DateField),

    /// Unit tag not supported by the queried value.
    #[error("unsupported unit: {0}")]
    UnsupportedUnit(DateUnit),

    /// Text does not match the canonical pattern, or decodes to an
    /// invalid date.
    #[error("cannot parse {text:?}: {reason}")]
    Parse { text: String, reason: String },

    /// Checked arithmetic on an amount exceeded the representable range
    /// before range validation could apply.
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// Adjustment attempted against a value from another calendar system.
    #[error("chronology mismatch: expected {expected}, found {found}")]
    ChronologyMismatch {
        expected: Chronology,
        found: Chronology,
    },

    /// A temporal value could not be reduced to the requested type.
    #[error("unable to obtain {target} from temporal value: {source}")]
    Conversion {
        target: &'static str,
        #[source]
        source: Box<DateError>,
    },
}

impl DateError {
    /// Wraps an extraction failure with the conversion target, preserving
    /// the underlying cause.
    pub(crate) fn conversion(target: &'static str, source: DateError) -> Self {
        Self::Conversion {
            target,
            source: Box::new(source),
        }
    }

    /// Maps any error raised while decoding parsed text into a parse
    /// error carrying the original input.
    pub(crate) fn into_parse(self, text: &str) -> Self {
        match self {
            Self::Parse { .. } => self,
            other => Self::Parse {
                text: text.to_owned(),
                reason: other.to_string(),
            },
        }
    }
}
