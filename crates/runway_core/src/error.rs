use std::fmt;

use jiff::civil::Date;

/// Longest projection the engine will simulate, in months.
pub const MAX_HORIZON_MONTHS: u32 = 120;

/// Errors raised for arguments the engine cannot meaningfully compute with.
///
/// Negative money or headcount is *not* an error here: those are the calling
/// layer's responsibility. Only values that would poison every downstream
/// number (non-finite inputs) or an impossible horizon are rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Horizon was zero or longer than [`MAX_HORIZON_MONTHS`]
    InvalidHorizon(u32),
    /// An input field was NaN or infinite
    NonFiniteInput { field: &'static str, value: f64 },
    /// A date `months` after `as_of` falls outside the supported calendar
    DateOutOfRange { as_of: Date, months: u32 },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidHorizon(months) => write!(
                f,
                "invalid projection horizon of {months} months (expected 1..={MAX_HORIZON_MONTHS})"
            ),
            EngineError::NonFiniteInput { field, value } => {
                write!(f, "input field `{field}` is not finite ({value})")
            }
            EngineError::DateOutOfRange { as_of, months } => write!(
                f,
                "{months} months after {as_of} is outside the supported calendar"
            ),
        }
    }
}

impl std::error::Error for EngineError {}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Reject NaN and infinities for a named input field.
#[inline]
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::NonFiniteInput { field, value })
    }
}
