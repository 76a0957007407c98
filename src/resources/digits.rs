//! Leading-digit extraction.
//!
//! Resource fields arrive as free-form text ("100m", "128Mi", "2 cores").
//! Only the leading run of ASCII digits is significant; whatever follows it
//! is ignored.

use thiserror::Error;

/// Failure to pull a number out of a resource string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigitsError {
    /// The string does not start with a decimal digit
    #[error("no numeric value found in {input:?}")]
    NoDigitsFound { input: String },

    /// The value does not fit in a 64-bit signed integer
    #[error("numeric value {value} is out of range for a 64-bit signed integer")]
    NumericOverflow { value: String },

    /// The value fits, but not once converted to its base unit
    #[error("{value} x {multiplier} is out of range for a 64-bit signed integer")]
    ScaledOverflow { value: i64, multiplier: i64 },
}

impl DigitsError {
    /// Whether the input had no leading digits at all.
    pub fn is_no_digits(&self) -> bool {
        matches!(self, Self::NoDigitsFound { .. })
    }

    /// Whether the value overflowed, before or after unit scaling.
    pub fn is_overflow(&self) -> bool {
        matches!(
            self,
            Self::NumericOverflow { .. } | Self::ScaledOverflow { .. }
        )
    }
}

/// Return the leading run of ASCII digits in `input` (possibly empty).
pub fn leading_digits(input: &str) -> &str {
    let end = input
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(input.len());
    &input[..end]
}

/// Parse the leading decimal digits of `input` as an `i64`.
///
/// # Examples
/// - "100m" -> 100
/// - "128Mi" -> 128
/// - "0" -> 0
/// - "" / "abc" / " 1" / "-1" -> `NoDigitsFound`
pub fn extract_digits(input: &str) -> Result<i64, DigitsError> {
    let digits = leading_digits(input);
    if digits.is_empty() {
        return Err(DigitsError::NoDigitsFound {
            input: input.to_string(),
        });
    }

    digits.bytes().try_fold(0i64, |acc, b| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(b - b'0')))
            .ok_or_else(|| DigitsError::NumericOverflow {
                value: digits.to_string(),
            })
    })
}
