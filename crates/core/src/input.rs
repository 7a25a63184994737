//! Raw input parsing and validation
//!
//! Turns the raw `number` query parameter into a [`NumberInput`] according to a
//! [`ValidationPolicy`], and describes how a rejected input is reported back to
//! the caller.

use serde::Serialize;
use std::fmt;

/// How invalid input is handled and reported
///
/// The policy is chosen once at startup and applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Accept decimals and negative numbers; report bad input with `200 OK`
    /// and `{"number": <raw>, "error": true}`.
    #[default]
    Permissive,
    /// Accept non-negative integers only; report bad input with
    /// `400 Bad Request` and `{"detail": <reason>}`.
    Strict,
}

impl ValidationPolicy {
    /// Whether a literal containing a decimal point is parsed as a real number
    pub fn allows_fractional(self) -> bool {
        matches!(self, ValidationPolicy::Permissive)
    }

    /// Whether negative values are classified instead of rejected
    pub fn allows_negative(self) -> bool {
        matches!(self, ValidationPolicy::Permissive)
    }
}

/// A successfully parsed `number` parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NumberInput {
    Integer(i64),
    /// Always finite, with an integral part that fits in an `i64`.
    Real(f64),
}

impl NumberInput {
    /// Integral part, truncated toward zero
    pub fn integral_part(self) -> i64 {
        match self {
            NumberInput::Integer(n) => n,
            NumberInput::Real(value) => value.trunc() as i64,
        }
    }

    /// The value as an integer, if it has no fractional part
    ///
    /// Integer-valued reals such as `28.0` count as integers.
    pub fn as_integer(self) -> Option<i64> {
        match self {
            NumberInput::Integer(n) => Some(n),
            NumberInput::Real(value) if value.fract() == 0.0 => Some(value as i64),
            NumberInput::Real(_) => None,
        }
    }

    pub fn is_negative(self) -> bool {
        match self {
            NumberInput::Integer(n) => n < 0,
            NumberInput::Real(value) => value < 0.0,
        }
    }
}

impl fmt::Display for NumberInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberInput::Integer(n) => write!(f, "{n}"),
            NumberInput::Real(value) => write!(f, "{value}"),
        }
    }
}

/// Reasons a raw `number` parameter is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid number format")]
    InvalidFormat { raw: String },

    #[error("Negative numbers are not allowed")]
    NegativeNotAllowed { raw: String },
}

impl ValidationError {
    /// The raw parameter exactly as the caller sent it
    pub fn raw(&self) -> &str {
        match self {
            ValidationError::InvalidFormat { raw } | ValidationError::NegativeNotAllowed { raw } => {
                raw
            }
        }
    }
}

/// Parse the raw `number` parameter under the given policy
///
/// Surrounding whitespace is ignored. Integers are tried first; when the policy
/// allows it, a literal containing `.` is parsed as a real number.
pub fn parse_number(raw: &str, policy: ValidationPolicy) -> Result<NumberInput, ValidationError> {
    let invalid = || ValidationError::InvalidFormat {
        raw: raw.to_string(),
    };

    let trimmed = raw.trim();
    let number = if let Ok(n) = trimmed.parse::<i64>() {
        NumberInput::Integer(n)
    } else if policy.allows_fractional() && trimmed.contains('.') {
        let value = trimmed.parse::<f64>().map_err(|_| invalid())?;
        // Bounds are exclusive because `i64::MAX as f64` rounds up to 2^63.
        if !value.is_finite() || value.trunc() >= i64::MAX as f64 || value.trunc() < i64::MIN as f64
        {
            return Err(invalid());
        }
        NumberInput::Real(value)
    } else {
        return Err(invalid());
    };

    if number.is_negative() && !policy.allows_negative() {
        return Err(ValidationError::NegativeNotAllowed {
            raw: raw.to_string(),
        });
    }

    Ok(number)
}

/// Response body for a rejected input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rejection {
    /// `{"number": "<raw>", "error": true}`
    Flagged { number: String, error: bool },
    /// `{"detail": "<reason>"}`
    Detail { detail: String },
}

impl Rejection {
    /// Build the rejection body the policy prescribes for this error
    pub fn new(policy: ValidationPolicy, err: &ValidationError) -> Self {
        match policy {
            ValidationPolicy::Permissive => Rejection::Flagged {
                number: err.raw().to_string(),
                error: true,
            },
            ValidationPolicy::Strict => Rejection::Detail {
                detail: err.to_string(),
            },
        }
    }
}
