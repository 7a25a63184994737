//! Pure helpers for the number facts service
//!
//! The request itself is made by the shell crate; this module only knows how
//! the service is addressed and what to say when it cannot be reached.

use std::fmt::Display;

/// Base URL of the public numbers API
pub const DEFAULT_FACTS_BASE_URL: &str = "http://numbersapi.com";

/// Default bound on a single fact lookup, in seconds
pub const DEFAULT_FACT_TIMEOUT_SECS: u64 = 5;

/// URL of the math fact for `n`: `{base_url}/{n}/math`
///
/// A trailing slash on `base_url` is ignored.
pub fn fact_url(base_url: &str, n: i64) -> String {
    format!("{}/{n}/math", base_url.trim_end_matches('/'))
}

/// Fact used whenever the service cannot provide one
pub fn fallback_fact(number: impl Display) -> String {
    format!("{number} is a number.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::NumberInput;

    #[test]
    fn test_fact_url() {
        assert_eq!(
            fact_url("http://numbersapi.com", 42),
            "http://numbersapi.com/42/math"
        );
    }

    #[test]
    fn test_fact_url_trailing_slash() {
        assert_eq!(
            fact_url("http://localhost:9000/", -7),
            "http://localhost:9000/-7/math"
        );
    }

    #[test]
    fn test_fallback_fact_integer() {
        assert_eq!(fallback_fact(17), "17 is a number.");
    }

    #[test]
    fn test_fallback_fact_real() {
        assert_eq!(fallback_fact(NumberInput::Real(2.5)), "2.5 is a number.");
    }
}
