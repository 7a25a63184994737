//! Numeric predicates and result assembly
//!
//! Every predicate takes an `i64` and is total: values outside a predicate's
//! domain (non-positive numbers for primality and perfection) yield `false`
//! instead of an error. Armstrong status and digit sums strip the sign.

use crate::input::NumberInput;
use serde::Serialize;

/// Tags reported in the `properties` list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Armstrong,
    Even,
    Odd,
}

/// Classification payload returned for a valid number
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub number: NumberInput,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<Property>,
    pub digit_sum: u64,
    pub fun_fact: String,
}

/// Build the full classification for a parsed number
///
/// Non-integral reals are classified through their integral part for parity and
/// digit sum, and are never prime, perfect or Armstrong.
pub fn classify(number: NumberInput, fun_fact: String) -> ClassificationResult {
    match number.as_integer() {
        Some(n) => ClassificationResult {
            number,
            is_prime: is_prime(n),
            is_perfect: is_perfect(n),
            properties: properties(n),
            digit_sum: digit_sum(n),
            fun_fact,
        },
        None => {
            let integral = number.integral_part();
            ClassificationResult {
                number,
                is_prime: false,
                is_perfect: false,
                properties: vec![parity(integral)],
                digit_sum: digit_sum(integral),
                fun_fact,
            }
        }
    }
}

/// Integer square root: the largest `r` with `r * r <= n`
pub fn isqrt(n: u64) -> u64 {
    // The float estimate can be off by one either way for large inputs.
    let mut root = (n as f64).sqrt() as u64;
    while u128::from(root) * u128::from(root) > u128::from(n) {
        root -= 1;
    }
    while u128::from(root + 1) * u128::from(root + 1) <= u128::from(n) {
        root += 1;
    }
    root
}

/// Trial division up to the integer square root
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let n = n as u64;
    (2..=isqrt(n)).all(|i| n % i != 0)
}

/// Whether `n` equals the sum of its proper divisors
///
/// Divisors are enumerated in pairs `(i, n / i)` up to the square root, which
/// gives the same sum as scanning `1..n`. The scan stops once the sum passes `n`.
pub fn is_perfect(n: i64) -> bool {
    // 1 has no proper divisors other than itself, so its sum is 0.
    if n < 2 {
        return false;
    }
    let n = n as u64;
    let mut sum: u128 = 1;
    for i in 2..=isqrt(n) {
        if n % i == 0 {
            sum += u128::from(i);
            let pair = n / i;
            if pair != i {
                sum += u128::from(pair);
            }
            if sum > u128::from(n) {
                return false;
            }
        }
    }
    sum == u128::from(n)
}

/// Whether `|n|` equals the sum of its digits raised to the digit count
pub fn is_armstrong(n: i64) -> bool {
    let value = n.unsigned_abs();
    let digits = decimal_digits(value);
    let power = digits.len() as u32;
    let sum: u128 = digits.iter().map(|&d| u128::from(d).pow(power)).sum();
    sum == u128::from(value)
}

/// Sum of the decimal digits of `|n|`
pub fn digit_sum(n: i64) -> u64 {
    decimal_digits(n.unsigned_abs())
        .into_iter()
        .map(u64::from)
        .sum()
}

pub fn parity(n: i64) -> Property {
    if n % 2 == 0 {
        Property::Even
    } else {
        Property::Odd
    }
}

/// Armstrong tag (when it applies) followed by exactly one parity tag
pub fn properties(n: i64) -> Vec<Property> {
    let mut properties = Vec::with_capacity(2);
    if is_armstrong(n) {
        properties.push(Property::Armstrong);
    }
    properties.push(parity(n));
    properties
}

/// Decimal digits, most significant first; zero has the single digit `0`
fn decimal_digits(mut value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push((value % 10) as u8);
        value /= 10;
    }
    digits.reverse();
    digits
}
