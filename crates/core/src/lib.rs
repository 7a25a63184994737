//! Core library for numclass
//!
//! This crate implements the **Functional Core** of the numclass application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The numclass project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`numclass_core`** (this crate): Pure classification functions with zero I/O
//! - **`numclass`**: HTTP server, outbound fact lookups and CLI (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with plain values, no mocking required
//!
//! # Module Organization
//!
//! - [`input`]: Parsing of the raw `number` parameter and the validation policy
//! - [`classify`]: Numeric predicates and the assembled [`classify::ClassificationResult`]
//! - [`facts`]: Fact service URLs and the fallback fact text
//!
//! # Example Usage
//!
//! ```rust
//! use numclass_core::classify::{classify, Property};
//! use numclass_core::input::{parse_number, ValidationPolicy};
//!
//! let number = parse_number("153", ValidationPolicy::Strict).unwrap();
//! let result = classify(number, "153 is a narcissistic number.".to_string());
//!
//! assert!(!result.is_prime);
//! assert_eq!(result.properties, vec![Property::Armstrong, Property::Odd]);
//! assert_eq!(result.digit_sum, 9);
//! ```
//!
//! The fun fact is passed in already resolved: fetching it is I/O and belongs to
//! the shell crate.

pub mod classify;
pub mod facts;
pub mod input;
