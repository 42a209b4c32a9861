//! Parsing of subgraph numeric scalars.
//!
//! The subgraph serializes `BigDecimal` and `BigInt` values as strings. They
//! are parsed with BigDecimal first so that values beyond the f64/u64 range or
//! precision fail cleanly instead of being silently mangled.

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use std::str::FromStr;

/// Parse a `BigDecimal` string (e.g. `"4123.551"`) to f64.
///
/// Returns `None` for unparsable or non-finite values.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let big_value = BigDecimal::from_str(value.trim()).ok()?;

    let result = big_value.to_f64()?;

    if result.is_finite() {
        Some(result)
    } else {
        None
    }
}

/// Parse a non-negative `BigInt` string (e.g. a transaction count) to u64.
pub fn parse_count(value: &str) -> Option<u64> {
    let big_value = BigDecimal::from_str(value.trim()).ok()?;

    // Reject fractional input instead of truncating it.
    if big_value.with_scale(0) != big_value {
        return None;
    }

    big_value.to_u64()
}
