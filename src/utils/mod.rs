//! Utility functions.
//!
//! - [`conversion`] - parsing of subgraph `BigDecimal`/`BigInt` strings

mod conversion;

pub use conversion::{parse_count, parse_decimal};
