//! Argument presets for the list queries.
//!
//! Each preset returns a plain [`Arguments`] value, so callers can adjust or
//! extend it (e.g. add `skip` for manual paging) before passing it on.

use crate::graphql::Arguments;

/// Most liquid pairs first: `first`, ordered by `reserveUSD` descending.
pub fn most_liquid_pairs(first: u32) -> Arguments {
    Arguments::new()
        .arg("first", first)
        .arg("orderBy", "reserveUSD")
        .arg("orderDirection", "desc")
}

/// Latest swaps on one pair, newest first.
pub fn recent_swaps(pair_id: &str) -> Arguments {
    Arguments::new()
        .arg("orderBy", "timestamp")
        .arg("orderDirection", "desc")
        .arg("where", Arguments::new().arg("pair", pair_id))
}

/// Daily pair data after `after_timestamp`, oldest first.
pub fn pair_daily(pair_address: &str, after_timestamp: i64, first: u32) -> Arguments {
    Arguments::new()
        .arg("first", first)
        .arg("orderBy", "date")
        .arg("orderDirection", "asc")
        .arg(
            "where",
            Arguments::new()
                .arg("pairAddress", pair_address)
                .arg("date_gt", after_timestamp),
        )
}

/// Daily token data, oldest first.
pub fn token_daily(token_id: &str) -> Arguments {
    Arguments::new()
        .arg("orderBy", "date")
        .arg("orderDirection", "asc")
        .arg("where", Arguments::new().arg("token", token_id))
}
