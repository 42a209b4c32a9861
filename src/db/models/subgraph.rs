//! Conversions from subgraph results to metric points.
//!
//! Decimal strings that fail to parse are left out of the point rather than
//! recorded as zero.

use time::OffsetDateTime;

use crate::{
    db::models::Point,
    uniswap::{GlobalStats, PairDailyAggregated, TokenDayData, TokenOverview},
    utils::{parse_count, parse_decimal},
};

impl GlobalStats {
    /// Point for measurement `global_stats`, tagged with the factory id.
    pub fn to_point(&self, factory_id: &str, time: OffsetDateTime) -> Point {
        let point = Point::new("global_stats", time)
            .tag("factory", factory_id)
            .field_opt("total_volume_usd", parse_decimal(&self.total_volume_usd))
            .field_opt("total_liquidity_usd", parse_decimal(&self.total_liquidity_usd));
        match parse_count(&self.tx_count) {
            Some(count) => point.field("tx_count", count),
            None => point,
        }
    }
}

impl TokenOverview {
    /// Point for measurement `token_overview`, tagged with token id and symbol.
    pub fn to_point(&self, token_id: &str, time: OffsetDateTime) -> Point {
        Point::new("token_overview", time)
            .tag("token", token_id)
            .tag("symbol", self.symbol.as_str())
            .field_opt("derived_eth", parse_decimal(&self.derived_eth))
            .field_opt("trade_volume_usd", parse_decimal(&self.trade_volume_usd))
            .field_opt("total_liquidity", parse_decimal(&self.total_liquidity))
    }
}

impl PairDailyAggregated {
    /// Point for measurement `pair_day`, timestamped at the start of the day.
    ///
    /// Returns `None` if `date` is not a representable timestamp.
    pub fn to_point(&self, pair_address: &str) -> Option<Point> {
        let time = OffsetDateTime::from_unix_timestamp(self.date).ok()?;
        Some(
            Point::new("pair_day", time)
                .tag("pair", pair_address)
                .field_opt("daily_volume_token0", parse_decimal(&self.daily_volume_token0))
                .field_opt("daily_volume_token1", parse_decimal(&self.daily_volume_token1))
                .field_opt("daily_volume_usd", parse_decimal(&self.daily_volume_usd))
                .field_opt("reserve_usd", parse_decimal(&self.reserve_usd)),
        )
    }
}

impl TokenDayData {
    /// Point for measurement `token_day`, timestamped at the start of the day.
    pub fn to_point(&self) -> Option<Point> {
        let time = OffsetDateTime::from_unix_timestamp(self.date).ok()?;
        Some(
            Point::new("token_day", time)
                .tag("id", self.id.as_str())
                .field_opt("price_usd", parse_decimal(&self.price_usd))
                .field_opt("total_liquidity", parse_decimal(&self.total_liquidity))
                .field_opt("total_liquidity_usd", parse_decimal(&self.total_liquidity_usd))
                .field_opt("total_liquidity_eth", parse_decimal(&self.total_liquidity_eth))
                .field_opt("daily_volume", parse_decimal(&self.daily_volume))
                .field_opt("daily_volume_eth", parse_decimal(&self.daily_volume_eth))
                .field_opt("daily_volume_usd", parse_decimal(&self.daily_volume_usd)),
        )
    }
}
