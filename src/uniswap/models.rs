//! Result shapes for Uniswap V2 subgraph entities.
//!
//! Monetary and reserve amounts are kept as the decimal strings the subgraph
//! returns (`BigDecimal`/`BigInt` scalars); use [`crate::utils::parse_decimal`]
//! to turn them into floats.

use crate::graphql_shape;

graphql_shape! {
    /// Factory-wide totals: all-time volume and liquidity in USD plus transaction count.
    pub struct GlobalStats {
        pub total_volume_usd: String => "totalVolumeUSD",
        pub total_liquidity_usd: String => "totalLiquidityUSD",
        pub tx_count: String => "txCount",
    }
}

graphql_shape! {
    /// Token identity and ETH-denominated price.
    pub struct TokenData {
        pub id: String => "id",
        pub symbol: String => "symbol",
        pub name: String => "name",
        pub derived_eth: String => "derivedETH",
    }
}

graphql_shape! {
    /// Current pair state with both tokens expanded.
    pub struct PairData {
        pub id: String => "id",
        pub token0: TokenData => "token0" { TokenData },
        pub token1: TokenData => "token1" { TokenData },
        pub reserve0: String => "reserve0",
        pub reserve1: String => "reserve1",
        pub reserve_usd: String => "reserveUSD",
        pub volume_usd: String => "volumeUSD",
        pub tx_count: String => "txCount",
    }
}

graphql_shape! {
    pub struct PairId {
        pub id: String => "id",
    }
}

graphql_shape! {
    pub struct TokenSymbol {
        pub symbol: String => "symbol",
    }
}

graphql_shape! {
    pub struct SwapPair {
        pub token0: TokenSymbol => "token0" { TokenSymbol },
        pub token1: TokenSymbol => "token1" { TokenSymbol },
    }
}

graphql_shape! {
    /// A swap on a pair, with the pair's token symbols.
    pub struct RecentSwap {
        pub pair: SwapPair => "pair" { SwapPair },
        pub amount0_in: String => "amount0In",
        pub amount0_out: String => "amount0Out",
        pub amount1_in: String => "amount1In",
        pub amount1_out: String => "amount1Out",
        pub amount_usd: String => "amountUSD",
        pub to: String => "to",
    }
}

graphql_shape! {
    /// One day of pair activity. `date` is the unix timestamp of the day start.
    pub struct PairDailyAggregated {
        pub date: i64 => "date",
        pub daily_volume_token0: String => "dailyVolumeToken0",
        pub daily_volume_token1: String => "dailyVolumeToken1",
        pub daily_volume_usd: String => "dailyVolumeUSD",
        pub reserve_usd: String => "reserveUSD",
    }
}

graphql_shape! {
    /// Token stats aggregated across every pair the token is part of.
    pub struct TokenOverview {
        pub name: String => "name",
        pub symbol: String => "symbol",
        pub decimals: String => "decimals",
        pub derived_eth: String => "derivedETH",
        pub trade_volume_usd: String => "tradeVolumeUSD",
        pub total_liquidity: String => "totalLiquidity",
    }
}

graphql_shape! {
    pub struct TokenDayData {
        pub id: String => "id",
        pub date: i64 => "date",
        pub price_usd: String => "priceUSD",
        pub total_liquidity: String => "totalLiquidityToken",
        pub total_liquidity_usd: String => "totalLiquidityUSD",
        pub total_liquidity_eth: String => "totalLiquidityETH",
        pub daily_volume_eth: String => "dailyVolumeETH",
        pub daily_volume: String => "dailyVolumeToken",
        pub daily_volume_usd: String => "dailyVolumeUSD",
    }
}

graphql_shape! {
    pub struct Transaction {
        pub id: String => "id",
        pub timestamp: String => "timestamp",
    }
}

graphql_shape! {
    /// Amounts are `null` until the mint is complete.
    pub struct Mint {
        pub transaction: Transaction => "transaction" { Transaction },
        pub to: String => "to",
        pub liquidity: String => "liquidity",
        pub amount0: Option<String> => "amount0",
        pub amount1: Option<String> => "amount1",
        pub amount_usd: Option<String> => "amountUSD",
    }
}

graphql_shape! {
    /// A pending burn reports `null` for its recipient and amounts.
    pub struct Burn {
        pub transaction: Transaction => "transaction" { Transaction },
        pub to: Option<String> => "to",
        pub liquidity: String => "liquidity",
        pub amount0: Option<String> => "amount0",
        pub amount1: Option<String> => "amount1",
        pub amount_usd: Option<String> => "amountUSD",
    }
}

graphql_shape! {
    pub struct Swap {
        pub transaction: Transaction => "transaction" { Transaction },
        pub amount0_in: String => "amount0In",
        pub amount0_out: String => "amount0Out",
        pub amount1_in: String => "amount1In",
        pub amount1_out: String => "amount1Out",
        pub amount_usd: String => "amountUSD",
        pub to: String => "to",
    }
}

/// Latest mints, burns and swaps across a set of pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenTransactions {
    pub mints: Vec<Mint>,
    pub burns: Vec<Burn>,
    pub swaps: Vec<Swap>,
}
