//! Uniswap V2 subgraph queries.

pub mod args;
mod client;
pub mod models;

pub use client::{
    global_historical_lookup_query, global_stats_query, token_transactions_request,
    UniswapClient, UNISWAP_V2_FACTORY,
};
pub use models::{
    Burn, GlobalStats, Mint, PairDailyAggregated, PairData, PairId, RecentSwap, Swap, SwapPair,
    TokenData, TokenDayData, TokenOverview, TokenSymbol, TokenTransactions, Transaction,
};
