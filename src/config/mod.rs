#[allow(clippy::module_inception)]
mod config;

pub use self::config::{ClickHouseSettings, Settings, SubgraphSettings, UNISWAP_V2_SUBGRAPH_URL};
