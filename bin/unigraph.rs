use anyhow::Context;
use log::{info, warn};
use simple_logger::SimpleLogger;
use time::OffsetDateTime;

use unigraph::{
    uniswap::{args, UNISWAP_V2_FACTORY},
    HttpTransport, MetricsWriter, Settings, UniswapClient,
};

/// DAI, used as the sample token.
const SAMPLE_TOKEN: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";

#[tokio::main()]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::new()
        .context("Failed to load configuration. Please ensure config.yaml or UNIGRAPH__* variables are set")?;

    SimpleLogger::new()
        .with_level(settings.level_filter())
        .init()
        .context("Failed to initialize logger")?;

    let transport = HttpTransport::from_settings(&settings.subgraph)
        .context("Failed to create subgraph transport")?;
    let uniswap = UniswapClient::new(transport);

    let writer = MetricsWriter::new(settings.clickhouse.clone())
        .await
        .context("Failed to initialize ClickHouse connection")?;
    writer.migrate().await.context("Failed to run migrations")?;

    let now = OffsetDateTime::now_utc();

    let stats = uniswap
        .global_stats(UNISWAP_V2_FACTORY)
        .await
        .context("Failed to fetch global stats")?;
    info!(
        "Uniswap V2: volume ${} liquidity ${} txs {}",
        stats.total_volume_usd, stats.total_liquidity_usd, stats.tx_count
    );
    writer
        .write_point(&stats.to_point(UNISWAP_V2_FACTORY, now))
        .await
        .context("Failed to record global stats")?;

    let token = uniswap
        .token_overview(SAMPLE_TOKEN)
        .await
        .context("Failed to fetch token overview")?;
    info!(
        "{} ({}): {} ETH, volume ${}",
        token.name, token.symbol, token.derived_eth, token.trade_volume_usd
    );
    writer
        .write_point(&token.to_point(SAMPLE_TOKEN, now))
        .await
        .context("Failed to record token overview")?;

    let pairs = uniswap
        .most_liquid_pairs(&args::most_liquid_pairs(5))
        .await
        .context("Failed to fetch most liquid pairs")?;
    info!("Top {} pairs by liquidity", pairs.len());

    for pair in &pairs {
        match uniswap.pair_overview(&pair.id).await {
            Ok(pair) => info!(
                "{}/{} reserve ${}",
                pair.token0.symbol, pair.token1.symbol, pair.reserve_usd
            ),
            Err(e) => warn!("Skipping pair {}: {:#}", pair.id, e),
        }
    }

    writer.close();
    info!("Done");
    Ok(())
}
