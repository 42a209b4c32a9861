use log::debug;

use crate::{
    error::Result,
    graphql::{
        build_arguments, build_query, build_selection_set, decode_list, decode_object, ArgValue,
        Arguments, GraphQLTransport, GraphRequest, Shape,
    },
    uniswap::models::{
        Burn, GlobalStats, Mint, PairDailyAggregated, PairData, PairId, RecentSwap, Swap,
        TokenData, TokenDayData, TokenOverview, TokenTransactions,
    },
};

/// Uniswap V2 factory address, the id of the `uniswapFactory` entity.
pub const UNISWAP_V2_FACTORY: &str = "0x5c69bee701ef814a2b6a3edd4b1652cb9cc5aa6f";

/// Typed access to the Uniswap V2 subgraph.
///
/// Every method issues exactly one request through the transport. List
/// queries are paged manually with `skip`; the subgraph returns at most 1000
/// entities per request.
pub struct UniswapClient<T> {
    transport: T,
}

impl<T: GraphQLTransport> UniswapClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn fetch_one<S: Shape>(&self, root: &str, id: &str, args: Option<&Arguments>) -> Result<S> {
        let query = build_query::<S>(root, Some(id), args);
        debug!("Fetching `{}` {}", root, id);
        let tree = self.transport.execute(&GraphRequest::new(query)).await?;
        decode_object(&tree, root)
    }

    async fn fetch_many<S: Shape>(&self, root: &str, args: &Arguments) -> Result<Vec<S>> {
        let query = build_query::<S>(root, None, Some(args));
        let tree = self.transport.execute(&GraphRequest::new(query)).await?;
        let items: Vec<S> = decode_list(&tree, root)?;
        debug!("Fetched {} `{}` entities", items.len(), root);
        Ok(items)
    }

    /// All-time volume, liquidity and transaction count of a factory.
    pub async fn global_stats(&self, factory_id: &str) -> Result<GlobalStats> {
        self.fetch_one("uniswapFactory", factory_id, None).await
    }

    /// Factory stats as of `block`. Diffing two lookups gives e.g. 24h volume.
    pub async fn global_historical_lookup(
        &self,
        factory_id: &str,
        block: u64,
    ) -> Result<GlobalStats> {
        self.fetch_one("uniswapFactory", factory_id, Some(&block_args(block)))
            .await
    }

    pub async fn pair_overview(&self, pair_id: &str) -> Result<PairData> {
        self.fetch_one("pair", pair_id, None).await
    }

    /// One page of pair ids starting at `skip`.
    pub async fn all_pairs(&self, skip: u32) -> Result<Vec<PairId>> {
        self.fetch_many("pairs", &Arguments::new().arg("skip", skip))
            .await
    }

    /// See [`crate::uniswap::args::most_liquid_pairs`] for the usual arguments.
    pub async fn most_liquid_pairs(&self, args: &Arguments) -> Result<Vec<PairId>> {
        self.fetch_many("pairs", args).await
    }

    /// See [`crate::uniswap::args::recent_swaps`] for the usual arguments.
    pub async fn recent_swaps_from_pair(&self, args: &Arguments) -> Result<Vec<RecentSwap>> {
        self.fetch_many("swaps", args).await
    }

    /// See [`crate::uniswap::args::pair_daily`] for the usual arguments.
    pub async fn pair_daily_aggregated(
        &self,
        args: &Arguments,
    ) -> Result<Vec<PairDailyAggregated>> {
        self.fetch_many("pairDayDatas", args).await
    }

    pub async fn token_overview(&self, token_id: &str) -> Result<TokenOverview> {
        self.fetch_one("token", token_id, None).await
    }

    pub async fn token_data(&self, token_id: &str) -> Result<TokenData> {
        self.fetch_one("token", token_id, None).await
    }

    /// One page of tokens starting at `skip`.
    pub async fn all_tokens(&self, skip: u32) -> Result<Vec<TokenData>> {
        self.fetch_many("tokens", &Arguments::new().arg("skip", skip))
            .await
    }

    /// See [`crate::uniswap::args::token_daily`] for the usual arguments.
    pub async fn token_daily_data(&self, args: &Arguments) -> Result<Vec<TokenDayData>> {
        self.fetch_many("tokenDayDatas", args).await
    }

    /// Latest `first` mints, burns and swaps (each) across `pairs`, newest first.
    pub async fn token_transactions(
        &self,
        pairs: &[String],
        first: u32,
    ) -> Result<TokenTransactions> {
        let request = token_transactions_request(pairs, first)?;
        let tree = self.transport.execute(&request).await?;

        Ok(TokenTransactions {
            mints: decode_list(&tree, "mints")?,
            burns: decode_list(&tree, "burns")?,
            swaps: decode_list(&tree, "swaps")?,
        })
    }
}

fn block_args(block: u64) -> Arguments {
    Arguments::new().arg("block", Arguments::new().arg("number", block))
}

/// Query text for [`UniswapClient::global_stats`].
pub fn global_stats_query(factory_id: &str) -> String {
    build_query::<GlobalStats>("uniswapFactory", Some(factory_id), None)
}

/// Query text for [`UniswapClient::global_historical_lookup`].
pub fn global_historical_lookup_query(factory_id: &str, block: u64) -> String {
    build_query::<GlobalStats>("uniswapFactory", Some(factory_id), Some(&block_args(block)))
}

/// Request for [`UniswapClient::token_transactions`], using the `$allPairs`
/// and `$first` variables.
pub fn token_transactions_request(pairs: &[String], first: u32) -> Result<GraphRequest> {
    let args = Arguments::new()
        .arg("first", ArgValue::variable("first"))
        .arg(
            "where",
            Arguments::new().arg("pair_in", ArgValue::variable("allPairs")),
        )
        .arg("orderBy", ArgValue::enum_value("timestamp"))
        .arg("orderDirection", ArgValue::enum_value("desc"));
    let args = build_arguments(&args);

    let query = format!(
        "query($allPairs: [String!], $first: Int!) {{ \
         mints({args}){{ {mints} }} \
         burns({args}){{ {burns} }} \
         swaps({args}){{ {swaps} }} }}",
        mints = build_selection_set::<Mint>(),
        burns = build_selection_set::<Burn>(),
        swaps = build_selection_set::<Swap>(),
    );

    GraphRequest::new(query)
        .var("allPairs", pairs)?
        .var("first", first)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::graphql::transport::StaticTransport;
    use crate::uniswap::args;

    const DAI: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";

    fn client(response: serde_json::Value) -> UniswapClient<StaticTransport> {
        UniswapClient::new(StaticTransport::new(response))
    }

    #[test]
    fn test_global_stats_query() {
        assert_eq!(
            global_stats_query(UNISWAP_V2_FACTORY),
            format!(
                "{{ uniswapFactory(id: \"{UNISWAP_V2_FACTORY}\"){{ totalVolumeUSD\ntotalLiquidityUSD\ntxCount }} }}"
            )
        );
    }

    #[test]
    fn test_historical_lookup_combines_id_and_block() {
        let query = global_historical_lookup_query("0xf", 10_000_000);
        assert!(query.starts_with(r#"{ uniswapFactory(id: "0xf", block: {number: 10000000}){ "#));
    }

    #[tokio::test]
    async fn test_token_data_end_to_end() {
        let client = client(json!({
            "token": {
                "id": DAI,
                "symbol": "DAI",
                "name": "Dai Stablecoin",
                "derivedETH": "0.00052"
            }
        }));

        let token = client.token_data(DAI).await.unwrap();
        assert_eq!(token.symbol, "DAI");
        assert_eq!(token.name, "Dai Stablecoin");
        assert_eq!(
            client.transport().last_query(),
            format!("{{ token(id: \"{DAI}\"){{ id\nsymbol\nname\nderivedETH }} }}")
        );
    }

    #[tokio::test]
    async fn test_pair_overview_decodes_nested_tokens() {
        let token = |id: &str, symbol: &str| {
            json!({"id": id, "symbol": symbol, "name": symbol, "derivedETH": "1"})
        };
        let client = client(json!({
            "pair": {
                "id": "0xa478",
                "token0": token(DAI, "DAI"),
                "token1": token("0xc02a", "WETH"),
                "reserve0": "1000.5",
                "reserve1": "2.25",
                "reserveUSD": "4000",
                "volumeUSD": "123456.78",
                "txCount": "42"
            }
        }));

        let pair = client.pair_overview("0xa478").await.unwrap();
        assert_eq!(pair.token0.symbol, "DAI");
        assert_eq!(pair.token1.symbol, "WETH");
        assert_eq!(pair.reserve_usd, "4000");
    }

    #[tokio::test]
    async fn test_all_pairs_pages_with_skip() {
        let client = client(json!({"pairs": [{"id": "0x1"}, {"id": "0x2"}]}));

        let pairs = client.all_pairs(1000).await.unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(client.transport().last_query(), "{ pairs(skip: 1000){ id } }");
    }

    #[tokio::test]
    async fn test_pair_daily_reads_pair_day_datas() {
        let client = client(json!({
            "swaps": [],
            "pairDayDatas": [{
                "date": 1_600_041_600,
                "dailyVolumeToken0": "10",
                "dailyVolumeToken1": "20",
                "dailyVolumeUSD": "30",
                "reserveUSD": "40"
            }]
        }));

        let days = client
            .pair_daily_aggregated(&args::pair_daily("0xa478", 1_600_000_000, 100))
            .await
            .unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, 1_600_041_600);
    }

    #[tokio::test]
    async fn test_missing_entity_is_shape_error() {
        let client = client(json!({"token": null}));
        let err = client.token_overview(DAI).await.unwrap_err();
        assert!(err.is_shape());
    }

    #[tokio::test]
    async fn test_transport_failure_is_returned() {
        let client = client(json!("unreachable"));
        let err = client.global_stats(UNISWAP_V2_FACTORY).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_token_transactions_sends_variables() {
        let tx = json!({"id": "0xt", "timestamp": "1600000000"});
        let client = client(json!({
            "mints": [{
                "transaction": tx, "to": "0xa", "liquidity": "1",
                "amount0": "2", "amount1": "3", "amountUSD": "4"
            }],
            "burns": [],
            "swaps": [{
                "transaction": tx, "amount0In": "0", "amount0Out": "1",
                "amount1In": "2", "amount1Out": "0", "amountUSD": "5", "to": "0xb"
            }]
        }));

        let pairs = vec!["0xa478".to_string(), "0xbb2b".to_string()];
        let txs = client.token_transactions(&pairs, 10).await.unwrap();
        assert_eq!(txs.mints.len(), 1);
        assert!(txs.burns.is_empty());
        assert_eq!(txs.swaps[0].transaction.id, "0xt");

        let seen = client.transport().seen.lock().unwrap();
        let request = seen.last().unwrap();
        assert_eq!(request.variables["allPairs"], json!(["0xa478", "0xbb2b"]));
        assert_eq!(request.variables["first"], json!(10));
        assert!(request.query.contains(
            "mints(first: $first, where: {pair_in: $allPairs}, orderBy: timestamp, orderDirection: desc){ transaction { id\ntimestamp }"
        ));
    }

    #[tokio::test]
    async fn test_token_transactions_accepts_pending_burn() {
        let tx = json!({"id": "0xt", "timestamp": "1600000000"});
        let client = client(json!({
            "mints": [],
            "burns": [{
                "transaction": tx, "to": null, "liquidity": "7",
                "amount0": null, "amount1": null, "amountUSD": null
            }, {
                "transaction": tx, "to": "0xc", "liquidity": "1",
                "amount0": "2", "amount1": "3", "amountUSD": "4"
            }],
            "swaps": []
        }));

        let txs = client
            .token_transactions(&["0xa478".to_string()], 10)
            .await
            .unwrap();
        assert_eq!(txs.burns.len(), 2);
        assert_eq!(txs.burns[0].to, None);
        assert_eq!(txs.burns[0].liquidity, "7");
        assert_eq!(txs.burns[0].amount_usd, None);
        assert_eq!(txs.burns[1].amount0.as_deref(), Some("2"));
    }
}
