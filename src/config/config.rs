use config::{Config, ConfigError, Environment, File};
use log::LevelFilter;
use serde::Deserialize;

/// Public Uniswap V2 subgraph.
pub const UNISWAP_V2_SUBGRAPH_URL: &str =
    "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v2";

/// GraphQL endpoint configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct SubgraphSettings {
    #[serde(default = "default_subgraph_url")]
    pub url: String,
    /// Whole-request timeout applied by the HTTP client.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SubgraphSettings {
    fn default() -> Self {
        Self {
            url: default_subgraph_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_subgraph_url() -> String {
    UNISWAP_V2_SUBGRAPH_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// ClickHouse connection used by the metrics writer.
///
/// All points land in a single table; see `schema/clickhouse.sql`.
#[derive(Debug, Deserialize, Clone)]
pub struct ClickHouseSettings {
    pub url: String,
    #[serde(default = "default_clickhouse_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_clickhouse_database")]
    pub database: String,
    #[serde(default = "default_metrics_table")]
    pub table: String,
}

fn default_clickhouse_user() -> String {
    "default".to_string()
}

fn default_clickhouse_database() -> String {
    "default".to_string()
}

fn default_metrics_table() -> String {
    "metric_points".to_string()
}

/// Root application configuration.
///
/// Loaded from `config.{yaml,toml,json}` in the working directory, then
/// overridden by `UNIGRAPH__*` environment variables
/// (e.g. `UNIGRAPH__CLICKHOUSE__URL`).
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub subgraph: SubgraphSettings,
    pub clickhouse: ClickHouseSettings,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("UNIGRAPH").separator("__"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }

    /// Log level for the logger, falling back to `Info` on unknown names.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_yaml(yaml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let settings = from_yaml("clickhouse:\n  url: http://localhost:8123\n");
        assert_eq!(settings.subgraph.url, UNISWAP_V2_SUBGRAPH_URL);
        assert_eq!(settings.subgraph.timeout_secs, 30);
        assert_eq!(settings.clickhouse.table, "metric_points");
        assert_eq!(settings.clickhouse.user, "default");
        assert_eq!(settings.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let settings = from_yaml(
            "subgraph:\n  url: http://127.0.0.1:8000/subgraphs/name/uniswap\n  timeout_secs: 5\n\
             clickhouse:\n  url: http://ch:8123\n  database: analytics\n  table: points\n\
             log_level: debug\n",
        );
        assert_eq!(settings.subgraph.timeout_secs, 5);
        assert_eq!(settings.clickhouse.database, "analytics");
        assert_eq!(settings.clickhouse.table, "points");
        assert_eq!(settings.level_filter(), LevelFilter::Debug);
    }
}
