pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod uniswap;
pub mod utils;

pub use config::Settings;
pub use db::{MetricsWriter, Point};
pub use error::{Error, Result};
pub use graphql::{GraphQLTransport, HttpTransport};
pub use uniswap::UniswapClient;
