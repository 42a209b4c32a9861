//! Time-series persistence.
//!
//! ClickHouse stores every metric point in a single table keyed by
//! measurement name and time; see `schema/clickhouse.sql`.

pub mod clickhouse;
pub mod models;

pub use self::clickhouse::MetricsWriter;
pub use models::{FieldValue, Point, PointRow};
