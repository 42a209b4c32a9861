use clickhouse::Client;
use log::{debug, info};
use time::OffsetDateTime;

use crate::{
    config::ClickHouseSettings,
    db::models::{FieldValue, Point, PointRow},
    error::Result,
};

const SCHEMA: &str = include_str!("../../../schema/clickhouse.sql");

/// Writes metric points to ClickHouse and runs queries against it.
///
/// Every write is flushed before the call returns; there is no buffering
/// across calls.
pub struct MetricsWriter {
    pub client: Client,
    table: String,
}

impl MetricsWriter {
    /// Connects and verifies the connection with `SELECT 1`.
    pub async fn new(settings: ClickHouseSettings) -> Result<Self> {
        info!("Connecting to ClickHouse");

        let client = Client::default()
            .with_url(settings.url.clone())
            .with_user(settings.user.clone())
            .with_password(settings.password.clone())
            .with_database(settings.database.clone())
            .with_validation(false); // Map columns are written as key/value arrays

        let writer = Self::with_client(client, settings.table);
        writer.health_check().await?;

        info!("Successfully connected to ClickHouse");
        Ok(writer)
    }

    /// Wraps an already configured client without touching the network.
    pub fn with_client(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Creates the points table if it does not exist.
    pub async fn migrate(&self) -> Result<()> {
        info!("Running ClickHouse migrations");

        for stmt in schema_statements(&self.table) {
            self.client.query(&stmt).execute().await?;
        }

        info!("ClickHouse migrations completed successfully");
        Ok(())
    }

    /// Writes one point and waits for it to be flushed.
    pub async fn write_point(&self, point: &Point) -> Result<()> {
        point.validate()?;
        let row = point.to_row();

        let mut insert = self.client.insert::<PointRow>(&self.table).await?;
        insert.write(&row).await?;
        insert.end().await?;

        debug!(
            "Wrote point `{}` ({} tags, {} fields)",
            point.measurement,
            point.tags.len(),
            point.fields.len()
        );
        Ok(())
    }

    /// Writes one point assembled from its parts.
    pub async fn write<T, F>(
        &self,
        measurement: &str,
        tags: T,
        fields: F,
        time: OffsetDateTime,
    ) -> Result<()>
    where
        T: IntoIterator<Item = (String, String)>,
        F: IntoIterator<Item = (String, FieldValue)>,
    {
        let point = tags.into_iter().fold(Point::new(measurement, time), |p, (k, v)| p.tag(k, v));
        let point = fields.into_iter().fold(point, |p, (k, v)| p.field(k, v));
        self.write_point(&point).await
    }

    /// Runs `sql` and returns every result row.
    pub async fn run_query<R>(&self, sql: &str) -> Result<Vec<R>>
    where
        R: clickhouse::RowOwned + clickhouse::RowRead,
    {
        debug!("Running query: {}", sql);
        let rows = self.client.query(sql).fetch_all::<R>().await?;
        Ok(rows)
    }

    /// Points of one measurement within `[from, to)`, oldest first.
    pub async fn points_between(
        &self,
        measurement: &str,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Vec<PointRow>> {
        let sql = format!(
            "SELECT ?fields FROM {} WHERE measurement = ? AND time >= fromUnixTimestamp64Milli(?) \
             AND time < fromUnixTimestamp64Milli(?) ORDER BY time",
            self.table
        );
        let rows = self
            .client
            .query(&sql)
            .bind(measurement)
            .bind(unix_millis(from))
            .bind(unix_millis(to))
            .fetch_all::<PointRow>()
            .await?;
        Ok(rows)
    }

    /// Health check - verify connection is still alive
    pub async fn health_check(&self) -> Result<()> {
        self.client.query("SELECT 1").fetch_one::<u8>().await?;
        Ok(())
    }

    /// Consumes the writer, dropping the client and its connection pool.
    ///
    /// Every write has already been flushed, so there is nothing left to send.
    pub fn close(self) {
        info!("Closing ClickHouse metrics writer");
        drop(self.client);
    }
}

fn unix_millis(time: OffsetDateTime) -> i64 {
    (time.unix_timestamp_nanos() / 1_000_000) as i64
}

/// Schema statements with the configured table name substituted.
fn schema_statements(table: &str) -> Vec<String> {
    SCHEMA
        .split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(|stmt| stmt.replace("{table}", table))
        .collect()
}
