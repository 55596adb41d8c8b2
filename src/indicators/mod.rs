use crate::error::FetchError;
use crate::fetcher::{DataSource, RawTable};
use crate::models::{DataPoint, Series};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod registry;
pub mod period_label;
pub mod money_supply;
pub mod lpr;
pub mod exchange;

/// Fetches one provider table and normalizes it into a [`Series`].
#[async_trait]
pub trait IndicatorAdapter: Send + Sync {
    /// Provider endpoint backing this indicator (e.g., "macro_china_gdp")
    fn endpoint(&self) -> &str;

    /// Turn a raw table into a series, dropping rows dated after `now`.
    fn normalize(&self, table: &RawTable, now: DateTime<Utc>) -> Result<Series, FetchError>;

    async fn fetch(&self, source: &dyn DataSource, now: DateTime<Utc>) -> Result<Series, FetchError> {
        let table = source
            .fetch_table(self.endpoint())
            .await
            .map_err(|e| FetchError::Provider(format!("{:#}", e)))?;

        if table.is_empty() {
            return Err(FetchError::EmptyTable(self.endpoint().to_string()));
        }

        self.normalize(&table, now)
    }
}

/// Shared tail of every adapter: drop forward-dated rows, sort newest-first,
/// and refuse to hand back an empty series.
pub(crate) fn finish(points: Vec<DataPoint>, now: DateTime<Utc>, code: &str) -> Result<Series, FetchError> {
    let points: Vec<DataPoint> = points.into_iter().filter(|p| p.date <= now).collect();
    let series = Series::from_points(points);
    if series.is_empty() {
        return Err(FetchError::NoObservations(code.to_string()));
    }
    Ok(series)
}

/// Require a column, naming the endpoint when it is absent.
pub(crate) fn require_column(table: &RawTable, endpoint: &str, column: &str) -> Result<(), FetchError> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(FetchError::missing_column(endpoint, column))
    }
}
