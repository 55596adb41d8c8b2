use super::{require_column, IndicatorAdapter};
use crate::error::FetchError;
use crate::fetcher::RawTable;
use crate::models::{DataPoint, Series};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

const ENDPOINT: &str = "fx_spot_quote";
const PAIR_COLUMN: &str = "货币对";
const QUOTE_COLUMN: &str = "买报价";

/// RMB spot quote. The provider only has a snapshot, so this yields a single
/// observation stamped at fetch time.
pub struct ExchangeRateAdapter;

impl ExchangeRateAdapter {
    fn find_row<'a>(table: &'a RawTable, needles: &[&str]) -> Option<&'a Map<String, Value>> {
        table.rows().iter().find(|row| {
            RawTable::text(row, PAIR_COLUMN)
                .map(|pair| {
                    let pair = pair.to_uppercase();
                    needles.iter().any(|n| pair.contains(n))
                })
                .unwrap_or(false)
        })
    }
}

#[async_trait]
impl IndicatorAdapter for ExchangeRateAdapter {
    fn endpoint(&self) -> &str {
        ENDPOINT
    }

    fn normalize(&self, table: &RawTable, now: DateTime<Utc>) -> Result<Series, FetchError> {
        require_column(table, ENDPOINT, PAIR_COLUMN)?;
        require_column(table, ENDPOINT, QUOTE_COLUMN)?;

        let row = Self::find_row(table, &["CNY", "RMB"])
            .or_else(|| Self::find_row(table, &["USD"]))
            .ok_or_else(|| FetchError::NoObservations("exchange".to_string()))?;

        let value = RawTable::number(row, QUOTE_COLUMN)
            .ok_or_else(|| FetchError::NoObservations("exchange".to_string()))?;

        Ok(Series::from_points(vec![DataPoint::new(now, value)]))
    }
}
