use super::{finish, require_column, IndicatorAdapter};
use crate::core::date_parser::parse_native_date;
use crate::error::FetchError;
use crate::fetcher::RawTable;
use crate::models::{DataPoint, Series};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

const ENDPOINT: &str = "macro_china_lpr";
const DATE_COLUMN: &str = "TRADE_DATE";
const VALUE_COLUMN: &str = "LPR1Y";

/// One-year Loan Prime Rate, keyed on the provider's trade date.
pub struct LprAdapter;

#[async_trait]
impl IndicatorAdapter for LprAdapter {
    fn endpoint(&self) -> &str {
        ENDPOINT
    }

    fn normalize(&self, table: &RawTable, now: DateTime<Utc>) -> Result<Series, FetchError> {
        require_column(table, ENDPOINT, DATE_COLUMN)?;
        require_column(table, ENDPOINT, VALUE_COLUMN)?;

        let points = table
            .rows()
            .iter()
            .filter_map(|row| {
                let date = row.get(DATE_COLUMN).and_then(parse_native_date)?;
                let value = RawTable::number(row, VALUE_COLUMN)?;
                Some(DataPoint::new(date, value))
            })
            .collect();

        finish(points, now, "rate")
    }
}
