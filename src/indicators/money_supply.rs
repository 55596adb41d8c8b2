use super::{finish, IndicatorAdapter};
use crate::core::date_parser::parse_native_date;
use crate::error::FetchError;
use crate::fetcher::RawTable;
use crate::models::{DataPoint, Series};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const ENDPOINT: &str = "macro_china_m2_yearly";

/// First synthesized date when the provider omits a date column.
const SYNTHETIC_START_YEAR: i32 = 2020;

/// M2 money supply. The provider's column names drift between releases, so
/// columns are found by keyword instead of exact name.
pub struct MoneySupplyAdapter;

impl MoneySupplyAdapter {
    fn is_date_column(name: &str) -> bool {
        name.to_lowercase().contains("date") || name.contains("日期")
    }

    fn is_value_column(name: &str) -> bool {
        name.to_lowercase().contains("m2")
    }

    /// Keyword match first, then the first column after the leading label
    /// column that is not the date column.
    fn value_column<'a>(table: &'a RawTable, date_column: Option<&str>) -> Option<&'a str> {
        table
            .find_column(|c| !Self::is_date_column(c) && Self::is_value_column(c))
            .or_else(|| {
                table
                    .columns()
                    .iter()
                    .skip(1)
                    .map(String::as_str)
                    .find(|c| Some(*c) != date_column)
            })
    }
}

#[async_trait]
impl IndicatorAdapter for MoneySupplyAdapter {
    fn endpoint(&self) -> &str {
        ENDPOINT
    }

    fn normalize(&self, table: &RawTable, now: DateTime<Utc>) -> Result<Series, FetchError> {
        let date_column = table.find_column(Self::is_date_column);
        let value_column = Self::value_column(table, date_column)
            .ok_or_else(|| FetchError::missing_column(ENDPOINT, "m2"))?;

        let points = table
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let date = match date_column {
                    Some(col) => row.get(col).and_then(parse_native_date)?,
                    None => synthetic_date(i)?,
                };
                let value = RawTable::number(row, value_column)?;
                Some(DataPoint::new(date, value))
            })
            .collect();

        finish(points, now, "m2")
    }
}

/// One date per year starting 2020-01-01, by row position.
fn synthetic_date(index: usize) -> Option<DateTime<Utc>> {
    let year = SYNTHETIC_START_YEAR.checked_add(i32::try_from(index).ok()?)?;
    let day = NaiveDate::from_ymd_opt(year, 1, 1)?;
    Some(day.and_time(NaiveTime::default()).and_utc())
}
