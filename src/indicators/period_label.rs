use super::{finish, require_column, IndicatorAdapter};
use crate::core::date_parser::parse_period_label;
use crate::error::FetchError;
use crate::fetcher::RawTable;
use crate::models::{DataPoint, Series};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Indicators published against Chinese period labels ("2024年第1-4季度", "2024年03月份").
/// GDP, CPI, PMI and PPI differ only in endpoint and column names.
pub struct PeriodLabelAdapter {
    code: &'static str,
    endpoint: &'static str,
    date_column: &'static str,
    value_column: &'static str,
}

impl PeriodLabelAdapter {
    pub fn new(
        code: &'static str,
        endpoint: &'static str,
        date_column: &'static str,
        value_column: &'static str,
    ) -> Self {
        Self { code, endpoint, date_column, value_column }
    }
}

#[async_trait]
impl IndicatorAdapter for PeriodLabelAdapter {
    fn endpoint(&self) -> &str {
        self.endpoint
    }

    fn normalize(&self, table: &RawTable, now: DateTime<Utc>) -> Result<Series, FetchError> {
        require_column(table, self.endpoint, self.date_column)?;
        require_column(table, self.endpoint, self.value_column)?;

        let points = table
            .rows()
            .iter()
            .filter_map(|row| {
                let day = RawTable::text(row, self.date_column).and_then(parse_period_label)?;
                let value = RawTable::number(row, self.value_column)?;
                Some(DataPoint::on_day(day, value))
            })
            .collect();

        finish(points, now, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::registry::IndicatorKind;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_gdp_rows() {
        let table = RawTable::from_json(&json!([
            { "季度": "2023年第1-4季度", "国内生产总值-绝对值": 1260582.1, "国内生产总值-同比增长": 5.2 },
            { "季度": "2024年第1-3季度", "国内生产总值-绝对值": 949746.4, "国内生产总值-同比增长": 4.8 },
            { "季度": "2024年第1-4季度", "国内生产总值-绝对值": 1349083.5, "国内生产总值-同比增长": 5.0 }
        ]))
        .unwrap();

        let series = IndicatorKind::Gdp.adapter().normalize(&table, now()).unwrap();
        let values: Vec<f64> = series.points().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![5.0, 4.8, 5.2]);
        assert_eq!(series.latest().unwrap().date.date_naive().to_string(), "2024-12-31");
    }

    #[test]
    fn test_bad_rows_dropped_and_future_filtered() {
        let table = RawTable::from_json(&json!([
            { "月份": "2025年02月份", "全国-同比增长": 0.5 },   // After now
            { "月份": "2024年12月份", "全国-同比增长": 0.1 },
            { "月份": "2024年11月份", "全国-同比增长": "--" },  // Non-numeric
            { "月份": "garbage", "全国-同比增长": 0.3 },        // Unparseable label
            { "月份": "2024年10月份", "全国-同比增长": "0.3" }
        ]))
        .unwrap();

        let series = IndicatorKind::Cpi.adapter().normalize(&table, now()).unwrap();
        let values: Vec<f64> = series.points().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.1, 0.3]);
    }

    #[test]
    fn test_missing_value_column() {
        let table = RawTable::from_json(&json!([{ "月份": "2024年12月份", "制造业-同比增长": 1.0 }])).unwrap();
        let err = IndicatorKind::Pmi.adapter().normalize(&table, now()).unwrap_err();
        assert_eq!(err, FetchError::missing_column("macro_china_pmi", "制造业-指数"));
    }

    #[test]
    fn test_all_rows_invalid() {
        let table = RawTable::from_json(&json!([{ "月份": "n/a", "当月同比增长": 1.0 }])).unwrap();
        let err = IndicatorKind::Ppi.adapter().normalize(&table, now()).unwrap_err();
        assert_eq!(err, FetchError::NoObservations("ppi".to_string()));
    }
}
