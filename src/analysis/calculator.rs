use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::statistics::calculate_volatility;
use crate::analysis::technicals::{
    analyze_trend, calculate_change_percent, calculate_ma, simple_prediction, Prediction, Trend,
};
use crate::core::orchestrator::DataFetcher;
use crate::models::DataPoint;

const PREDICTION_DAYS: u32 = 7;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendSummary {
    pub indicator_code: String,
    pub trend: Trend,
    pub change_percent: f64,
    pub ma_7: Option<f64>,
    pub ma_30: Option<f64>,
    pub prediction: Option<Prediction>,
    pub volatility: f64,
    pub latest_value: Option<f64>,
}

impl TrendSummary {
    fn no_data(code: &str) -> Self {
        Self {
            indicator_code: code.to_string(),
            trend: Trend::NoData,
            change_percent: 0.0,
            ma_7: None,
            ma_30: None,
            prediction: None,
            volatility: 0.0,
            latest_value: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComparisonEntry {
    pub data: Vec<DataPoint>,
    pub latest_value: f64,
}

/// Derived analytics over the fetcher's series. Never mutates what it reads.
pub struct IndicatorCalculator {
    fetcher: Arc<DataFetcher>,
}

impl IndicatorCalculator {
    pub fn new(fetcher: Arc<DataFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn get_indicator_trend(&self, code: &str) -> TrendSummary {
        let series = self.fetcher.fetch(code, false).await;
        if series.is_empty() {
            return TrendSummary::no_data(code);
        }

        let values = series.recent_values();

        TrendSummary {
            indicator_code: code.to_string(),
            trend: analyze_trend(&values),
            change_percent: calculate_change_percent(&values),
            ma_7: calculate_ma(&values, 7),
            ma_30: calculate_ma(&values, 30),
            prediction: Some(simple_prediction(&values, PREDICTION_DAYS)),
            volatility: calculate_volatility(&values),
            latest_value: values.latest(),
        }
    }

    /// Side-by-side series over an optional inclusive date range.
    /// Codes with nothing in range are left out.
    pub async fn compare_indicators(
        &self,
        codes: &[String],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BTreeMap<String, ComparisonEntry> {
        let mut results = BTreeMap::new();

        for code in codes {
            let series = self.fetcher.fetch(code, false).await.between(start_date, end_date);
            let Some(latest) = series.latest().map(|p| p.value) else {
                tracing::debug!(code = %code, "Compare: no data in range, skipping");
                continue;
            };

            results.insert(
                code.clone(),
                ComparisonEntry {
                    data: series.points().to_vec(),
                    latest_value: latest,
                },
            );
        }

        results
    }
}
