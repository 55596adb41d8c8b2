use serde::{Deserialize, Serialize};

use crate::models::RecentValues;

/// Newer-half mean must clear the older-half mean by this factor to count as a move.
const TREND_BAND: f64 = 0.02;
const TREND_LOOKBACK: usize = 7;
const MIN_TREND_POINTS: usize = 3;
const MIN_PREDICTION_POINTS: usize = 10;
const SHORT_WINDOW: usize = 7;
const LONG_WINDOW: usize = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Uptrend,
    Downtrend,
    Stable,
    InsufficientData,
    NoData,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub predicted: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Direction>,
    pub confidence: Confidence,
}

impl Prediction {
    fn unavailable() -> Self {
        Self { predicted: None, trend: None, confidence: Confidence::Low }
    }
}

/// Percent move from the previous observation to the latest one.
/// 0.0 with fewer than two values or a zero reference.
pub fn calculate_change_percent(values: &RecentValues) -> f64 {
    match values.most_recent(2) {
        [current, previous] if *previous != 0.0 => (current - previous) / previous * 100.0,
        _ => 0.0,
    }
}

/// Mean of the `window` most recent values.
pub fn calculate_ma(values: &RecentValues, window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let sum: f64 = values.most_recent(window).iter().sum();
    Some(sum / window as f64)
}

/// Classify the last (up to) seven observations by comparing the mean of the
/// older half against the newer half.
pub fn analyze_trend(values: &RecentValues) -> Trend {
    if values.len() < MIN_TREND_POINTS {
        return Trend::InsufficientData;
    }

    let mut recent = values.most_recent(TREND_LOOKBACK).to_vec();
    recent.reverse(); // oldest -> newest
    let (older, newer) = recent.split_at(recent.len() / 2);

    let avg_older = mean(older);
    let avg_newer = mean(newer);

    if avg_newer > avg_older * (1.0 + TREND_BAND) {
        Trend::Uptrend
    } else if avg_newer < avg_older * (1.0 - TREND_BAND) {
        Trend::Downtrend
    } else {
        Trend::Stable
    }
}

/// Extrapolate the short MA along its gap to the long MA. A heuristic, not a model.
pub fn simple_prediction(values: &RecentValues, days: u32) -> Prediction {
    if values.len() < MIN_PREDICTION_POINTS {
        return Prediction::unavailable();
    }

    let (ma7, ma30) = match (
        calculate_ma(values, SHORT_WINDOW),
        calculate_ma(values, LONG_WINDOW),
    ) {
        (Some(short), Some(long)) => (short, long),
        _ => return Prediction::unavailable(),
    };

    let growth_rate = (ma7 - ma30) / ma30 * 100.0;
    let predicted = ma7 * (1.0 + growth_rate / 100.0 * days as f64 / 30.0);

    Prediction {
        predicted: Some(predicted),
        trend: Some(if ma7 > ma30 { Direction::Up } else { Direction::Down }),
        confidence: if values.len() >= LONG_WINDOW { Confidence::Medium } else { Confidence::Low },
    }
}

fn mean(data: &[f64]) -> f64 {
    // Callers guarantee non-empty halves (at least 3 points split in two)
    data.iter().sum::<f64>() / data.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newest_first(v: &[f64]) -> RecentValues {
        RecentValues::from_newest_first(v.to_vec())
    }

    #[test]
    fn test_change_percent_guards() {
        assert_eq!(calculate_change_percent(&newest_first(&[])), 0.0);
        assert_eq!(calculate_change_percent(&newest_first(&[3.0])), 0.0);
        assert_eq!(calculate_change_percent(&newest_first(&[10.0, 0.0])), 0.0);
    }

    #[test]
    fn test_change_percent_uses_two_latest() {
        let change = calculate_change_percent(&newest_first(&[5.0, 4.5, 100.0]));
        assert!((change - 11.111111111).abs() < 1e-6);
    }

    #[test]
    fn test_ma() {
        let values = newest_first(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(calculate_ma(&values, 7), Some(4.0));
        assert_eq!(calculate_ma(&values, 8), None);
        // Most recent three: 1, 2, 3
        assert_eq!(calculate_ma(&values, 3), Some(2.0));
    }

    #[test]
    fn test_ma_from_chronological_input() {
        let values = RecentValues::from_chronological(vec![10.0, 20.0, 30.0, 40.0]);
        assert_eq!(calculate_ma(&values, 2), Some(35.0));
    }

    #[test]
    fn test_trend_insufficient() {
        assert_eq!(analyze_trend(&newest_first(&[1.0, 2.0])), Trend::InsufficientData);
    }

    #[test]
    fn test_trend_band_boundary() {
        // Older half [100, 100], newer half [x, x]
        let at = |x: f64| analyze_trend(&newest_first(&[x, x, 100.0, 100.0]));
        assert_eq!(at(102.0), Trend::Stable);
        assert_eq!(at(101.9999), Trend::Stable);
        assert_eq!(at(102.01), Trend::Uptrend);
        assert_eq!(at(98.0), Trend::Stable);
        assert_eq!(at(97.99), Trend::Downtrend);
    }

    #[test]
    fn test_trend_uses_last_seven_with_floor_split() {
        // Chronological: 1000 (ignored), then 10, 10, 10 | 11, 11, 11, 11
        let values = RecentValues::from_chronological(vec![
            1000.0, 10.0, 10.0, 10.0, 11.0, 11.0, 11.0, 11.0,
        ]);
        assert_eq!(analyze_trend(&values), Trend::Uptrend);

        // Odd length puts the middle point in the newer half
        let values = RecentValues::from_chronological(vec![10.0, 10.0, 10.0]);
        assert_eq!(analyze_trend(&values), Trend::Stable);
    }

    #[test]
    fn test_prediction_needs_history() {
        let short = newest_first(&[1.0; 9]);
        assert_eq!(simple_prediction(&short, 7), Prediction::unavailable());

        // Enough for the gate but not for ma30
        let mid = newest_first(&[1.0; 20]);
        assert_eq!(simple_prediction(&mid, 7), Prediction::unavailable());
    }

    #[test]
    fn test_prediction_extrapolates() {
        // 7 most recent at 110, next 23 at 100 -> ma7 = 110, ma30 = 102.333..
        let mut v = vec![110.0; 7];
        v.extend(vec![100.0; 23]);
        let p = simple_prediction(&newest_first(&v), 30);

        let ma30 = (110.0 * 7.0 + 100.0 * 23.0) / 30.0;
        let growth = (110.0 - ma30) / ma30 * 100.0;
        let expected = 110.0 * (1.0 + growth / 100.0);

        assert!((p.predicted.unwrap() - expected).abs() < 1e-9);
        assert_eq!(p.trend, Some(Direction::Up));
        assert_eq!(p.confidence, Confidence::Medium);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Trend::InsufficientData).unwrap(), "\"insufficient_data\"");
        assert_eq!(serde_json::to_string(&Trend::NoData).unwrap(), "\"no_data\"");
        let low = serde_json::to_value(Prediction::unavailable()).unwrap();
        assert_eq!(low, serde_json::json!({ "predicted": null, "confidence": "low" }));
    }
}
