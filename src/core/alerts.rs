use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::orchestrator::DataFetcher;

// Alert Types
// 1. above:  latest > threshold
// 2. below:  latest < threshold
// 3. equals: |latest - threshold| < EQUALS_TOLERANCE

pub const EQUALS_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    Above,
    Below,
    Equals,
}

impl AlertCondition {
    pub fn is_met(&self, current: f64, threshold: f64) -> bool {
        match self {
            AlertCondition::Above => current > threshold,
            AlertCondition::Below => current < threshold,
            AlertCondition::Equals => (current - threshold).abs() < EQUALS_TOLERANCE,
        }
    }
}

impl FromStr for AlertCondition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "above" => Ok(AlertCondition::Above),
            "below" => Ok(AlertCondition::Below),
            "equals" => Ok(AlertCondition::Equals),
            other => Err(anyhow!("Unknown alert condition '{}' (expected above|below|equals)", other)),
        }
    }
}

impl fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertCondition::Above => "above",
            AlertCondition::Below => "below",
            AlertCondition::Equals => "equals",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub indicator_code: String,
    pub condition: AlertCondition,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertTrigger {
    pub indicator_code: String,
    pub condition: AlertCondition,
    pub threshold: f64,
    pub current_value: f64,
    pub triggered_at: DateTime<Utc>,
}

/// Evaluate one rule against a freshly fetched series.
pub async fn check_alert(fetcher: &DataFetcher, rule: &AlertRule) -> Option<AlertTrigger> {
    let series = fetcher.fetch(&rule.indicator_code, true).await;
    let current_value = series.latest()?.value;

    if !rule.condition.is_met(current_value, rule.threshold) {
        return None;
    }

    tracing::info!(
        code = %rule.indicator_code,
        condition = %rule.condition,
        threshold = rule.threshold,
        current_value,
        "Alert triggered"
    );

    Some(AlertTrigger {
        indicator_code: rule.indicator_code.clone(),
        condition: rule.condition,
        threshold: rule.threshold,
        current_value,
        triggered_at: Utc::now(),
    })
}

/// Evaluate rules in order, returning the ones that fired.
pub async fn check_alerts(fetcher: &DataFetcher, rules: &[AlertRule]) -> Vec<AlertTrigger> {
    let mut triggered = Vec::new();
    for rule in rules {
        if let Some(trigger) = check_alert(fetcher, rule).await {
            triggered.push(trigger);
        }
    }
    triggered
}
