use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

/// One normalized observation. Serialized as `{"date": <ISO-8601>, "value": <f64>}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DataPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: DateTime<Utc>, value: f64) -> Self {
        Self { date, value }
    }

    /// Midnight UTC of a calendar date.
    pub fn on_day(day: NaiveDate, value: f64) -> Self {
        Self { date: day.and_time(chrono::NaiveTime::default()).and_utc(), value }
    }
}

/// Normalized series for one indicator.
///
/// Always newest-first with unique dates and no NaN values. The only way to
/// build one is through [`Series::from_points`], which enforces that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<DataPoint>", into = "Vec<DataPoint>")]
pub struct Series {
    points: Vec<DataPoint>,
}

impl Series {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_points(mut points: Vec<DataPoint>) -> Self {
        points.retain(|p| !p.value.is_nan());
        // Stable sort keeps the provider's first row when dates collide
        points.sort_by(|a, b| b.date.cmp(&a.date));
        let mut seen = HashSet::new();
        points.retain(|p| seen.insert(p.date));
        Self { points }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&DataPoint> {
        self.points.first()
    }

    pub fn recent_values(&self) -> RecentValues {
        RecentValues::from_newest_first(self.points.iter().map(|p| p.value).collect())
    }

    /// Inclusive calendar-date window; either bound may be open.
    pub fn between(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Series {
        let points = self
            .points
            .iter()
            .filter(|p| {
                let day = p.date.date_naive();
                start.map_or(true, |s| day >= s) && end.map_or(true, |e| day <= e)
            })
            .cloned()
            .collect();
        Series { points }
    }
}

impl From<Vec<DataPoint>> for Series {
    fn from(points: Vec<DataPoint>) -> Self {
        Series::from_points(points)
    }
}

impl From<Series> for Vec<DataPoint> {
    fn from(series: Series) -> Self {
        series.points
    }
}

/// Value list handed to the analytics helpers, most recent value first.
///
/// Callers holding oldest-first data go through [`RecentValues::from_chronological`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentValues(Vec<f64>);

impl RecentValues {
    pub fn from_newest_first(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn from_chronological(mut values: Vec<f64>) -> Self {
        values.reverse();
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The `n` most recent values (fewer if unavailable), newest first.
    pub fn most_recent(&self, n: usize) -> &[f64] {
        &self.0[..n.min(self.0.len())]
    }

    pub fn latest(&self) -> Option<f64> {
        self.0.first().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
