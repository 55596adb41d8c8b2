//! On-disk snapshot cache, one JSON file per indicator code.
//!
//! The cache never expires anything on its own. Freshness is the caller's call
//! through the orchestrator's `force_update` flag.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Series;

pub struct SeriesCache {
    dir: PathBuf,
}

impl SeriesCache {
    /// Open (and create, if absent) the cache directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{}_cache.json", code))
    }

    /// Load a snapshot, reporting why it could not be read.
    /// A missing or zero-length file is `Ok(None)`.
    pub fn try_load(&self, code: &str) -> Result<Option<Series>> {
        let path = self.path_for(code);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let series: Series = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed cache file {}", path.display()))?;
        Ok(Some(series))
    }

    /// Load a snapshot; unreadable files count as a miss.
    pub fn load(&self, code: &str) -> Option<Series> {
        match self.try_load(code) {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(code, error = %format!("{:#}", e), "Cache: ignoring unreadable snapshot");
                None
            }
        }
    }

    /// Overwrite the snapshot for `code`.
    pub fn save(&self, code: &str, series: &Series) -> Result<()> {
        let path = self.path_for(code);
        let body = serde_json::to_string(series)?;
        fs::write(&path, body)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(code, points = series.len(), "Cache: snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataPoint;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample() -> Series {
        Series::from_points(vec![
            DataPoint::on_day(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(), 5.0),
            DataPoint::on_day(NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(), 0.1 + 0.2),
            DataPoint::new(
                Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap(),
                std::f64::consts::PI,
            ),
        ])
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::open(dir.path()).unwrap();
        let series = sample();

        cache.save("gdp", &series).unwrap();
        let loaded = cache.load("gdp").unwrap();

        assert_eq!(loaded, series);
        assert_eq!(loaded.points()[1].value.to_bits(), (0.1f64 + 0.2).to_bits());
    }

    #[test]
    fn test_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::open(dir.path()).unwrap();
        cache.save("cpi", &sample()).unwrap();

        let path = dir.path().join("cpi_cache.json");
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0]["date"].as_str().unwrap().starts_with("2024-12-31T00:00:00"));
        assert_eq!(records[0]["value"].as_f64(), Some(5.0));
    }

    #[test]
    fn test_missing_empty_and_corrupt_are_misses() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::open(dir.path()).unwrap();

        assert!(cache.load("pmi").is_none());

        std::fs::write(cache.path_for("pmi"), "").unwrap();
        assert!(cache.load("pmi").is_none());
        assert!(cache.try_load("pmi").unwrap().is_none());

        std::fs::write(cache.path_for("pmi"), "{not json").unwrap();
        assert!(cache.load("pmi").is_none());
        assert!(cache.try_load("pmi").is_err());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::open(dir.path()).unwrap();
        cache.save("m2", &sample()).unwrap();

        let replacement = Series::from_points(vec![DataPoint::on_day(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            1.0,
        )]);
        cache.save("m2", &replacement).unwrap();
        assert_eq!(cache.load("m2").unwrap(), replacement);
    }

    #[test]
    fn test_open_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("cache");
        let cache = SeriesCache::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(cache.dir(), nested.as_path());
    }
}
