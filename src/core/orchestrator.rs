use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use crate::core::cache::SeriesCache;
use crate::error::FetchError;
use crate::fetcher::DataSource;
use crate::indicators::registry::{IndicatorDescriptor, IndicatorKind, Registry};
use crate::models::Series;

/// Resolves indicator codes to normalized series, reading through the cache.
pub struct DataFetcher {
    source: Arc<dyn DataSource>,
    cache: SeriesCache,
}

impl DataFetcher {
    /// Build the fetcher; the cache directory is created if absent.
    pub fn new(source: Arc<dyn DataSource>, cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache = SeriesCache::open(cache_dir)?;
        Ok(Self { source, cache })
    }

    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    pub fn get_available_indicators(&self) -> &'static [IndicatorDescriptor] {
        Registry::get_available_indicators()
    }

    pub fn get_indicator(&self, code: &str) -> Option<&'static IndicatorDescriptor> {
        Registry::get_metadata(code)
    }

    /// Normalized series for `code`, or an empty one if anything goes wrong.
    pub async fn fetch(&self, code: &str, force_update: bool) -> Series {
        match self.try_fetch(code, force_update).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(code, reason = %e, "Orchestrator: returning empty series");
                Series::empty()
            }
        }
    }

    /// Same as [`DataFetcher::fetch`], but says why the series is missing.
    pub async fn try_fetch(&self, code: &str, force_update: bool) -> Result<Series, FetchError> {
        // Only catalog codes ever reach the cache path
        let kind = IndicatorKind::from_code(code)
            .ok_or_else(|| FetchError::UnknownIndicator(code.to_string()))?;
        let code = kind.code();

        if !force_update {
            if let Some(cached) = self.cache.load(code) {
                if !cached.is_empty() {
                    tracing::debug!(code, points = cached.len(), "Orchestrator: cache hit");
                    return Ok(cached);
                }
            }
        }

        tracing::info!(code, source = self.source.name(), force_update, "Orchestrator: fetching from provider");
        let series = kind.adapter().fetch(self.source.as_ref(), Utc::now()).await?;

        if let Err(e) = self.cache.save(code, &series) {
            tracing::warn!(code, error = %format!("{:#}", e), "Orchestrator: cache write failed");
        }

        tracing::info!(code, points = series.len(), "Orchestrator: fetch complete");
        Ok(series)
    }

    /// Forced refresh of every catalog indicator, in catalog order.
    /// Returns (succeeded, failed).
    pub async fn refresh_all(&self) -> (usize, usize) {
        let mut success = 0;
        let mut failed = 0;

        for indicator in self.get_available_indicators() {
            match self.try_fetch(&indicator.code, true).await {
                Ok(series) => {
                    tracing::info!(code = %indicator.code, points = series.len(), "Refresh: ok");
                    success += 1;
                }
                Err(e) => {
                    tracing::warn!(code = %indicator.code, reason = %e, "Refresh: failed");
                    failed += 1;
                }
            }
        }

        (success, failed)
    }
}
