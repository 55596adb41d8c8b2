pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod fetcher;
pub mod indicators;
pub mod logging;
pub mod models;

use std::sync::Arc;

use anyhow::Result;

use crate::analysis::IndicatorCalculator;
use crate::config::Config;
use crate::core::orchestrator::DataFetcher;
use crate::fetcher::aktools::AkToolsSource;

/// Process-wide services, built once at startup and passed by handle.
pub struct AppContext {
    pub fetcher: Arc<DataFetcher>,
    pub calculator: IndicatorCalculator,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let source = Arc::new(AkToolsSource::new(&config.provider_base_url));
        let fetcher = Arc::new(DataFetcher::new(source, config.cache_dir.clone())?);
        let calculator = IndicatorCalculator::new(fetcher.clone());

        tracing::info!(
            cache_dir = %config.cache_dir.display(),
            provider = %config.provider_base_url,
            "Services initialized"
        );
        Ok(Self { fetcher, calculator })
    }
}
