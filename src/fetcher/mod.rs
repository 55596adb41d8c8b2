use async_trait::async_trait;
use anyhow::Result;

pub mod table;
pub mod aktools;

pub use table::RawTable;

/// A provider of named macroeconomic tables.
#[async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_table(&self, endpoint: &str) -> Result<RawTable>;
}
