use thiserror::Error;

/// Why a fetch produced no series.
///
/// `DataFetcher::fetch` collapses every variant into an empty series; callers
/// that care about the cause use `DataFetcher::try_fetch`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("unknown indicator '{0}'")]
    UnknownIndicator(String),

    #[error("provider call failed: {0}")]
    Provider(String),

    #[error("provider returned an empty table for '{0}'")]
    EmptyTable(String),

    #[error("column '{column}' missing from '{endpoint}'")]
    MissingColumn { endpoint: String, column: String },

    #[error("no usable observations for '{0}'")]
    NoObservations(String),
}

impl FetchError {
    pub fn missing_column(endpoint: &str, column: &str) -> Self {
        FetchError::MissingColumn {
            endpoint: endpoint.to_string(),
            column: column.to_string(),
        }
    }
}
