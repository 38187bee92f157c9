use crate::data_source::error::DataSourceError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirQualityError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("Could not resolve the given date input")]
    DateParsingError,

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Failed to serialize report")]
    Serialization(#[from] serde_json::Error),
}
