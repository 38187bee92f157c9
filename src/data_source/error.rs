use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Input file '{0}' is not accessible")]
    InputMetadataRead(PathBuf, #[source] std::io::Error),

    #[error("Required column '{0}' not found in the dataset")]
    MissingColumn(String),

    #[error("Column 'date' has type {0}, expected a date, datetime or string column")]
    UnsupportedDateType(String),

    #[error("Failed to parse the 'date' column")]
    DateParse(#[source] PolarsError),

    #[error("Failed to resolve cache directory")]
    CacheDirResolution(#[source] std::io::Error),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read metadata for cache file '{0}'")]
    CacheMetadataRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to open parquet cache file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("I/O error writing parquet cache file '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing parquet cache file '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed to read parquet cache file '{0}'")]
    ParquetRead(PathBuf, #[source] PolarsError),

    #[error("Failed to write CSV export")]
    CsvWrite(#[source] PolarsError),

    #[error("I/O error writing CSV export '{0}'")]
    ExportIo(PathBuf, #[source] std::io::Error),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
