//! Where the dataset comes from and where filtered subsets go.

pub mod csv_source;
pub mod error;
pub mod export;
pub mod schema;

use crate::data_source::error::DataSourceError;
use polars::prelude::DataFrame;

/// A read-only provider of the raw air-quality table.
///
/// [`crate::AirQuality::new`] calls [`DataSource::load`] exactly once and keeps the
/// normalized result for the rest of the session, so implementations do not need to memoize.
pub trait DataSource: Send + Sync {
    /// Produces the raw frame. Column types are fixed up afterwards by
    /// [`schema::normalize_frame`].
    fn load(&self) -> Result<DataFrame, DataSourceError>;

    /// Short human-readable description for log messages.
    fn describe(&self) -> String;
}

/// A dataset that is already in memory.
#[derive(Debug, Clone)]
pub struct FrameSource {
    frame: DataFrame,
}

impl FrameSource {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }
}

impl DataSource for FrameSource {
    fn load(&self) -> Result<DataFrame, DataSourceError> {
        Ok(self.frame.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory frame with {} rows", self.frame.height())
    }
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn load(&self) -> Result<DataFrame, DataSourceError> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn load(&self) -> Result<DataFrame, DataSourceError> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
