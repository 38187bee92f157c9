//! This module provides the main entry point: an [`AirQuality`] dataset loaded once from a
//! [`DataSource`] and queried with [`FilterCriteria`].

use crate::data_source::csv_source::CsvSource;
use crate::data_source::schema::normalize_frame;
use crate::data_source::{DataSource, FrameSource};
use crate::frame::AirQualityLazyFrame;
use crate::report::DashboardReport;
use crate::types::criteria::FilterCriteria;
use crate::types::traits::types::StartEndDate;
use crate::AirQualityError;
use log::{debug, info};
use polars::prelude::{DataFrame, IntoLazy};
use std::path::PathBuf;

/// An air-quality dataset, loaded and normalized once, then read-only.
///
/// Every query starts from the same in-memory table; nothing a query does changes it.
/// Cloning is cheap since polars columns are reference counted.
///
/// # Examples
///
/// ```no_run
/// use air_quality::{AirQuality, FilterCriteria, Measure, GroupValue};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let air_quality = AirQuality::from_csv("all_data.csv")?;
///
/// let criteria = FilterCriteria::from_dates("2014-01-01", "2014-12-31", Some("Dongsi"))?;
/// let yearly = air_quality.filter(&criteria).yearly_pollutant_means()?;
/// println!("{:?}", yearly.mean(&GroupValue::Year(2014), Measure::Pm25));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AirQuality {
    data: DataFrame,
}

impl AirQuality {
    /// Loads the dataset from `source` and normalizes its columns.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::DataSource`] if the source cannot be read or lacks the
    /// `date`, `hour` or `station` columns.
    pub fn new(source: impl DataSource) -> Result<Self, AirQualityError> {
        info!("Loading air-quality data from {}", source.describe());
        let data = normalize_frame(source.load()?)?;
        info!(
            "Loaded {} observations with {} columns",
            data.height(),
            data.width()
        );
        Ok(Self { data })
    }

    /// Loads a CSV file without caching.
    pub fn from_csv(path: impl Into<PathBuf>) -> Result<Self, AirQualityError> {
        Self::new(CsvSource::new(path))
    }

    /// Uses a frame that is already in memory.
    pub fn from_frame(frame: DataFrame) -> Result<Self, AirQualityError> {
        Self::new(FrameSource::new(frame))
    }

    /// The normalized table.
    pub fn frame(&self) -> &DataFrame {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// All observations as a lazy frame.
    pub fn data(&self) -> AirQualityLazyFrame {
        AirQualityLazyFrame::new(self.data.clone().lazy())
    }

    /// Observations matching `criteria`, in their original order.
    pub fn filter(&self, criteria: &FilterCriteria) -> AirQualityLazyFrame {
        debug!("Filtering {} observations by {}", self.data.height(), criteria);
        self.data().apply(criteria)
    }

    /// Station ids present in the dataset, sorted. These are the choices of a station
    /// selector besides "All".
    pub fn stations(&self) -> Result<Vec<String>, AirQualityError> {
        self.data().stations()
    }

    /// First and last observation date, `None` for an empty dataset.
    pub fn date_bounds(&self) -> Result<Option<StartEndDate>, AirQualityError> {
        self.data().date_bounds()
    }

    /// Criteria covering the whole dataset, the initial state of a date picker.
    pub fn default_criteria(&self) -> Result<Option<FilterCriteria>, AirQualityError> {
        Ok(self.date_bounds()?.map(FilterCriteria::from))
    }

    /// Every dashboard aggregate for `criteria`.
    pub fn report(&self, criteria: &FilterCriteria) -> Result<DashboardReport, AirQualityError> {
        DashboardReport::build(self, criteria)
    }
}
