//! Filter and aggregate hourly air-quality observations from monitoring stations.
//!
//! Load the dataset once with [`AirQuality::new`] (usually from a [`CsvSource`]), pick rows
//! with a [`FilterCriteria`], then summarize the subset through [`AirQualityLazyFrame`] or
//! all at once with [`DashboardReport`].
//!
//! ```no_run
//! use air_quality::{AirQuality, CsvSource, FilterCriteria, Measure};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let air_quality = AirQuality::new(CsvSource::with_default_cache("all_data.csv")?)?;
//! let criteria = FilterCriteria::from_dates("2014-01", "2014-12", Some("All"))?;
//!
//! for row in air_quality.filter(&criteria).station_rain_co()?.ranked_by(Measure::Rain) {
//!     println!("{}: {:?}", row.key, row.mean(Measure::Rain));
//! }
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod air_quality;
mod data_source;
mod error;
mod filtering;
mod frame;
mod report;
#[cfg(test)]
mod test_fixtures;
mod types;
mod utils;

pub use air_quality::AirQuality;
pub use error::AirQualityError;
pub use frame::AirQualityLazyFrame;
pub use report::{DashboardReport, WEATHER_RELATIONS};

pub use aggregate::{Aggregate, AggregateRow, CategoryCounts, GroupKey, GroupValue, ScatterSeries};
pub use filtering::AirQualityFrameFilterExt;

pub use data_source::csv_source::CsvSource;
pub use data_source::error::DataSourceError;
pub use data_source::export::{export_csv, write_csv};
pub use data_source::schema::{
    normalize_frame, CATEGORY_COLUMN, DATE_COLUMN, HOUR_COLUMN, STATION_COLUMN, YEAR_COLUMN,
};
pub use data_source::{DataSource, FrameSource};

pub use types::category::{categorize, AirQualityCategory};
pub use types::criteria::{FilterCriteria, ALL_STATIONS};
pub use types::measure::Measure;
pub use types::record::Record;

pub use types::traits::any_date::AnyDate;
pub use types::traits::types::{Month, StartEndDate, Year};

pub use utils::get_cache_dir;
