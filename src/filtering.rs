use crate::data_source::schema::{DATE_COLUMN, STATION_COLUMN};
use crate::types::criteria::FilterCriteria;
use chrono::NaiveDate;
use polars::prelude::{col, lit, DataType, LazyFrame};

pub trait AirQualityFrameFilterExt {
    /// Keeps rows whose `date` lies in `start..=end`.
    /// Assumes the 'date' column is a polars `Date`; rows with a null date are dropped.
    /// An inverted range keeps nothing.
    fn filter_date_range(self, start: NaiveDate, end: NaiveDate) -> LazyFrame;

    /// Keeps rows recorded at `station`; `None` keeps every row.
    /// A station id that does not occur simply yields an empty frame.
    fn filter_station(self, station: Option<&str>) -> LazyFrame;

    /// Applies both predicates of `criteria`. Row order is preserved.
    fn filter_criteria(self, criteria: &FilterCriteria) -> LazyFrame;
}

impl AirQualityFrameFilterExt for LazyFrame {
    fn filter_date_range(self, start: NaiveDate, end: NaiveDate) -> LazyFrame {
        self.filter(
            col(DATE_COLUMN)
                .cast(DataType::Date) // Ensure correct type for comparison
                .gt_eq(lit(start))
                .and(col(DATE_COLUMN).cast(DataType::Date).lt_eq(lit(end))),
        )
    }

    fn filter_station(self, station: Option<&str>) -> LazyFrame {
        match station {
            Some(station) => self.filter(col(STATION_COLUMN).eq(lit(station.to_string()))),
            None => self,
        }
    }

    fn filter_criteria(self, criteria: &FilterCriteria) -> LazyFrame {
        self.filter_date_range(criteria.date_start, criteria.date_end)
            .filter_station(criteria.station.as_deref())
    }
}
