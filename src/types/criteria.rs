//! The user-facing filter: a date range plus an optional station.

use crate::types::record::Record;
use crate::types::traits::any_date::AnyDate;
use crate::types::traits::types::StartEndDate;
use crate::AirQualityError;
use bon::Builder;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Station selector value meaning "every station".
pub const ALL_STATIONS: &str = "All";

/// Which records to keep: those dated within `date_start..=date_end` and, when `station` is
/// set, recorded at that station.
///
/// An inverted range (`date_start > date_end`) is allowed and simply matches nothing.
///
/// # Example
///
/// ```rust
/// use air_quality::FilterCriteria;
/// use chrono::NaiveDate;
///
/// let criteria = FilterCriteria::builder()
///     .date_start(NaiveDate::from_ymd_opt(2014, 1, 1).unwrap())
///     .date_end(NaiveDate::from_ymd_opt(2014, 12, 31).unwrap())
///     .station("Dongsi")
///     .build();
/// assert_eq!(criteria.station.as_deref(), Some("Dongsi"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Builder, Serialize)]
pub struct FilterCriteria {
    /// First day to include.
    pub date_start: NaiveDate,
    /// Last day to include.
    pub date_end: NaiveDate,
    /// Station id to keep; `None` keeps all stations.
    #[builder(into)]
    pub station: Option<String>,
}

impl FilterCriteria {
    pub fn new(date_start: NaiveDate, date_end: NaiveDate, station: Option<String>) -> Self {
        Self {
            date_start,
            date_end,
            station,
        }
    }

    /// Builds criteria from loosely typed date inputs, as a date picker or command line hands
    /// them over.
    ///
    /// `start` resolves to the first day of its period and `end` to the last, so
    /// `from_dates(Year(2014), Year(2015), ..)` covers both full years. The station goes
    /// through [`FilterCriteria::with_station_selector`].
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::DateParsingError`] if either date cannot be resolved.
    pub fn from_dates(
        start: impl AnyDate,
        end: impl AnyDate,
        station: Option<&str>,
    ) -> Result<Self, AirQualityError> {
        let date_start = start
            .get_date_range()
            .ok_or(AirQualityError::DateParsingError)?
            .start;
        let date_end = end
            .get_date_range()
            .ok_or(AirQualityError::DateParsingError)?
            .end;
        let criteria = Self::new(date_start, date_end, None);
        Ok(match station {
            Some(selector) => criteria.with_station_selector(selector),
            None => criteria,
        })
    }

    /// Sets the station from a selector value: `"All"` (or blank) clears it, anything else
    /// is taken as a station id.
    pub fn with_station_selector(mut self, selector: &str) -> Self {
        let selector = selector.trim();
        self.station = if selector.is_empty() || selector == ALL_STATIONS {
            None
        } else {
            Some(selector.to_string())
        };
        self
    }

    pub fn all_stations(&self) -> bool {
        self.station.is_none()
    }

    pub fn is_inverted(&self) -> bool {
        self.date_start > self.date_end
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.date_start <= date && date <= self.date_end
    }

    pub fn matches_station(&self, station: &str) -> bool {
        self.station.as_deref().is_none_or(|wanted| wanted == station)
    }

    /// Row-level form of the frame filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.contains_date(record.date) && self.matches_station(&record.station)
    }
}

impl From<StartEndDate> for FilterCriteria {
    fn from(range: StartEndDate) -> Self {
        Self::new(range.start, range.end, None)
    }
}

impl Display for FilterCriteria {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..={} @ {}",
            self.date_start,
            self.date_end,
            self.station.as_deref().unwrap_or(ALL_STATIONS)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Month, Year};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_dates_expands_periods() -> Result<(), AirQualityError> {
        let criteria = FilterCriteria::from_dates(Year(2014), Month(2015, 2), Some("All"))?;
        assert_eq!(criteria.date_start, ymd(2014, 1, 1));
        assert_eq!(criteria.date_end, ymd(2015, 2, 28));
        assert!(criteria.all_stations());
        Ok(())
    }

    #[test]
    fn test_from_dates_rejects_malformed_input() {
        let result = FilterCriteria::from_dates("2014-01-01", "31/12/2014", None);
        assert!(matches!(result, Err(AirQualityError::DateParsingError)));
    }

    #[test]
    fn test_station_selector() {
        let base = FilterCriteria::new(ymd(2014, 1, 1), ymd(2014, 1, 2), None);
        assert_eq!(
            base.clone().with_station_selector(" Dongsi ").station.as_deref(),
            Some("Dongsi")
        );
        assert!(base.clone().with_station_selector("All").all_stations());
        assert!(base.with_station_selector("").all_stations());
    }

    #[test]
    fn test_predicates() {
        let criteria = FilterCriteria::builder()
            .date_start(ymd(2020, 1, 1))
            .date_end(ymd(2020, 1, 31))
            .station("A")
            .build();
        assert!(criteria.contains_date(ymd(2020, 1, 1)));
        assert!(criteria.contains_date(ymd(2020, 1, 31)));
        assert!(!criteria.contains_date(ymd(2020, 2, 1)));
        assert!(criteria.matches_station("A"));
        assert!(!criteria.matches_station("B"));

        let inverted = FilterCriteria::new(ymd(2020, 2, 1), ymd(2020, 1, 1), None);
        assert!(inverted.is_inverted());
        assert!(!inverted.contains_date(ymd(2020, 1, 15)));
    }

    #[test]
    fn test_display() {
        let criteria = FilterCriteria::new(ymd(2020, 1, 1), ymd(2020, 1, 31), None);
        assert_eq!(criteria.to_string(), "2020-01-01..=2020-01-31 @ All");
    }
}
