//! The data behind every chart of the air-quality dashboard, for one set of filter criteria.

use crate::aggregate::{Aggregate, AggregateRow, CategoryCounts, ScatterSeries};
use crate::air_quality::AirQuality;
use crate::types::criteria::FilterCriteria;
use crate::types::measure::Measure;
use crate::types::traits::types::StartEndDate;
use crate::AirQualityError;
use log::info;
use serde::Serialize;

/// Pollutant/weather pairs shown as scatter plots, `(x, y)`.
pub const WEATHER_RELATIONS: [(Measure, Measure); 4] = [
    (Measure::Temp, Measure::Co),
    (Measure::Rain, Measure::Pm25),
    (Measure::Wspm, Measure::No2),
    (Measure::Dewp, Measure::O3),
];

/// Everything a presentation layer draws after the user changes the date range or station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub criteria: FilterCriteria,
    /// Rows in the filtered subset.
    pub observations: usize,
    /// First and last date actually present in the subset.
    pub date_bounds: Option<StartEndDate>,
    /// Pollutant means per year.
    pub yearly_pollutants: Aggregate,
    /// Pollutant means per hour of day.
    pub hourly_pollutants: Aggregate,
    /// One series per entry of [`WEATHER_RELATIONS`].
    pub weather_relations: Vec<ScatterSeries>,
    /// Mean rainfall and CO per station, wettest first.
    pub station_rain_co: Vec<AggregateRow>,
    pub categories: CategoryCounts,
}

impl DashboardReport {
    /// Filters `air_quality` once and derives every aggregate from that subset.
    pub fn build(
        air_quality: &AirQuality,
        criteria: &FilterCriteria,
    ) -> Result<Self, AirQualityError> {
        let subset = air_quality.filter(criteria).cache()?;

        let weather_relations = WEATHER_RELATIONS
            .iter()
            .map(|(x, y)| subset.scatter(*x, *y))
            .collect::<Result<Vec<_>, _>>()?;

        let report = Self {
            criteria: criteria.clone(),
            observations: subset.count()?,
            date_bounds: subset.date_bounds()?,
            yearly_pollutants: subset.yearly_pollutant_means()?,
            hourly_pollutants: subset.hourly_pollutant_means()?,
            weather_relations,
            station_rain_co: subset.station_rain_co()?.ranked_by(Measure::Rain),
            categories: subset.category_counts()?,
        };
        info!(
            "Built dashboard report for {}: {} observations",
            criteria, report.observations
        );
        Ok(report)
    }

    pub fn to_json(&self) -> Result<String, AirQualityError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, AirQualityError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
