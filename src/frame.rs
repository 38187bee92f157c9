//! Contains the `AirQualityLazyFrame` structure for filtering and summarizing air-quality data.

use crate::aggregate::{Aggregate, CategoryCounts, GroupKey, ScatterSeries};
use crate::data_source::export;
use crate::data_source::schema::{
    CATEGORY_COLUMN, DATE_COLUMN, HOUR_COLUMN, STATION_COLUMN, YEAR_COLUMN,
};
use crate::filtering::AirQualityFrameFilterExt;
use crate::types::category::AirQualityCategory;
use crate::types::criteria::FilterCriteria;
use crate::types::measure::Measure;
use crate::types::record::Record;
use crate::types::traits::any_date::AnyDate;
use crate::types::traits::types::StartEndDate;
use crate::types::traits::utils::date_from_epoch_days;
use crate::AirQualityError;
use chrono::Datelike;
use log::{debug, warn};
use polars::prelude::{col, DataFrame, DataType, Expr, IntoLazy, LazyFrame, NamedFrom, Series};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

/// A wrapper around a Polars `LazyFrame` holding air-quality observations.
///
/// Filtering methods return a *new* `AirQualityLazyFrame` and never touch the original;
/// nothing is computed until a summarizing method (or `.frame.collect()`) runs. Filters keep
/// the original relative order of rows.
///
/// Instances are obtained from [`crate::AirQuality::data`] or [`crate::AirQuality::filter`].
///
/// # Errors
///
/// Methods that collect can return [`AirQualityError::DataFrameProcessing`]. Methods that
/// resolve loosely typed dates return [`AirQualityError::DateParsingError`] when the input
/// cannot be resolved.
#[derive(Clone)]
pub struct AirQualityLazyFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
}

impl AirQualityLazyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Filters the data with an arbitrary Polars predicate.
    ///
    /// ```no_run
    /// # use air_quality::AirQuality;
    /// use polars::prelude::{col, lit};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let air_quality = AirQuality::from_csv("all_data.csv")?;
    /// let windy = air_quality.data().filter(col("WSPM").gt(lit(5.0)));
    /// println!("{} windy hours", windy.count()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> AirQualityLazyFrame {
        AirQualityLazyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Keeps rows dated from the start of `start` to the end of `end`, both inclusive.
    ///
    /// `start` and `end` can be anything implementing [`AnyDate`], such as `NaiveDate`,
    /// `"2014-03"`, or [`crate::Year`].
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::DateParsingError`] if either bound cannot be resolved.
    pub fn get_range(
        &self,
        start: impl AnyDate,
        end: impl AnyDate,
    ) -> Result<AirQualityLazyFrame, AirQualityError> {
        let start = start
            .get_date_range()
            .ok_or(AirQualityError::DateParsingError)?
            .start;
        let end = end
            .get_date_range()
            .ok_or(AirQualityError::DateParsingError)?
            .end;
        Ok(AirQualityLazyFrame::new(
            self.frame.clone().filter_date_range(start, end),
        ))
    }

    /// Keeps rows within a single period, such as a day, a [`crate::Month`] or a
    /// [`crate::Year`].
    pub fn get_for_period(
        &self,
        period: impl AnyDate,
    ) -> Result<AirQualityLazyFrame, AirQualityError> {
        let period = period
            .get_date_range()
            .ok_or(AirQualityError::DateParsingError)?;
        self.get_range(period.start, period.end)
    }

    /// Keeps rows recorded at `station`.
    pub fn station(&self, station: &str) -> AirQualityLazyFrame {
        AirQualityLazyFrame::new(self.frame.clone().filter_station(Some(station)))
    }

    /// Applies date range and station selection of `criteria`.
    pub fn apply(&self, criteria: &FilterCriteria) -> AirQualityLazyFrame {
        if criteria.is_inverted() {
            debug!("Inverted date range in {}, result will be empty", criteria);
        }
        AirQualityLazyFrame::new(self.frame.clone().filter_criteria(criteria))
    }

    pub fn collect(&self) -> Result<DataFrame, AirQualityError> {
        Ok(self.frame.clone().collect()?)
    }

    /// Evaluates the plan once, so that several summaries of the same subset do not each
    /// re-run the filters.
    pub fn cache(&self) -> Result<AirQualityLazyFrame, AirQualityError> {
        Ok(AirQualityLazyFrame::new(self.collect()?.lazy()))
    }

    /// Number of rows.
    pub fn count(&self) -> Result<usize, AirQualityError> {
        let df = self
            .frame
            .clone()
            .select([col(DATE_COLUMN)])
            .collect()?;
        Ok(df.height())
    }

    /// Groups rows by `key` and averages each of `measures` per group, ignoring missing
    /// readings.
    ///
    /// A group is left out only when none of the requested measures has a reading in it. An
    /// empty frame gives an empty [`Aggregate`].
    ///
    /// ```no_run
    /// # use air_quality::{AirQuality, GroupKey, GroupValue, Measure};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let air_quality = AirQuality::from_csv("all_data.csv")?;
    /// let by_station = air_quality
    ///     .data()
    ///     .aggregate_by(GroupKey::Station, &[Measure::Rain, Measure::Co])?;
    /// let rain = by_station.mean(&GroupValue::from("Dongsi"), Measure::Rain);
    /// # Ok(())
    /// # }
    /// ```
    pub fn aggregate_by(
        &self,
        key: GroupKey,
        measures: &[Measure],
    ) -> Result<Aggregate, AirQualityError> {
        let mut unique = Vec::with_capacity(measures.len());
        for measure in measures {
            if !unique.contains(measure) {
                unique.push(*measure);
            }
        }
        if unique.is_empty() {
            return Ok(Aggregate::empty(key, unique));
        }

        let means: Vec<Expr> = unique
            .iter()
            .map(|m| col(m.column()).mean().alias(m.column()))
            .collect();
        let grouped = self
            .frame
            .clone()
            .group_by([key.expr()])
            .agg(means)
            .collect()?;
        Ok(Aggregate::from_frame(key, unique, &grouped)?)
    }

    /// Mean of every pollutant per year.
    pub fn yearly_pollutant_means(&self) -> Result<Aggregate, AirQualityError> {
        self.aggregate_by(GroupKey::Year, &Measure::POLLUTANTS)
    }

    /// Mean of every pollutant per hour of the day.
    pub fn hourly_pollutant_means(&self) -> Result<Aggregate, AirQualityError> {
        self.aggregate_by(GroupKey::Hour, &Measure::POLLUTANTS)
    }

    pub fn station_means(&self, measures: &[Measure]) -> Result<Aggregate, AirQualityError> {
        self.aggregate_by(GroupKey::Station, measures)
    }

    /// Mean rainfall and CO per station.
    pub fn station_rain_co(&self) -> Result<Aggregate, AirQualityError> {
        self.station_means(&[Measure::Rain, Measure::Co])
    }

    /// `(x, y)` readings of every row where both are present.
    pub fn scatter(&self, x: Measure, y: Measure) -> Result<ScatterSeries, AirQualityError> {
        let columns = if x == y {
            vec![col(x.column())]
        } else {
            vec![col(x.column()), col(y.column())]
        };
        let df = self.frame.clone().select(columns).collect()?;
        let xs = df.column(x.column())?.f64()?;
        let ys = df.column(y.column())?.f64()?;
        let points = xs
            .into_iter()
            .zip(ys)
            .filter_map(|(x, y)| Some((x?, y?)))
            .collect();
        Ok(ScatterSeries { x, y, points })
    }

    /// Counts rows per air-quality category of their PM2.5 reading.
    pub fn category_counts(&self) -> Result<CategoryCounts, AirQualityError> {
        let pm25 = Measure::Pm25.column();
        let df = self.frame.clone().select([col(pm25)]).collect()?;
        Ok(CategoryCounts::from_values(df.column(pm25)?.f64()?))
    }

    /// Collects the rows with an extra `category` column holding the Indonesian label of the
    /// PM2.5 reading, null where PM2.5 is missing.
    pub fn with_category(&self) -> Result<DataFrame, AirQualityError> {
        let mut df = self.collect()?;
        let labels: Vec<Option<&str>> = df
            .column(Measure::Pm25.column())?
            .f64()?
            .into_iter()
            .map(|v| v.map(|pm25| AirQualityCategory::from_pm25(pm25).label()))
            .collect();
        df.with_column(Series::new(CATEGORY_COLUMN.into(), labels))?;
        Ok(df)
    }

    /// First and last date present, `None` for an empty frame.
    pub fn date_bounds(&self) -> Result<Option<StartEndDate>, AirQualityError> {
        let df = self
            .frame
            .clone()
            .select([
                col(DATE_COLUMN).min().cast(DataType::Int32).alias("start"),
                col(DATE_COLUMN).max().cast(DataType::Int32).alias("end"),
            ])
            .collect()?;
        let start = df.column("start")?.i32()?.get(0).and_then(date_from_epoch_days);
        let end = df.column("end")?.i32()?.get(0).and_then(date_from_epoch_days);
        Ok(start.zip(end).map(|(start, end)| StartEndDate { start, end }))
    }

    /// Distinct station ids, sorted.
    pub fn stations(&self) -> Result<Vec<String>, AirQualityError> {
        let df = self.frame.clone().select([col(STATION_COLUMN)]).collect()?;
        let stations: BTreeSet<String> = df
            .column(STATION_COLUMN)?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        Ok(stations.into_iter().collect())
    }

    /// Collects the rows into [`Record`]s, in frame order.
    ///
    /// Rows without a date, hour or station cannot form a record and are skipped with a
    /// warning. A missing year is taken from the date.
    pub fn collect_records(&self) -> Result<Vec<Record>, AirQualityError> {
        let df = self
            .frame
            .clone()
            .select(
                [
                    col(DATE_COLUMN).cast(DataType::Int32),
                    col(HOUR_COLUMN).cast(DataType::Int32),
                    col(STATION_COLUMN).cast(DataType::String),
                    col(YEAR_COLUMN).cast(DataType::Int32),
                ]
                .into_iter()
                .chain(
                    Measure::ALL
                        .iter()
                        .map(|m| col(m.column()).cast(DataType::Float64)),
                )
                .collect::<Vec<_>>(),
            )
            .collect()?;

        let dates = df.column(DATE_COLUMN)?.i32()?;
        let hours = df.column(HOUR_COLUMN)?.i32()?;
        let stations = df.column(STATION_COLUMN)?.str()?;
        let years = df.column(YEAR_COLUMN)?.i32()?;
        let measures = Measure::ALL
            .iter()
            .map(|m| Ok((*m, df.column(m.column())?.f64()?)))
            .collect::<Result<Vec<_>, AirQualityError>>()?;

        let mut records = Vec::with_capacity(df.height());
        let mut skipped = 0usize;
        for i in 0..df.height() {
            let date = dates.get(i).and_then(date_from_epoch_days);
            let hour = hours.get(i).and_then(|h| u32::try_from(h).ok());
            let station = stations.get(i);
            let (Some(date), Some(hour), Some(station)) = (date, hour, station) else {
                skipped += 1;
                continue;
            };
            let mut record = Record {
                date,
                hour,
                station: station.to_string(),
                year: years.get(i).unwrap_or_else(|| date.year()),
                pm25: None,
                no2: None,
                so2: None,
                co: None,
                o3: None,
                temp: None,
                pres: None,
                dewp: None,
                rain: None,
                wspm: None,
            };
            for (measure, values) in &measures {
                record.set(*measure, values.get(i));
            }
            records.push(record);
        }
        if skipped > 0 {
            warn!("Skipped {} rows without date, hour or station", skipped);
        }
        Ok(records)
    }

    /// Writes the rows as CSV (header included) to `writer`.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), AirQualityError> {
        let mut df = self.collect()?;
        export::write_csv(&mut df, writer)?;
        Ok(())
    }

    /// Writes the rows as CSV to the file at `path`.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<(), AirQualityError> {
        let mut df = self.collect()?;
        export::export_csv(&mut df, path.as_ref())?;
        Ok(())
    }
}
