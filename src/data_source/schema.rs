//! Column names of the air-quality dataset and the normalization every loaded frame goes
//! through before the engine sees it.

use crate::data_source::error::DataSourceError;
use crate::types::measure::Measure;
use log::{debug, warn};
use polars::prelude::*;

pub const DATE_COLUMN: &str = "date";
pub const HOUR_COLUMN: &str = "hour";
pub const STATION_COLUMN: &str = "station";
pub const YEAR_COLUMN: &str = "year";
/// Added by [`crate::AirQualityLazyFrame::with_category`], never part of the loaded schema.
pub const CATEGORY_COLUMN: &str = "category";

pub(crate) const REQUIRED_COLUMNS: [&str; 3] = [DATE_COLUMN, HOUR_COLUMN, STATION_COLUMN];

/// Format of string `date` cells; trailing time components are ignored.
const DATE_FORMAT: &str = "%Y-%m-%d";

fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Brings a raw frame into the shape the engine relies on:
///
/// * `date` is a polars `Date` (converted from `Datetime` or parsed from `YYYY-MM-DD` strings),
/// * `hour` and `year` are `Int32`; `year` is derived from `date` when the file lacks it,
/// * `station` is a string,
/// * every [`Measure`] column is `Float64`; cells that are not numbers (NaN included) become
///   null and columns missing from the file are added as all-null.
///
/// Hours outside 0-23 are kept but logged as a warning.
///
/// Other columns pass through untouched and keep their position.
///
/// # Errors
///
/// * [`DataSourceError::MissingColumn`] if `date`, `hour` or `station` is absent.
/// * [`DataSourceError::UnsupportedDateType`] / [`DataSourceError::DateParse`] if `date`
///   cannot be turned into calendar dates.
pub fn normalize_frame(mut df: DataFrame) -> Result<DataFrame, DataSourceError> {
    for required in REQUIRED_COLUMNS {
        if !has_column(&df, required) {
            return Err(DataSourceError::MissingColumn(required.to_string()));
        }
    }

    for measure in Measure::ALL {
        if !has_column(&df, measure.column()) {
            warn!(
                "Column '{}' is missing, treating every {} reading as absent",
                measure, measure
            );
            df.with_column(Series::full_null(
                measure.column().into(),
                df.height(),
                &DataType::Float64,
            ))?;
        }
    }

    let date_dtype = df.column(DATE_COLUMN)?.dtype().clone();
    debug!("Normalizing frame with {} rows, date dtype {}", df.height(), date_dtype);
    let date_expr = match date_dtype {
        DataType::Date => col(DATE_COLUMN),
        DataType::Datetime(_, _) => col(DATE_COLUMN).cast(DataType::Date),
        DataType::String => col(DATE_COLUMN).str().to_date(StrptimeOptions {
            format: Some(DATE_FORMAT.into()),
            strict: true,
            exact: false,
            cache: true,
        }),
        other => return Err(DataSourceError::UnsupportedDateType(other.to_string())),
    };

    let year_expr = if has_column(&df, YEAR_COLUMN) {
        col(YEAR_COLUMN).cast(DataType::Int32)
    } else {
        col(DATE_COLUMN).dt().year().alias(YEAR_COLUMN)
    };

    // NaN readings count as missing, like nulls.
    let measure_exprs = Measure::ALL.iter().map(|m| {
        col(m.column())
            .cast(DataType::Float64)
            .fill_nan(lit(NULL))
            .alias(m.column())
    });

    let df = df
        .lazy()
        .with_columns(
            [
                date_expr.alias(DATE_COLUMN),
                col(HOUR_COLUMN).cast(DataType::Int32),
                col(STATION_COLUMN).cast(DataType::String),
            ]
            .into_iter()
            .chain(measure_exprs)
            .collect::<Vec<_>>(),
        )
        // `year` may be derived from the parsed date, so it goes in a second pass.
        .with_column(year_expr)
        .collect()
        .map_err(DataSourceError::DateParse)?;

    let bad_hours = count_out_of_range_hours(&df)?;
    if bad_hours > 0 {
        warn!(
            "{} rows have an hour outside 0-23; hourly aggregates skip or misplace them",
            bad_hours
        );
    }
    Ok(df)
}

/// Rows whose `hour` is set but not a valid hour of day.
pub(crate) fn count_out_of_range_hours(df: &DataFrame) -> PolarsResult<usize> {
    Ok(df
        .column(HOUR_COLUMN)?
        .i32()?
        .into_iter()
        .flatten()
        .filter(|hour| !(0..24).contains(hour))
        .count())
}
