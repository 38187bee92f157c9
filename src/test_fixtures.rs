//! Small in-memory datasets shared by the unit tests.

use crate::{AirQuality, AirQualityError};
use chrono::NaiveDate;
use polars::df;

pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Eight rows over three stations and two years, with gaps in several measures.
pub(crate) fn sample() -> Result<AirQuality, AirQualityError> {
    let df = df!(
        "date" => &[
            "2013-03-01", "2013-03-01", "2013-03-02", "2013-12-31",
            "2014-01-01", "2014-01-01", "2014-06-15", "2014-06-15",
        ],
        "hour" => &[0i64, 1, 0, 23, 0, 1, 12, 12],
        "station" => &[
            "Aotizhongxin", "Dongsi", "Aotizhongxin", "Dongsi",
            "Tiantan", "Aotizhongxin", "Dongsi", "Tiantan",
        ],
        "PM2.5" => &[Some(4.0), Some(8.0), None, Some(80.0), Some(200.0), Some(300.0), Some(40.0), None],
        "NO2" => &[Some(7.0), None, Some(20.0), Some(50.0), Some(90.0), Some(100.0), Some(30.0), None],
        "SO2" => &[Some(4.0), Some(5.0), Some(6.0), Some(10.0), Some(20.0), Some(30.0), Some(3.0), None],
        "CO" => &[Some(300.0), Some(400.0), Some(500.0), Some(1200.0), Some(2500.0), Some(3000.0), Some(600.0), None],
        "O3" => &[Some(77.0), Some(70.0), Some(60.0), Some(5.0), Some(2.0), Some(1.0), Some(150.0), None],
        "TEMP" => &[Some(-0.7), Some(-1.1), Some(1.0), Some(-3.0), Some(-5.0), Some(-6.0), Some(28.0), None],
        "PRES" => &[Some(1023.0), Some(1023.2), Some(1020.0), Some(1030.0), Some(1035.0), Some(1036.0), Some(1000.0), None],
        "DEWP" => &[Some(-18.8), Some(-18.2), Some(-10.0), Some(-20.0), Some(-22.0), Some(-23.0), Some(15.0), None],
        "RAIN" => &[Some(0.0), Some(0.0), Some(0.5), Some(0.0), None, Some(1.2), Some(8.0), None],
        "WSPM" => &[Some(4.4), Some(4.7), Some(2.0), Some(1.0), Some(0.5), Some(0.8), Some(2.5), None],
        "year" => &[2013i64, 2013, 2013, 2013, 2014, 2014, 2014, 2014],
    )?;
    AirQuality::from_frame(df)
}

/// Station "A" on 2020-01-01 (PM2.5 10) and 2020-06-01 (PM2.5 60).
pub(crate) fn scenario() -> Result<AirQuality, AirQualityError> {
    let df = df!(
        "date" => &["2020-01-01", "2020-06-01"],
        "hour" => &[0i64, 0],
        "station" => &["A", "A"],
        "PM2.5" => &[Some(10.0), Some(60.0)],
    )?;
    AirQuality::from_frame(df)
}
