use crate::types::category::AirQualityCategory;
use crate::types::measure::Measure;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One hourly observation at one station, as collected from an
/// [`crate::AirQualityLazyFrame`]. Missing readings are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub hour: u32,
    pub station: String,
    pub year: i32,
    #[serde(rename = "PM2.5")]
    pub pm25: Option<f64>,
    #[serde(rename = "NO2")]
    pub no2: Option<f64>,
    #[serde(rename = "SO2")]
    pub so2: Option<f64>,
    #[serde(rename = "CO")]
    pub co: Option<f64>,
    #[serde(rename = "O3")]
    pub o3: Option<f64>,
    #[serde(rename = "TEMP")]
    pub temp: Option<f64>,
    #[serde(rename = "PRES")]
    pub pres: Option<f64>,
    #[serde(rename = "DEWP")]
    pub dewp: Option<f64>,
    #[serde(rename = "RAIN")]
    pub rain: Option<f64>,
    #[serde(rename = "WSPM")]
    pub wspm: Option<f64>,
}

impl Record {
    pub fn get(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Pm25 => self.pm25,
            Measure::No2 => self.no2,
            Measure::So2 => self.so2,
            Measure::Co => self.co,
            Measure::O3 => self.o3,
            Measure::Temp => self.temp,
            Measure::Pres => self.pres,
            Measure::Dewp => self.dewp,
            Measure::Rain => self.rain,
            Measure::Wspm => self.wspm,
        }
    }

    pub(crate) fn set(&mut self, measure: Measure, value: Option<f64>) {
        let slot = match measure {
            Measure::Pm25 => &mut self.pm25,
            Measure::No2 => &mut self.no2,
            Measure::So2 => &mut self.so2,
            Measure::Co => &mut self.co,
            Measure::O3 => &mut self.o3,
            Measure::Temp => &mut self.temp,
            Measure::Pres => &mut self.pres,
            Measure::Dewp => &mut self.dewp,
            Measure::Rain => &mut self.rain,
            Measure::Wspm => &mut self.wspm,
        };
        *slot = value;
    }

    /// Category of this record's PM2.5 reading, if there is one.
    pub fn category(&self) -> Option<AirQualityCategory> {
        self.pm25.map(AirQualityCategory::from_pm25)
    }
}
