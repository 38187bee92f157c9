//! Names the numeric columns of an air-quality dataset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// One numeric column of the dataset: a pollutant concentration or a weather reading.
///
/// The serialized form is the CSV column name (e.g. `"PM2.5"`), so a [`Measure`] can key a
/// JSON object directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Measure {
    /// Fine particulate matter, µg/m³.
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "O3")]
    O3,
    /// Air temperature.
    #[serde(rename = "TEMP")]
    Temp,
    /// Air pressure.
    #[serde(rename = "PRES")]
    Pres,
    /// Dew point.
    #[serde(rename = "DEWP")]
    Dewp,
    /// Precipitation, mm.
    #[serde(rename = "RAIN")]
    Rain,
    /// Wind speed.
    #[serde(rename = "WSPM")]
    Wspm,
}

impl Measure {
    /// The five pollutant columns, in dashboard order.
    pub const POLLUTANTS: [Measure; 5] = [
        Measure::Pm25,
        Measure::No2,
        Measure::So2,
        Measure::Co,
        Measure::O3,
    ];

    /// The five weather columns.
    pub const WEATHER: [Measure; 5] = [
        Measure::Temp,
        Measure::Pres,
        Measure::Dewp,
        Measure::Rain,
        Measure::Wspm,
    ];

    /// Every measure, pollutants first.
    pub const ALL: [Measure; 10] = [
        Measure::Pm25,
        Measure::No2,
        Measure::So2,
        Measure::Co,
        Measure::O3,
        Measure::Temp,
        Measure::Pres,
        Measure::Dewp,
        Measure::Rain,
        Measure::Wspm,
    ];

    /// Column name in the CSV file and in the loaded frame.
    pub fn column(&self) -> &'static str {
        match self {
            Measure::Pm25 => "PM2.5",
            Measure::No2 => "NO2",
            Measure::So2 => "SO2",
            Measure::Co => "CO",
            Measure::O3 => "O3",
            Measure::Temp => "TEMP",
            Measure::Pres => "PRES",
            Measure::Dewp => "DEWP",
            Measure::Rain => "RAIN",
            Measure::Wspm => "WSPM",
        }
    }

    pub fn is_pollutant(&self) -> bool {
        Measure::POLLUTANTS.contains(self)
    }

    /// Looks a measure up by its column name (case-insensitive).
    pub fn from_column(name: &str) -> Option<Measure> {
        Measure::ALL
            .into_iter()
            .find(|m| m.column().eq_ignore_ascii_case(name.trim()))
    }
}

impl Display for Measure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_lookup() {
        for measure in Measure::ALL {
            assert_eq!(Measure::from_column(measure.column()), Some(measure));
        }
        assert_eq!(Measure::from_column("pm2.5"), Some(Measure::Pm25));
        assert_eq!(Measure::from_column("humidity"), None);
    }

    #[test]
    fn test_groups_are_disjoint() {
        assert!(Measure::POLLUTANTS.iter().all(|m| m.is_pollutant()));
        assert!(Measure::WEATHER.iter().all(|m| !m.is_pollutant()));
    }

    #[test]
    fn test_serializes_as_column_name() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(serde_json::to_string(&Measure::Pm25)?, "\"PM2.5\"");
        assert_eq!(serde_json::from_str::<Measure>("\"WSPM\"")?, Measure::Wspm);
        Ok(())
    }
}
