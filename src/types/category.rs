//! Defines the `AirQualityCategory` enum, the severity label derived from a PM2.5 reading.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Air-quality category of a PM2.5 concentration (µg/m³).
///
/// Variants are declared from least to most severe, so the derived `Ord` is the severity
/// order. The dashboard labels are Indonesian; [`AirQualityCategory::label`] returns them and
/// [`AirQualityCategory::english_name`] the English equivalent.
///
/// | PM2.5          | category             |
/// |----------------|----------------------|
/// | ≤ 15.5         | Baik                 |
/// | ≤ 55.4         | Sedang               |
/// | ≤ 150.4        | Tidak Sehat          |
/// | ≤ 250.4        | Sangat Tidak Sehat   |
/// | above          | Berbahaya            |
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum AirQualityCategory {
    /// Good.
    #[serde(rename = "Baik")]
    Baik,
    /// Moderate.
    #[serde(rename = "Sedang")]
    Sedang,
    /// Unhealthy.
    #[serde(rename = "Tidak Sehat")]
    TidakSehat,
    /// Very unhealthy.
    #[serde(rename = "Sangat Tidak Sehat")]
    SangatTidakSehat,
    /// Hazardous.
    #[serde(rename = "Berbahaya")]
    Berbahaya,
}

impl AirQualityCategory {
    /// All categories in severity order.
    pub const ALL: [AirQualityCategory; 5] = [
        AirQualityCategory::Baik,
        AirQualityCategory::Sedang,
        AirQualityCategory::TidakSehat,
        AirQualityCategory::SangatTidakSehat,
        AirQualityCategory::Berbahaya,
    ];

    /// Upper breakpoint (inclusive) of every category except the last.
    pub const BREAKPOINTS: [f64; 4] = [15.5, 55.4, 150.4, 250.4];

    /// Categorizes a PM2.5 concentration.
    ///
    /// Each branch tests `pm25 <= breakpoint` in turn, so the ranges are contiguous: a value
    /// between two printed ranges (e.g. `55.45`) belongs to the next category up. Anything that
    /// passes no test, including `NaN`, is [`AirQualityCategory::Berbahaya`].
    ///
    /// ```rust
    /// use air_quality::AirQualityCategory;
    ///
    /// assert_eq!(AirQualityCategory::from_pm25(15.5), AirQualityCategory::Baik);
    /// assert_eq!(AirQualityCategory::from_pm25(15.6), AirQualityCategory::Sedang);
    /// assert_eq!(AirQualityCategory::from_pm25(999.0), AirQualityCategory::Berbahaya);
    /// ```
    pub fn from_pm25(pm25: f64) -> Self {
        let [good, moderate, unhealthy, very_unhealthy] = Self::BREAKPOINTS;
        if pm25 <= good {
            AirQualityCategory::Baik
        } else if pm25 <= moderate {
            AirQualityCategory::Sedang
        } else if pm25 <= unhealthy {
            AirQualityCategory::TidakSehat
        } else if pm25 <= very_unhealthy {
            AirQualityCategory::SangatTidakSehat
        } else {
            AirQualityCategory::Berbahaya
        }
    }

    /// Indonesian label as shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            AirQualityCategory::Baik => "Baik",
            AirQualityCategory::Sedang => "Sedang",
            AirQualityCategory::TidakSehat => "Tidak Sehat",
            AirQualityCategory::SangatTidakSehat => "Sangat Tidak Sehat",
            AirQualityCategory::Berbahaya => "Berbahaya",
        }
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            AirQualityCategory::Baik => "Good",
            AirQualityCategory::Sedang => "Moderate",
            AirQualityCategory::TidakSehat => "Unhealthy",
            AirQualityCategory::SangatTidakSehat => "Very Unhealthy",
            AirQualityCategory::Berbahaya => "Hazardous",
        }
    }

    /// Position in [`AirQualityCategory::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for AirQualityCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shorthand for [`AirQualityCategory::from_pm25`].
pub fn categorize(pm25: f64) -> AirQualityCategory {
    AirQualityCategory::from_pm25(pm25)
}

#[cfg(test)]
mod tests {
    use super::*;
    use AirQualityCategory::*;

    #[test]
    fn test_boundary_values() {
        assert_eq!(categorize(15.5), Baik);
        assert_eq!(categorize(15.6), Sedang);
        assert_eq!(categorize(55.4), Sedang);
        assert_eq!(categorize(55.5), TidakSehat);
        assert_eq!(categorize(150.4), TidakSehat);
        assert_eq!(categorize(150.5), SangatTidakSehat);
        assert_eq!(categorize(250.4), SangatTidakSehat);
        assert_eq!(categorize(250.5), Berbahaya);
        assert_eq!(categorize(999.0), Berbahaya);
    }

    #[test]
    fn test_values_between_printed_ranges() {
        assert_eq!(categorize(15.55), Sedang);
        assert_eq!(categorize(55.45), TidakSehat);
        assert_eq!(categorize(250.41), Berbahaya);
    }

    #[test]
    fn test_total_over_extremes() {
        assert_eq!(categorize(f64::NEG_INFINITY), Baik);
        assert_eq!(categorize(-1.0), Baik);
        assert_eq!(categorize(0.0), Baik);
        assert_eq!(categorize(f64::INFINITY), Berbahaya);
        assert_eq!(categorize(f64::NAN), Berbahaya);
    }

    #[test]
    fn test_monotonic_in_pm25() {
        // A non-decreasing input sweep must never produce a less severe category.
        let mut previous = categorize(-10.0);
        let mut value = -10.0;
        while value < 400.0 {
            let current = categorize(value);
            assert!(
                current >= previous,
                "category dropped from {previous:?} to {current:?} at {value}"
            );
            previous = current;
            value += 0.05;
        }
        assert_eq!(previous, Berbahaya);
    }

    #[test]
    fn test_labels_and_order() {
        assert_eq!(TidakSehat.label(), "Tidak Sehat");
        assert_eq!(SangatTidakSehat.english_name(), "Very Unhealthy");
        assert_eq!(Berbahaya.to_string(), "Berbahaya");
        for (i, category) in AirQualityCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
        assert!(Baik < Sedang && Sedang < TidakSehat && SangatTidakSehat < Berbahaya);
    }
}
