//! Result types of the grouping and summarizing operations on an
//! [`crate::AirQualityLazyFrame`].

use crate::data_source::schema::{HOUR_COLUMN, STATION_COLUMN, YEAR_COLUMN};
use crate::types::category::AirQualityCategory;
use crate::types::measure::Measure;
use ordered_float::OrderedFloat;
use polars::prelude::{col, DataFrame, DataType, Expr, PolarsResult};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

/// What to group rows by before averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupKey {
    Year,
    /// Hour of day, 0-23.
    Hour,
    Station,
}

impl GroupKey {
    pub fn column(&self) -> &'static str {
        match self {
            GroupKey::Year => YEAR_COLUMN,
            GroupKey::Hour => HOUR_COLUMN,
            GroupKey::Station => STATION_COLUMN,
        }
    }

    /// Expression producing the group column, typed the way [`Aggregate::from_frame`] reads it.
    pub(crate) fn expr(&self) -> Expr {
        match self {
            GroupKey::Year | GroupKey::Hour => col(self.column()).cast(DataType::Int64),
            GroupKey::Station => col(self.column()).cast(DataType::String),
        }
        .alias(self.column())
    }
}

/// The value of a [`GroupKey`] for one group. Serializes as the bare number or string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    Year(i32),
    Hour(u32),
    Station(String),
}

impl Display for GroupValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Year(year) => write!(f, "{year:04}"),
            GroupValue::Hour(hour) => write!(f, "{hour:02}:00"),
            GroupValue::Station(station) => f.write_str(station),
        }
    }
}

impl From<&str> for GroupValue {
    fn from(station: &str) -> Self {
        GroupValue::Station(station.to_string())
    }
}

/// Means of one group. Measures without a single reading in the group are absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub key: GroupValue,
    pub means: BTreeMap<Measure, f64>,
}

impl AggregateRow {
    pub fn mean(&self, measure: Measure) -> Option<f64> {
        self.means.get(&measure).copied()
    }
}

/// Per-group means of a set of measures, ordered by group key.
///
/// A group appears only if at least one requested measure has a reading in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    key: GroupKey,
    measures: Vec<Measure>,
    rows: Vec<AggregateRow>,
}

impl Aggregate {
    pub(crate) fn empty(key: GroupKey, measures: Vec<Measure>) -> Self {
        Self {
            key,
            measures,
            rows: Vec::new(),
        }
    }

    /// Reads the output of a polars `group_by(key).agg(mean per measure)`.
    ///
    /// Groups with a null key are dropped since they cannot be addressed.
    pub(crate) fn from_frame(
        key: GroupKey,
        measures: Vec<Measure>,
        grouped: &DataFrame,
    ) -> PolarsResult<Self> {
        let key_column = grouped.column(key.column())?;
        let keys: Vec<Option<GroupValue>> = match key {
            GroupKey::Year => key_column
                .i64()?
                .into_iter()
                .map(|v| v.and_then(|v| i32::try_from(v).ok()).map(GroupValue::Year))
                .collect(),
            GroupKey::Hour => key_column
                .i64()?
                .into_iter()
                .map(|v| v.and_then(|v| u32::try_from(v).ok()).map(GroupValue::Hour))
                .collect(),
            GroupKey::Station => key_column
                .str()?
                .into_iter()
                .map(|v| v.map(GroupValue::from))
                .collect(),
        };

        let mean_columns = measures
            .iter()
            .map(|m| {
                let values: Vec<Option<f64>> =
                    grouped.column(m.column())?.f64()?.into_iter().collect();
                Ok((*m, values))
            })
            .collect::<PolarsResult<Vec<_>>>()?;

        let mut groups = BTreeMap::new();
        for (i, key_value) in keys.into_iter().enumerate() {
            let Some(key_value) = key_value else {
                continue;
            };
            let means: BTreeMap<Measure, f64> = mean_columns
                .iter()
                .filter_map(|(measure, values)| values[i].map(|v| (*measure, v)))
                .collect();
            if !means.is_empty() {
                groups.insert(key_value, means);
            }
        }

        Ok(Self {
            key,
            measures,
            rows: groups
                .into_iter()
                .map(|(key, means)| AggregateRow { key, means })
                .collect(),
        })
    }

    pub fn key(&self) -> GroupKey {
        self.key
    }

    /// The measures that were requested, duplicates removed.
    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn rows(&self) -> &[AggregateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &GroupValue) -> Option<&AggregateRow> {
        self.rows
            .binary_search_by(|row| row.key.cmp(key))
            .ok()
            .map(|i| &self.rows[i])
    }

    pub fn mean(&self, key: &GroupValue, measure: Measure) -> Option<f64> {
        self.get(key).and_then(|row| row.mean(measure))
    }

    /// The `(group, mean)` points of one measure in key order, skipping groups without it.
    /// This is the line of a trend chart.
    pub fn series(&self, measure: Measure) -> Vec<(GroupValue, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.mean(measure).map(|v| (row.key.clone(), v)))
            .collect()
    }

    /// Rows ordered by `measure`, highest first; rows lacking the measure go last, in key
    /// order.
    pub fn ranked_by(&self, measure: Measure) -> Vec<AggregateRow> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|row| Reverse(row.mean(measure).map(OrderedFloat)));
        rows
    }
}

/// Number of rows per [`AirQualityCategory`] of their PM2.5 reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    counts: BTreeMap<AirQualityCategory, usize>,
    /// Rows without a PM2.5 reading.
    pub missing: usize,
}

impl CategoryCounts {
    pub fn from_values(values: impl IntoIterator<Item = Option<f64>>) -> Self {
        let mut result = Self {
            counts: AirQualityCategory::ALL.iter().map(|c| (*c, 0)).collect(),
            missing: 0,
        };
        for value in values {
            match value {
                Some(pm25) => *result
                    .counts
                    .entry(AirQualityCategory::from_pm25(pm25))
                    .or_default() += 1,
                None => result.missing += 1,
            }
        }
        result
    }

    pub fn get(&self, category: AirQualityCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Rows that have a category.
    pub fn categorized(&self) -> usize {
        self.counts.values().sum()
    }

    /// Fraction of categorized rows in `category`, `None` when nothing was categorized.
    pub fn share(&self, category: AirQualityCategory) -> Option<f64> {
        let total = self.categorized();
        (total > 0).then(|| self.get(category) as f64 / total as f64)
    }

    /// The most frequent category; ties go to the more severe one.
    pub fn dominant(&self) -> Option<AirQualityCategory> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .max_by_key(|(category, count)| (**count, **category))
            .map(|(category, _)| *category)
    }

    /// `(category, count)` pairs in severity order, including empty categories.
    pub fn iter(&self) -> impl Iterator<Item = (AirQualityCategory, usize)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }
}

/// Paired readings of two measures, in row order, for a scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub x: Measure,
    pub y: Measure,
    /// Rows where either reading is missing are left out.
    pub points: Vec<(f64, f64)>,
}

impl ScatterSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use AirQualityCategory::*;

    #[test]
    fn test_from_frame_skips_null_keys_and_empty_groups() -> Result<(), Box<dyn std::error::Error>>
    {
        let grouped = df!(
            "station" => &[Some("B"), None, Some("A"), Some("C")],
            "PM2.5" => &[Some(12.0), Some(3.0), Some(7.5), None],
            "RAIN" => &[None, None, Some(0.25), None],
        )?;

        let aggregate = Aggregate::from_frame(
            GroupKey::Station,
            vec![Measure::Pm25, Measure::Rain],
            &grouped,
        )?;

        let keys: Vec<String> = aggregate.rows().iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["A", "B"], "null key and all-null group C are dropped");
        assert_eq!(aggregate.mean(&"A".into(), Measure::Rain), Some(0.25));
        assert_eq!(aggregate.mean(&"B".into(), Measure::Rain), None);
        assert_eq!(aggregate.mean(&"B".into(), Measure::Pm25), Some(12.0));
        Ok(())
    }

    #[test]
    fn test_ranked_by_puts_missing_last() -> Result<(), Box<dyn std::error::Error>> {
        let grouped = df!(
            "station" => &["A", "B", "C"],
            "RAIN" => &[Some(0.5), None, Some(2.0)],
            "CO" => &[Some(900.0), Some(1500.0), Some(700.0)],
        )?;
        let aggregate =
            Aggregate::from_frame(GroupKey::Station, vec![Measure::Rain, Measure::Co], &grouped)?;

        let ranked: Vec<String> = aggregate
            .ranked_by(Measure::Rain)
            .iter()
            .map(|r| r.key.to_string())
            .collect();
        assert_eq!(ranked, vec!["C", "A", "B"]);
        Ok(())
    }

    #[test]
    fn test_series_and_display() -> Result<(), Box<dyn std::error::Error>> {
        let grouped = df!(
            "hour" => &[3i64, 1],
            "O3" => &[Some(10.0), Some(20.0)],
        )?;
        let aggregate = Aggregate::from_frame(GroupKey::Hour, vec![Measure::O3], &grouped)?;
        assert_eq!(
            aggregate.series(Measure::O3),
            vec![(GroupValue::Hour(1), 20.0), (GroupValue::Hour(3), 10.0)]
        );
        assert_eq!(GroupValue::Hour(1).to_string(), "01:00");
        assert_eq!(GroupValue::Year(2014).to_string(), "2014");
        Ok(())
    }

    #[test]
    fn test_category_counts() {
        let counts = CategoryCounts::from_values([
            Some(4.0),
            Some(15.5),
            None,
            Some(60.0),
            Some(260.0),
            Some(300.0),
        ]);
        assert_eq!(counts.get(Baik), 2);
        assert_eq!(counts.get(Sedang), 0);
        assert_eq!(counts.get(TidakSehat), 1);
        assert_eq!(counts.get(Berbahaya), 2);
        assert_eq!(counts.missing, 1);
        assert_eq!(counts.categorized(), 5);
        assert_eq!(counts.share(Baik), Some(0.4));
        // Baik and Berbahaya tie; the more severe wins.
        assert_eq!(counts.dominant(), Some(Berbahaya));
        assert_eq!(counts.iter().count(), 5);

        let empty = CategoryCounts::from_values([None]);
        assert_eq!(empty.share(Baik), None);
        assert_eq!(empty.dominant(), None);
    }

    #[test]
    fn test_serialization_shape() -> Result<(), Box<dyn std::error::Error>> {
        let grouped = df!(
            "year" => &[2020i64],
            "PM2.5" => &[Some(35.0)],
        )?;
        let aggregate = Aggregate::from_frame(GroupKey::Year, vec![Measure::Pm25], &grouped)?;
        let json = serde_json::to_value(&aggregate)?;
        assert_eq!(json["key"], "Year");
        assert_eq!(json["rows"][0]["key"], 2020);
        assert_eq!(json["rows"][0]["means"]["PM2.5"], 35.0);

        let counts = serde_json::to_value(CategoryCounts::from_values([Some(1.0)]))?;
        assert_eq!(counts["counts"]["Baik"], 1);
        assert_eq!(counts["counts"]["Tidak Sehat"], 0);
        Ok(())
    }
}
