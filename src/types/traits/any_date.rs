use crate::types::traits::types::{Month, StartEndDate, Year};
use crate::types::traits::utils::days_in_month;
use chrono::NaiveDate;

/// Anything that can stand for a calendar date or a span of dates.
///
/// A single day resolves to a one-day range, a [`Year`] or [`Month`] to the days it covers.
/// Strings are accepted as `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
///
/// ```
/// use air_quality::{AnyDate, Year};
/// use chrono::NaiveDate;
///
/// let range = Year(2015).get_date_range().unwrap();
/// assert_eq!(range.start, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
/// assert_eq!(range.end, NaiveDate::from_ymd_opt(2015, 12, 31).unwrap());
/// assert!("2015-02-30".get_date_range().is_none());
/// ```
pub trait AnyDate {
    fn get_date_range(self) -> Option<StartEndDate>;
}

impl AnyDate for NaiveDate {
    fn get_date_range(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: self,
            end: self,
        })
    }
}

impl AnyDate for &str {
    fn get_date_range(self) -> Option<StartEndDate> {
        let trimmed = self.trim();
        if let Ok(naive_date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return naive_date.get_date_range();
        }
        if let Some((year, month)) = trimmed.split_once('-') {
            let year = year.parse::<i32>().ok()?;
            let month = month.parse::<u32>().ok()?;
            return Month(year, month).get_date_range();
        }
        trimmed.parse::<i32>().ok().and_then(|y| Year(y).get_date_range())
    }
}

impl AnyDate for String {
    fn get_date_range(self) -> Option<StartEndDate> {
        self.as_str().get_date_range()
    }
}

impl AnyDate for &String {
    fn get_date_range(self) -> Option<StartEndDate> {
        self.as_str().get_date_range()
    }
}

impl AnyDate for Year {
    fn get_date_range(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            end: NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        })
    }
}

impl AnyDate for Month {
    fn get_date_range(self) -> Option<StartEndDate> {
        let year = self.year();
        let month = self.month();
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(year, month, 1)?,
            end: NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_str_formats() {
        let day = "2016-03-04".get_date_range().unwrap();
        assert_eq!((day.start, day.end), (ymd(2016, 3, 4), ymd(2016, 3, 4)));

        let month = "2016-02".get_date_range().unwrap();
        assert_eq!((month.start, month.end), (ymd(2016, 2, 1), ymd(2016, 2, 29)));

        let year = " 2016 ".get_date_range().unwrap();
        assert_eq!((year.start, year.end), (ymd(2016, 1, 1), ymd(2016, 12, 31)));
    }

    #[test]
    fn test_invalid_input() {
        assert!("not a date".get_date_range().is_none());
        assert!("2016-13".get_date_range().is_none());
        assert!("2016-02-30".get_date_range().is_none());
        assert!(Month(2016, 0).get_date_range().is_none());
    }
}
