use chrono::{Datelike, Duration, NaiveDate};

/// `num_days_from_ce` of 1970-01-01, the origin of polars `Date` values.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_month_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_day_of_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1)?;
    let last_day_of_current_month = first_day_of_next_month - Duration::days(1);
    Some(last_day_of_current_month.day())
}

/// Converts a polars physical date value (days since 1970-01-01) into a `NaiveDate`.
pub(crate) fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2020, 2), Some(29));
        assert_eq!(days_in_month(2021, 2), Some(28));
        assert_eq!(days_in_month(2021, 12), Some(31));
        assert_eq!(days_in_month(2021, 13), None);
    }

    #[test]
    fn test_date_from_epoch_days() {
        assert_eq!(
            date_from_epoch_days(0),
            NaiveDate::from_ymd_opt(1970, 1, 1)
        );
        assert_eq!(
            date_from_epoch_days(18262),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
    }
}
