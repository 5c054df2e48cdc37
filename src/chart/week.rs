//! Chart week arithmetic
//!
//! The chart publishes once a week, dated on a Saturday. An arbitrary
//! calendar date is snapped to the Saturday on or before it, which is the
//! most recent week already published at that date.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Snaps a date to the chart week containing it (Saturday on or before)
///
/// # Example
///
/// ```
/// use chartlink::chart::chart_week;
/// use chrono::NaiveDate;
///
/// let wednesday = NaiveDate::from_ymd_opt(2022, 7, 20).unwrap();
/// let week = chart_week(wednesday);
/// assert_eq!(week, NaiveDate::from_ymd_opt(2022, 7, 16).unwrap());
/// ```
pub fn chart_week(date: NaiveDate) -> NaiveDate {
    // Monday = 0 .. Sunday = 6, so Saturday = 5
    let days_since_saturday = (date.weekday().num_days_from_monday() + 2) % 7;
    date - Duration::days(i64::from(days_since_saturday))
}

/// All chart weeks (Saturdays) within the given month, in order
///
/// Returns an empty list for an invalid year/month combination.
pub fn chart_weeks_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut weeks = Vec::new();

    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return weeks;
    };

    let offset = (Weekday::Sat.num_days_from_monday() + 7
        - first.weekday().num_days_from_monday())
        % 7;
    let mut day = first + Duration::days(i64::from(offset));

    while day.month() == month {
        weeks.push(day);
        day += Duration::days(7);
    }

    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_saturday_is_unchanged() {
        assert_eq!(chart_week(date(2022, 7, 16)), date(2022, 7, 16));
    }

    #[test]
    fn test_midweek_snaps_back() {
        // 2022-07-20 was a Wednesday
        assert_eq!(chart_week(date(2022, 7, 20)), date(2022, 7, 16));
    }

    #[test]
    fn test_sunday_snaps_to_previous_day() {
        // 2022-07-17 was a Sunday
        assert_eq!(chart_week(date(2022, 7, 17)), date(2022, 7, 16));
    }

    #[test]
    fn test_friday_snaps_almost_a_week() {
        // 2022-07-22 was a Friday
        assert_eq!(chart_week(date(2022, 7, 22)), date(2022, 7, 16));
    }

    #[test]
    fn test_snap_crosses_month_boundary() {
        // 2022-08-01 was a Monday; the prior Saturday was in July
        assert_eq!(chart_week(date(2022, 8, 1)), date(2022, 7, 30));
    }

    #[test]
    fn test_weeks_in_month() {
        let weeks = chart_weeks_in_month(2022, 7);
        let days: Vec<u32> = weeks.iter().map(|d| d.day()).collect();
        assert_eq!(days, vec![2, 9, 16, 23, 30]);
    }

    #[test]
    fn test_weeks_in_short_month() {
        // February 2015 started on a Sunday
        let weeks = chart_weeks_in_month(2015, 2);
        let days: Vec<u32> = weeks.iter().map(|d| d.day()).collect();
        assert_eq!(days, vec![7, 14, 21, 28]);
    }

    #[test]
    fn test_invalid_month_is_empty() {
        assert!(chart_weeks_in_month(2022, 13).is_empty());
    }
}
