use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

/// Returns true for Monday–Friday, false for Saturday/Sunday.
pub fn is_workday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_working_day(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    is_workday(date) && !holidays.contains(&date)
}

/// Working days in `[start, end]`, both ends inclusive, in date order.
pub fn working_dates(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &HashSet<NaiveDate>,
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        if is_working_day(current, holidays) {
            dates.push(current);
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

/// Counts working days in `[start, end]`, both ends inclusive.
/// An inverted range counts as zero.
pub fn working_days(start: NaiveDate, end: NaiveDate, holidays: &HashSet<NaiveDate>) -> u32 {
    working_dates(start, end, holidays).len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn none() -> HashSet<NaiveDate> {
        HashSet::new()
    }

    #[test]
    fn test_is_workday_for_each_weekday() {
        // 2025-01-06 is Monday
        let monday = d(2025, 1, 6);
        for offset in 0..5 {
            assert!(is_workday(monday + Duration::days(offset)));
        }
        assert!(!is_workday(d(2025, 1, 11)));
        assert!(!is_workday(d(2025, 1, 12)));
    }

    #[test]
    fn test_single_weekday_counts_one() {
        assert_eq!(working_days(d(2024, 7, 3), d(2024, 7, 3), &none()), 1);
    }

    #[test]
    fn test_single_weekend_day_counts_zero() {
        assert_eq!(working_days(d(2024, 7, 6), d(2024, 7, 6), &none()), 0);
    }

    #[test]
    fn test_full_week_is_five_in_any_year() {
        for year in [1999, 2000, 2023, 2024, 2031] {
            let mut monday = d(year, 3, 1);
            while monday.weekday() != Weekday::Mon {
                monday = monday.succ_opt().unwrap();
            }
            let sunday = monday + Duration::days(6);
            assert_eq!(working_days(monday, sunday, &none()), 5, "{year}");
        }
    }

    #[test]
    fn test_inverted_range_is_zero() {
        assert_eq!(working_days(d(2024, 7, 5), d(2024, 7, 1), &none()), 0);
        assert!(working_dates(d(2024, 7, 5), d(2024, 7, 1), &none()).is_empty());
    }

    #[test]
    fn test_holidays_are_excluded() {
        let holidays: HashSet<_> = [d(2024, 7, 4)].into_iter().collect();
        assert_eq!(working_days(d(2024, 7, 1), d(2024, 7, 5), &holidays), 4);
        assert!(!is_working_day(d(2024, 7, 4), &holidays));
    }

    #[test]
    fn test_leap_day_and_year_boundary() {
        // 2024-02-26 (Mon) .. 2024-03-01 (Fri) spans 29 Feb
        assert_eq!(working_days(d(2024, 2, 26), d(2024, 3, 1), &none()), 5);
        // 2024-12-30 (Mon) .. 2025-01-03 (Fri)
        assert_eq!(working_days(d(2024, 12, 30), d(2025, 1, 3), &none()), 5);
        // whole leap year: 366 days, 262 weekdays
        assert_eq!(working_days(d(2024, 1, 1), d(2024, 12, 31), &none()), 262);
    }

    #[test]
    fn test_working_dates_matches_count() {
        let holidays: HashSet<_> = [d(2024, 12, 25), d(2024, 12, 26)].into_iter().collect();
        let dates = working_dates(d(2024, 12, 23), d(2025, 1, 3), &holidays);
        assert_eq!(dates.len() as u32, working_days(d(2024, 12, 23), d(2025, 1, 3), &holidays));
        assert_eq!(dates.first(), Some(&d(2024, 12, 23)));
        assert!(!dates.contains(&d(2024, 12, 25)));
    }
}
