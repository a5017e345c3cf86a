use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use itertools::iterate;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::error::{InvalidDate, ParseError, ParseErrorKind};

/// Cells in a rendered month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

pub const DAYS_PER_WEEK: u32 = 7;

/// A validated Gregorian day without time-of-day. Ordering is
/// chronological; construction of a non-existent day fails instead of
/// clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, InvalidDate> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or(InvalidDate { year, month, day })
    }

    pub(crate) fn from_naive(date: NaiveDate) -> Self {
        CalendarDate(date)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Shifts by whole months, clamping the day when the target month
    /// is shorter: Jan 31 + 1 month is Feb 28 (or 29).
    pub fn add_months(self, delta: i32) -> Self {
        let months = self.year() * 12 + self.month() as i32 - 1 + delta;
        let year = months.div_euclid(12);
        let month = (months.rem_euclid(12) + 1) as u32;
        let day = self.day().min(days_in_month(year, month));

        CalendarDate(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }
}

impl Add<Duration> for CalendarDate {
    type Output = CalendarDate;

    fn add(self, rhs: Duration) -> Self::Output {
        CalendarDate(self.0 + rhs)
    }
}

impl Sub<Duration> for CalendarDate {
    type Output = CalendarDate;

    fn sub(self, rhs: Duration) -> Self::Output {
        CalendarDate(self.0 - rhs)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(CalendarDate)
            .map_err(|e| {
                ParseError::new(
                    ParseErrorKind::MalformedText,
                    &format!("not an ISO date: {}", e),
                )
            })
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Length of a month, derived from the distance to the first of the
/// following month. Panics on a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = first_of_month(year, month);
    let next = if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    };

    next.0.signed_duration_since(first.0).num_days() as u32
}

/// Offset (0..=6) of day 1 relative to the configured week start.
pub fn first_weekday_of_month(year: i32, month: u32, week_start: Weekday) -> u32 {
    let first = first_of_month(year, month);

    (DAYS_PER_WEEK + first.weekday().num_days_from_monday() - week_start.num_days_from_monday())
        % DAYS_PER_WEEK
}

/// The 42 consecutive days shown for a month: the month itself, padded
/// with the previous month's tail and the next month's head so the
/// grid is always rectangular. Panics on a month outside 1..=12.
pub fn build_month_grid(year: i32, month: u32, week_start: Weekday) -> Vec<CalendarDate> {
    let offset = first_weekday_of_month(year, month, week_start);
    let start = first_of_month(year, month) - Duration::days(offset as i64);

    iterate(start, |day| *day + Duration::days(1))
        .take(GRID_CELLS)
        .collect()
}

fn first_of_month(year: i32, month: u32) -> CalendarDate {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => CalendarDate(first),
        None => panic!("month out of range: {}-{}", year, month),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));

        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn month_lengths() {
        let lengths: Vec<u32> = (1..=12).map(|m| days_in_month(2023, m)).collect();
        assert_eq!(lengths, [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
    }

    #[test]
    fn out_of_range_day_fails() {
        assert!(CalendarDate::new(2023, 2, 30).is_err());
        assert!(CalendarDate::new(2023, 13, 1).is_err());
        assert!(CalendarDate::new(2023, 0, 1).is_err());
        assert!(CalendarDate::new(2024, 2, 29).is_ok());
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(date(2023, 12, 31) < date(2024, 1, 1));
        assert!(date(2024, 2, 1) < date(2024, 2, 2));
    }

    #[test]
    fn grid_is_42_consecutive_days() {
        for &(year, month) in &[(2024, 2), (2023, 2), (2024, 12), (1999, 1), (2021, 5)] {
            let grid = build_month_grid(year, month, Weekday::Mon);
            assert_eq!(grid.len(), GRID_CELLS);
            for pair in grid.windows(2) {
                assert_eq!(pair[1], pair[0] + Duration::days(1));
            }
            assert!(grid.iter().any(|d| d.month() == month));
        }
    }

    #[test]
    fn grid_starts_on_week_start() {
        let grid = build_month_grid(2024, 4, Weekday::Mon);
        assert_eq!(grid[0], date(2024, 4, 1));

        let grid = build_month_grid(2024, 4, Weekday::Sun);
        assert_eq!(grid[0], date(2024, 3, 31));
        assert_eq!(grid[41], date(2024, 5, 11));
    }

    #[test]
    fn first_weekday_offsets() {
        // September 2024 starts on a Sunday
        assert_eq!(first_weekday_of_month(2024, 9, Weekday::Sun), 0);
        assert_eq!(first_weekday_of_month(2024, 9, Weekday::Mon), 6);
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(date(2024, 1, 31).add_months(1), date(2024, 2, 29));
        assert_eq!(date(2024, 2, 29).add_months(12), date(2025, 2, 28));
        assert_eq!(date(2024, 3, 15).add_months(-3), date(2023, 12, 15));
        assert_eq!(date(2024, 1, 1).add_months(-1), date(2023, 12, 1));
    }

    #[test]
    fn day_arithmetic_crosses_months() {
        assert_eq!(date(2024, 1, 31) + Duration::days(1), date(2024, 2, 1));
        assert_eq!(date(2024, 3, 1) - Duration::days(1), date(2024, 2, 29));
    }

    #[test]
    fn iso_round_trip() {
        let d = date(2024, 7, 9);
        assert_eq!(d.to_string(), "2024-07-09");
        assert_eq!("2024-07-09".parse::<CalendarDate>().unwrap(), d);
        assert!("2024-7-9x".parse::<CalendarDate>().is_err());
    }

    #[test]
    #[should_panic]
    fn grid_panics_on_invalid_month() {
        build_month_grid(2024, 13, Weekday::Mon);
    }
}
