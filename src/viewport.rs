use std::cmp::Ordering;

use chrono::{Duration, Month, Weekday};
use num_traits::FromPrimitive;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::calendar::{self, CalendarDate};
use crate::error::InvalidViewport;

/// The month currently shown in the grid. Navigated independently of
/// the selection; constraints never gate paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    month: Month,
    year: i32,
}

impl Viewport {
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidViewport> {
        Month::from_u32(month)
            .map(|month| Viewport { month, year })
            .ok_or(InvalidViewport { month })
    }

    /// The month containing `date`.
    pub fn of(date: CalendarDate) -> Self {
        Viewport {
            month: Month::from_u32(date.month()).unwrap(),
            year: date.year(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn month_number(&self) -> u32 {
        self.month.number_from_month()
    }

    pub fn next(self) -> Self {
        let next = self.month.succ();

        Viewport {
            month: next,
            year: if next.number_from_month() == 1 {
                self.year + 1
            } else {
                self.year
            },
        }
    }

    pub fn previous(self) -> Self {
        let prev = self.month.pred();

        Viewport {
            month: prev,
            year: if prev.number_from_month() == 12 {
                self.year - 1
            } else {
                self.year
            },
        }
    }

    pub fn jump_to(&mut self, year: i32, month: u32) -> Result<(), InvalidViewport> {
        *self = Viewport::new(year, month)?;
        Ok(())
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month_number()
    }

    pub fn first_day(&self) -> CalendarDate {
        CalendarDate::new(self.year, self.month_number(), 1).unwrap()
    }

    pub fn last_day(&self) -> CalendarDate {
        let month = self.month_number();
        CalendarDate::new(self.year, month, calendar::days_in_month(self.year, month)).unwrap()
    }

    /// All days of the visible month in order.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> {
        let first = self.first_day();
        (0..calendar::days_in_month(self.year, self.month_number()))
            .map(move |offset| first + Duration::days(offset as i64))
    }

    pub fn grid(&self, week_start: Weekday) -> Vec<CalendarDate> {
        calendar::build_month_grid(self.year, self.month_number(), week_start)
    }
}

impl PartialOrd for Viewport {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Viewport {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month_number()).cmp(&(other.year, other.month_number()))
    }
}

impl Serialize for Viewport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Viewport", 2)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("month", &self.month_number())?;
        state.end()
    }
}
