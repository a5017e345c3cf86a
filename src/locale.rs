use std::borrow::Cow;

use chrono::Weekday;
use num_traits::FromPrimitive;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const WEEKDAYS_ABBREV: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Month and weekday names used by the formatter and parser. Weekday
/// tables are Monday-first. Defaults to English.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTable {
    months: [Cow<'static, str>; 12],
    months_abbrev: [Cow<'static, str>; 12],
    weekdays: [Cow<'static, str>; 7],
    weekdays_abbrev: [Cow<'static, str>; 7],
}

impl Default for LocaleTable {
    fn default() -> Self {
        LocaleTable::english()
    }
}

impl LocaleTable {
    pub fn english() -> Self {
        LocaleTable {
            months: MONTHS.map(Cow::Borrowed),
            months_abbrev: MONTHS_ABBREV.map(Cow::Borrowed),
            weekdays: WEEKDAYS.map(Cow::Borrowed),
            weekdays_abbrev: WEEKDAYS_ABBREV.map(Cow::Borrowed),
        }
    }

    /// Builds a table from owned names, weekdays Monday first.
    pub fn with_names(
        months: [String; 12],
        months_abbrev: [String; 12],
        weekdays: [String; 7],
        weekdays_abbrev: [String; 7],
    ) -> Self {
        LocaleTable {
            months: months.map(Cow::Owned),
            months_abbrev: months_abbrev.map(Cow::Owned),
            weekdays: weekdays.map(Cow::Owned),
            weekdays_abbrev: weekdays_abbrev.map(Cow::Owned),
        }
    }

    /// Full name of a month given as 1..=12.
    pub fn month_name(&self, month: u32) -> &str {
        &self.months[month as usize - 1]
    }

    pub fn month_abbrev(&self, month: u32) -> &str {
        &self.months_abbrev[month as usize - 1]
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &str {
        &self.weekdays[weekday.num_days_from_monday() as usize]
    }

    pub fn weekday_abbrev(&self, weekday: Weekday) -> &str {
        &self.weekdays_abbrev[weekday.num_days_from_monday() as usize]
    }

    /// Finds the month whose name prefixes `input` (ASCII
    /// case-insensitive, longest match). Returns the month number and
    /// the matched byte length.
    pub(crate) fn match_month(&self, input: &str, abbrev: bool) -> Option<(u32, usize)> {
        let table = if abbrev {
            &self.months_abbrev
        } else {
            &self.months
        };

        match_name(table, input).map(|(idx, len)| (idx as u32 + 1, len))
    }

    pub(crate) fn match_weekday(&self, input: &str, abbrev: bool) -> Option<(Weekday, usize)> {
        let table = if abbrev {
            &self.weekdays_abbrev
        } else {
            &self.weekdays
        };

        match_name(table, input).map(|(idx, len)| (Weekday::from_usize(idx).unwrap(), len))
    }
}

fn match_name(table: &[Cow<'static, str>], input: &str) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;

    for (idx, name) in table.iter().enumerate() {
        let len = name.len();
        let prefix = match input.get(..len) {
            Some(prefix) => prefix,
            None => continue,
        };
        if prefix.eq_ignore_ascii_case(name) && best.map_or(true, |(_, l)| len > l) {
            best = Some((idx, len));
        }
    }

    best
}
