//! Day-level date arithmetic and the injected "today" used for classification.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::planner::time::Clock;

/// Reference point for bucketing: the current day and the configured first weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    today: NaiveDate,
    week_start: Weekday,
}

impl Calendar {
    pub fn new(today: NaiveDate, week_start: Weekday) -> Self {
        Self { today, week_start }
    }

    pub fn from_clock(clock: &dyn Clock, week_start: Weekday) -> Self {
        Self::new(clock.today(), week_start)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// First day of the week containing today.
    pub fn start_of_week(&self) -> NaiveDate {
        let current = self.today.weekday().num_days_from_monday() as i64;
        let first = self.week_start.num_days_from_monday() as i64;
        let offset = (current - first).rem_euclid(7);
        self.today - Duration::days(offset)
    }

    pub fn start_of_next_week(&self) -> NaiveDate {
        self.start_of_week() + Duration::days(7)
    }

    pub fn start_of_week_after_next(&self) -> NaiveDate {
        self.start_of_week() + Duration::days(14)
    }

    pub fn is_current_month(&self, date: NaiveDate) -> bool {
        date.year() == self.today.year() && date.month() == self.today.month()
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Builds a date, pulling `day` back to the month's last day when the month is shorter.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
}

/// Splits a zero-based absolute month index back into a year and a 1-based month.
pub fn from_month_index(index: i64) -> (i32, u32) {
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    (year, month)
}

pub fn month_index(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

/// Moves `months` calendar months from `date`, landing on `day` clamped to the target month.
pub fn shift_month_to_day(date: NaiveDate, months: i64, day: u32) -> Option<NaiveDate> {
    let (year, month) = from_month_index(month_index(date) + months);
    clamped_date(year, month, day)
}

pub fn shift_year(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    clamped_date(date.year() + years, date.month(), date.day())
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date) + Duration::days(days_in_month(date.year(), date.month()) as i64 - 1)
}
