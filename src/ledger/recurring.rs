use std::iter::FusedIterator;

use chrono::{Days, NaiveDate};

use super::calendar::{shift_month_to_day, shift_year};
use crate::domain::{Budget, Frequency};

/// Upper bound on due dates produced for one budget, whatever the horizon.
pub const MAX_OCCURRENCES: usize = 50;

/// Lazy sequence of a budget's due dates, from its anchor up to a horizon.
///
/// Each date is computed from the anchor and the step index rather than from the previous
/// date, so month-end clamping never drifts. Cloning restarts from the current position;
/// [`DueDates::for_budget`] restarts from the anchor.
#[derive(Debug, Clone)]
pub struct DueDates {
    anchor: NaiveDate,
    frequency: Frequency,
    horizon: NaiveDate,
    index: usize,
}

impl DueDates {
    pub fn new(anchor: NaiveDate, frequency: Frequency, horizon: NaiveDate) -> Self {
        Self {
            anchor,
            frequency,
            horizon,
            index: 0,
        }
    }

    pub fn for_budget(budget: &Budget, horizon: NaiveDate) -> Self {
        Self::new(budget.due_date, budget.frequency, horizon)
    }

    fn nth_date(&self, step: usize) -> Option<NaiveDate> {
        if step == 0 {
            return Some(self.anchor);
        }
        match self.frequency {
            Frequency::Once => None,
            Frequency::Monthly { day_of_month: None } => None,
            Frequency::Daily => add_days(self.anchor, step, 1),
            Frequency::Weekly => add_days(self.anchor, step, 7),
            Frequency::Custom { interval_days } => add_days(self.anchor, step, interval_days),
            Frequency::Monthly {
                day_of_month: Some(day),
            } => shift_month_to_day(self.anchor, step as i64, day),
            Frequency::Yearly => shift_year(self.anchor, step as i32),
        }
    }

    fn stop(&mut self) {
        self.index = MAX_OCCURRENCES;
    }
}

fn add_days(anchor: NaiveDate, step: usize, interval: u32) -> Option<NaiveDate> {
    let offset = (step as u64).checked_mul(interval as u64)?;
    anchor.checked_add_days(Days::new(offset))
}

impl Iterator for DueDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.index >= MAX_OCCURRENCES {
            return None;
        }
        let Some(date) = self.nth_date(self.index) else {
            self.stop();
            return None;
        };
        // One-off budgets always surface their single date.
        if self.frequency != Frequency::Once && date > self.horizon {
            self.stop();
            return None;
        }
        self.index += 1;
        Some(date)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(MAX_OCCURRENCES.saturating_sub(self.index)))
    }
}

impl FusedIterator for DueDates {}

/// Whether `date` is one of the budget's due dates, searching no further than `date` itself.
pub fn is_due_on(budget: &Budget, date: NaiveDate) -> bool {
    DueDates::for_budget(budget, date).any(|due| due == date)
}

/// Latest due date at or before `date`, falling back to the anchor when `date` precedes it.
pub fn latest_due_on_or_before(budget: &Budget, date: NaiveDate) -> NaiveDate {
    DueDates::for_budget(budget, date)
        .take_while(|due| *due <= date)
        .last()
        .unwrap_or(budget.due_date)
}
