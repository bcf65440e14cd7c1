//! Display buckets for occurrences and the ordering used inside them.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use super::calendar::Calendar;
use super::occurrence::BudgetOccurrence;
use crate::errors::CoreError;

/// Display bucket of an occurrence. The derived ordering is the display order: the fixed
/// buckets first, then future months chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeGroup {
    Overdue,
    ThisWeek,
    NextWeek,
    ThisMonth,
    Month { year: i32, month: u32 },
}

impl TimeGroup {
    /// Picks the bucket for a due date. Past occurrences that are settled, or whose budget
    /// is flexible, are hidden and get `None`.
    pub fn classify(
        due_date: NaiveDate,
        calendar: &Calendar,
        is_completed: bool,
        is_flexible: bool,
    ) -> Option<TimeGroup> {
        if due_date < calendar.today() {
            if is_completed || is_flexible {
                return None;
            }
            return Some(TimeGroup::Overdue);
        }
        if due_date < calendar.start_of_next_week() {
            return Some(TimeGroup::ThisWeek);
        }
        if due_date < calendar.start_of_week_after_next() {
            return Some(TimeGroup::NextWeek);
        }
        if calendar.is_current_month(due_date) {
            return Some(TimeGroup::ThisMonth);
        }
        Some(TimeGroup::Month {
            year: due_date.year(),
            month: due_date.month(),
        })
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeGroup::Overdue => f.write_str("Overdue"),
            TimeGroup::ThisWeek => f.write_str("This Week"),
            TimeGroup::NextWeek => f.write_str("Next Week"),
            TimeGroup::ThisMonth => f.write_str("This Month"),
            TimeGroup::Month { year, month } => match NaiveDate::from_ymd_opt(*year, *month, 1) {
                Some(first) => write!(f, "{}", first.format("%B %Y")),
                None => write!(f, "{}-{:02}", year, month),
            },
        }
    }
}

impl FromStr for TimeGroup {
    type Err = CoreError;

    /// Parses a bucket label, including month labels such as "March 2026".
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let trimmed = label.trim();
        match trimmed {
            "Overdue" => return Ok(TimeGroup::Overdue),
            "This Week" => return Ok(TimeGroup::ThisWeek),
            "Next Week" => return Ok(TimeGroup::NextWeek),
            "This Month" => return Ok(TimeGroup::ThisMonth),
            _ => {}
        }
        NaiveDate::parse_from_str(&format!("01 {}", trimmed), "%d %B %Y")
            .map(|first| TimeGroup::Month {
                year: first.year(),
                month: first.month(),
            })
            .map_err(|_| CoreError::Validation(format!("unknown time group `{}`", trimmed)))
    }
}

/// Ordering inside a bucket: earlier due date first, then income before expenses (smaller
/// absolute amounts first), then description ignoring case.
pub fn compare_occurrences(a: &BudgetOccurrence<'_>, b: &BudgetOccurrence<'_>) -> Ordering {
    a.due_date
        .cmp(&b.due_date)
        .then_with(|| b.budget.is_income().cmp(&a.budget.is_income()))
        .then_with(|| a.budget.amount.abs().total_cmp(&b.budget.amount.abs()))
        .then_with(|| compare_descriptions(&a.budget.description, &b.budget.description))
}

fn compare_descriptions(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Stable sort, so fully equal occurrences keep their input order.
pub fn sort_occurrences(occurrences: &mut [BudgetOccurrence<'_>]) {
    occurrences.sort_by(compare_occurrences);
}

/// A display bucket and its sorted occurrences.
#[derive(Debug, Clone)]
pub struct OccurrenceGroup<'a> {
    pub group: TimeGroup,
    pub occurrences: Vec<BudgetOccurrence<'a>>,
}

impl<'a> OccurrenceGroup<'a> {
    pub fn label(&self) -> String {
        self.group.label()
    }
}

/// Buckets occurrences in display order. Hidden occurrences are dropped.
pub fn group_occurrences<'a>(occurrences: Vec<BudgetOccurrence<'a>>) -> Vec<OccurrenceGroup<'a>> {
    let mut groups: BTreeMap<TimeGroup, Vec<BudgetOccurrence<'a>>> = BTreeMap::new();
    for occurrence in occurrences {
        if let Some(group) = occurrence.time_group {
            groups.entry(group).or_default().push(occurrence);
        }
    }
    groups
        .into_iter()
        .map(|(group, mut occurrences)| {
            sort_occurrences(&mut occurrences);
            OccurrenceGroup { group, occurrences }
        })
        .collect()
}
