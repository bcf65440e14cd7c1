use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::calendar::{first_of_month, last_of_month};
use super::occurrence::BudgetOccurrence;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Month,
    Quarter,
    Year,
}

/// Inclusive date range of one summary period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodBounds {
    pub kind: PeriodKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl PeriodBounds {
    /// The period of `kind` that contains `date`.
    pub fn containing(kind: PeriodKind, date: NaiveDate) -> Self {
        match kind {
            PeriodKind::Month => Self {
                kind,
                start: first_of_month(date),
                end: last_of_month(date),
                label: date.format("%B %Y").to_string(),
            },
            PeriodKind::Quarter => {
                let first_month = date.month0() / 3 * 3 + 1;
                let start = NaiveDate::from_ymd_opt(date.year(), first_month, 1)
                    .unwrap_or_else(|| first_of_month(date));
                let last_month_day = NaiveDate::from_ymd_opt(date.year(), first_month + 2, 1)
                    .unwrap_or(start);
                Self {
                    kind,
                    start,
                    end: last_of_month(last_month_day),
                    label: format!("Q{} {}", date.month0() / 3 + 1, date.year()),
                }
            }
            PeriodKind::Year => Self {
                kind,
                start: NaiveDate::from_ymd_opt(date.year(), 1, 1)
                    .unwrap_or_else(|| first_of_month(date)),
                end: NaiveDate::from_ymd_opt(date.year(), 12, 31)
                    .unwrap_or_else(|| last_of_month(date)),
                label: date.year().to_string(),
            },
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn next(&self) -> Self {
        Self::containing(self.kind, self.end + Duration::days(1))
    }

    pub fn previous(&self) -> Self {
        Self::containing(self.kind, self.start - Duration::days(1))
    }
}

/// Planned versus paid totals for the occurrences falling inside one period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub bounds: PeriodBounds,
    pub total_expense: f64,
    pub total_income: f64,
    pub expense_paid: f64,
    pub income_paid: f64,
    pub occurrence_count: usize,
}

impl PeriodSummary {
    /// Sums `occurrences` whose due date lies within `bounds`. Expense figures are magnitudes.
    pub fn compute(bounds: PeriodBounds, occurrences: &[BudgetOccurrence<'_>]) -> Self {
        let mut summary = PeriodSummary {
            bounds: bounds.clone(),
            total_expense: 0.0,
            total_income: 0.0,
            expense_paid: 0.0,
            income_paid: 0.0,
            occurrence_count: 0,
        };
        for occurrence in occurrences
            .iter()
            .filter(|occurrence| bounds.contains(occurrence.due_date))
        {
            summary.occurrence_count += 1;
            let target = occurrence.target();
            if target < 0.0 {
                summary.total_expense += target.abs();
                summary.expense_paid += occurrence.amount_paid.abs();
            } else {
                summary.total_income += target;
                summary.income_paid += occurrence.amount_paid;
            }
        }
        summary
    }

    pub fn net_planned(&self) -> f64 {
        self.total_income - self.total_expense
    }

    pub fn net_paid(&self) -> f64 {
        self.income_paid - self.expense_paid
    }
}
