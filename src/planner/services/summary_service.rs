use crate::config::Config;
use crate::ledger::{PeriodBounds, PeriodKind, PeriodSummary};
use crate::planner::{snapshot::LedgerSnapshot, time::Clock};

pub struct SummaryService;

impl SummaryService {
    /// Totals for the period of `kind` containing today.
    pub fn current(
        snapshot: &LedgerSnapshot,
        kind: PeriodKind,
        clock: &dyn Clock,
        config: &Config,
    ) -> PeriodSummary {
        let bounds = PeriodBounds::containing(kind, clock.today());
        Self::for_period(snapshot, bounds, clock, config)
    }

    /// Totals for arbitrary bounds. Generation reaches at least the end of the period.
    pub fn for_period(
        snapshot: &LedgerSnapshot,
        bounds: PeriodBounds,
        clock: &dyn Clock,
        config: &Config,
    ) -> PeriodSummary {
        let calendar = config.calendar(clock);
        let horizon = config.horizon(calendar.today()).max(bounds.end);
        let occurrences = snapshot.occurrences(&calendar, horizon);
        let summary = PeriodSummary::compute(bounds, &occurrences);
        tracing::debug!(
            period = %summary.bounds.label,
            occurrences = summary.occurrence_count,
            "period summary computed"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Budget, Category, Frequency, Transaction};
    use crate::planner::time::FixedClock;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn later_periods_extend_generation_past_the_horizon() {
        let category = Category::new("Housing");
        let rent = Budget::new(
            "Rent",
            -1000.0,
            Frequency::monthly_on(1),
            date(2026, 1, 1),
            category.id,
        );
        let snapshot = LedgerSnapshot {
            budgets: vec![rent],
            categories: vec![category],
            ..LedgerSnapshot::default()
        };
        let clock = FixedClock::new(date(2026, 3, 15));
        let config = Config {
            horizon_days: 10,
            ..Config::default()
        };
        let bounds = PeriodBounds::containing(PeriodKind::Month, date(2026, 6, 1));
        let summary = SummaryService::for_period(&snapshot, bounds, &clock, &config);
        assert_eq!(summary.total_expense, 1000.0);
        assert_eq!(summary.occurrence_count, 1);
    }

    #[test]
    fn current_year_counts_paid_and_planned() {
        let category = Category::new("Income");
        let salary = Budget::new(
            "Salary",
            2000.0,
            Frequency::monthly_on(25),
            date(2026, 1, 25),
            category.id,
        );
        let paid = Transaction::new("Salary", 2000.0, date(2026, 1, 25), category.id)
            .linked_to(salary.id, date(2026, 1, 25));
        let snapshot = LedgerSnapshot {
            budgets: vec![salary],
            transactions: vec![paid],
            ..LedgerSnapshot::default()
        };
        let clock = FixedClock::new(date(2026, 2, 1));
        let summary = SummaryService::current(&snapshot, PeriodKind::Year, &clock, &Config::default());
        assert_eq!(summary.total_income, 24_000.0);
        assert_eq!(summary.income_paid, 2000.0);
        assert_eq!(summary.net_paid(), 2000.0);
    }
}
