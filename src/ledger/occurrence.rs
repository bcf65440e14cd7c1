use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use super::calendar::Calendar;
use super::recurring::DueDates;
use super::time_group::TimeGroup;
use crate::domain::{Budget, Transaction};

/// Payments within this distance of the target are not reported as overpaid.
const OVERPAY_TOLERANCE: f64 = 0.005;

/// How far an occurrence's payments have progressed towards its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    Unpaid,
    Partial,
    Paid,
    Overpaid,
}

/// One scheduled instance of a budget joined with the transactions that settle it.
///
/// Occurrences are derived on every query and borrow from the collections they were built
/// from; they are never stored or patched in place.
#[derive(Debug, Clone)]
pub struct BudgetOccurrence<'a> {
    pub budget_id: Uuid,
    pub budget: &'a Budget,
    pub due_date: NaiveDate,
    pub amount_paid: f64,
    pub is_completed: bool,
    /// `None` when the occurrence is hidden from every display bucket.
    pub time_group: Option<TimeGroup>,
    pub linked_transactions: Vec<&'a Transaction>,
}

impl<'a> BudgetOccurrence<'a> {
    pub fn target(&self) -> f64 {
        self.budget.target()
    }

    pub fn is_expense(&self) -> bool {
        self.budget.is_expense()
    }

    /// Signed amount still owed for this occurrence. Zero or past-target once settled.
    pub fn remaining(&self) -> f64 {
        self.target() - self.amount_paid
    }

    pub fn payment_state(&self) -> PaymentState {
        let (target, paid) = if self.is_expense() {
            (-self.target(), -self.amount_paid)
        } else {
            (self.target(), self.amount_paid)
        };
        if paid - target > OVERPAY_TOLERANCE {
            PaymentState::Overpaid
        } else if self.is_completed {
            PaymentState::Paid
        } else if paid <= 0.0 {
            PaymentState::Unpaid
        } else {
            PaymentState::Partial
        }
    }
}

/// Completion rule: expenses settle once at least as negative as the target, income once
/// at least as large.
pub fn is_settled(target: f64, amount_paid: f64) -> bool {
    if target < 0.0 {
        amount_paid <= target
    } else {
        amount_paid >= target
    }
}

type LinkIndex<'a> = HashMap<(Uuid, NaiveDate), Vec<&'a Transaction>>;

fn index_links(transactions: &[Transaction]) -> LinkIndex<'_> {
    let mut index: LinkIndex<'_> = HashMap::new();
    for txn in transactions {
        if let (Some(budget_id), Some(occurrence_date)) = (txn.budget_id, txn.occurrence_date) {
            index.entry((budget_id, occurrence_date)).or_default().push(txn);
        }
    }
    index
}

fn assemble<'a>(
    budget: &'a Budget,
    due_date: NaiveDate,
    linked_transactions: Vec<&'a Transaction>,
    calendar: &Calendar,
) -> BudgetOccurrence<'a> {
    let amount_paid: f64 = linked_transactions.iter().map(|txn| txn.total()).sum();
    let is_completed = is_settled(budget.target(), amount_paid);
    let time_group = TimeGroup::classify(due_date, calendar, is_completed, budget.is_flexible);
    BudgetOccurrence {
        budget_id: budget.id,
        budget,
        due_date,
        amount_paid,
        is_completed,
        time_group,
        linked_transactions,
    }
}

/// Builds the occurrence for a single due date of `budget`.
pub fn aggregate<'a>(
    budget: &'a Budget,
    due_date: NaiveDate,
    transactions: &'a [Transaction],
    calendar: &Calendar,
) -> BudgetOccurrence<'a> {
    let linked = transactions
        .iter()
        .filter(|txn| txn.settles(budget.id, due_date))
        .collect();
    assemble(budget, due_date, linked, calendar)
}

/// Expands one budget into its occurrences up to `horizon`. Inactive budgets yield nothing.
pub fn budget_occurrences<'a>(
    budget: &'a Budget,
    transactions: &'a [Transaction],
    calendar: &Calendar,
    horizon: NaiveDate,
) -> Vec<BudgetOccurrence<'a>> {
    if !budget.is_active {
        return Vec::new();
    }
    DueDates::for_budget(budget, horizon)
        .map(|due_date| aggregate(budget, due_date, transactions, calendar))
        .collect()
}

/// Expands every active budget into occurrences and joins each with its linked transactions.
pub fn build_occurrences<'a>(
    budgets: &'a [Budget],
    transactions: &'a [Transaction],
    calendar: &Calendar,
    horizon: NaiveDate,
) -> Vec<BudgetOccurrence<'a>> {
    let links = index_links(transactions);
    let mut occurrences = Vec::new();
    for budget in budgets.iter().filter(|budget| budget.is_active) {
        for due_date in DueDates::for_budget(budget, horizon) {
            // Zero-interval budgets can repeat a date; each copy sees the same payments.
            let linked = links
                .get(&(budget.id, due_date))
                .cloned()
                .unwrap_or_default();
            occurrences.push(assemble(budget, due_date, linked, calendar));
        }
    }
    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Frequency;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar() -> Calendar {
        Calendar::new(date(2026, 3, 10), Weekday::Mon)
    }

    fn rent() -> Budget {
        Budget::new(
            "Rent",
            -1200.0,
            Frequency::monthly_on(1),
            date(2026, 1, 1),
            Uuid::new_v4(),
        )
    }

    fn payment(budget: &Budget, due: NaiveDate, amount: f64) -> Transaction {
        Transaction::new("Rent payment", amount, due, budget.category_id)
            .linked_to(budget.id, due)
    }

    #[test]
    fn sums_only_transactions_for_the_exact_occurrence() {
        let budget = rent();
        let transactions = vec![
            payment(&budget, date(2026, 1, 1), -700.0),
            payment(&budget, date(2026, 1, 1), -500.0),
            payment(&budget, date(2026, 2, 1), -100.0),
            Transaction::new("Unlinked", -50.0, date(2026, 1, 1), budget.category_id),
        ];

        let occurrence = aggregate(&budget, date(2026, 1, 1), &transactions, &calendar());
        assert_eq!(occurrence.amount_paid, -1200.0);
        assert!(occurrence.is_completed);
        assert_eq!(occurrence.linked_transactions.len(), 2);
        assert_eq!(occurrence.payment_state(), PaymentState::Paid);

        let february = aggregate(&budget, date(2026, 2, 1), &transactions, &calendar());
        assert_eq!(february.amount_paid, -100.0);
        assert!(!february.is_completed);
        assert_eq!(february.payment_state(), PaymentState::Partial);
        assert_eq!(february.remaining(), -1100.0);
    }

    #[test]
    fn transaction_cost_counts_towards_payment_and_target() {
        let budget = rent().with_transaction_cost(-2.0);
        let transactions =
            vec![payment(&budget, date(2026, 1, 1), -1200.0).with_transaction_cost(-1.0)];
        let occurrence = aggregate(&budget, date(2026, 1, 1), &transactions, &calendar());
        assert_eq!(occurrence.amount_paid, -1201.0);
        assert_eq!(occurrence.target(), -1202.0);
        assert!(!occurrence.is_completed);
    }

    #[test]
    fn expense_completion_is_monotonic_in_magnitude() {
        let target = -200.0;
        assert!(!is_settled(target, 0.0));
        assert!(!is_settled(target, -199.99));
        assert!(is_settled(target, -200.0));
        assert!(is_settled(target, -250.0));
        assert!(is_settled(target, -10_000.0));
    }

    #[test]
    fn income_completion_requires_reaching_target() {
        assert!(!is_settled(3000.0, 1000.0));
        assert!(is_settled(3000.0, 3000.0));
        assert!(is_settled(0.0, 0.0));
    }

    #[test]
    fn overpayment_is_reported_not_clamped() {
        let budget = rent();
        let transactions = vec![payment(&budget, date(2026, 1, 1), -1500.0)];
        let occurrence = aggregate(&budget, date(2026, 1, 1), &transactions, &calendar());
        assert_eq!(occurrence.amount_paid, -1500.0);
        assert!(occurrence.is_completed);
        assert_eq!(occurrence.payment_state(), PaymentState::Overpaid);
    }

    #[test]
    fn unpaid_income_is_unpaid() {
        let salary = Budget::new(
            "Salary",
            3000.0,
            Frequency::Once,
            date(2026, 3, 25),
            Uuid::new_v4(),
        );
        let occurrence = aggregate(&salary, date(2026, 3, 25), &[], &calendar());
        assert_eq!(occurrence.payment_state(), PaymentState::Unpaid);
    }

    #[test]
    fn inactive_budgets_produce_no_occurrences() {
        let mut budget = rent();
        budget.is_active = false;
        let budgets = vec![budget];
        let occurrences = build_occurrences(&budgets, &[], &calendar(), date(2026, 12, 31));
        assert!(occurrences.is_empty());
        assert!(budget_occurrences(&budgets[0], &[], &calendar(), date(2026, 12, 31)).is_empty());
    }

    #[test]
    fn build_matches_per_occurrence_aggregation() {
        let budget = rent();
        let transactions = vec![
            payment(&budget, date(2026, 1, 1), -1200.0),
            payment(&budget, date(2026, 3, 1), -600.0),
        ];
        let budgets = vec![budget];
        let horizon = date(2026, 6, 30);
        let built = build_occurrences(&budgets, &transactions, &calendar(), horizon);
        let single = budget_occurrences(&budgets[0], &transactions, &calendar(), horizon);
        assert_eq!(built.len(), 6);
        assert_eq!(built.len(), single.len());
        for (a, b) in built.iter().zip(single.iter()) {
            assert_eq!(a.due_date, b.due_date);
            assert_eq!(a.amount_paid, b.amount_paid);
            assert_eq!(a.is_completed, b.is_completed);
        }
    }
}
