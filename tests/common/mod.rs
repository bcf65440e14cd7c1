#![allow(dead_code)]

use budget_planner::domain::{Budget, Category, Frequency, Recipient, Transaction};
use budget_planner::planner::FixedClock;
use budget_planner::storage::{LedgerData, MemoryStore};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Saturday 2026-10-17.
pub fn clock() -> FixedClock {
    FixedClock::new(date(2026, 10, 17))
}

/// Reference records shared by the scenarios.
pub struct Fixture {
    pub housing: Category,
    pub income: Category,
    pub food: Category,
    pub landlord: Recipient,
    pub employer: Recipient,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            housing: Category::new("Housing"),
            income: Category::new("Income"),
            food: Category::new("Food"),
            landlord: Recipient::new("Landlord"),
            employer: Recipient::new("Employer"),
        }
    }

    pub fn rent(&self, anchor: NaiveDate) -> Budget {
        Budget::new("Rent", -1200.0, Frequency::monthly_on(1), anchor, self.housing.id)
            .with_recipient(self.landlord.id)
    }

    pub fn salary(&self, anchor: NaiveDate) -> Budget {
        Budget::new("Salary", 3000.0, Frequency::monthly_on(25), anchor, self.income.id)
            .with_recipient(self.employer.id)
    }

    pub fn payment(&self, budget: &Budget, due: NaiveDate, amount: f64) -> Transaction {
        Transaction::new(budget.description.clone(), amount, due, budget.category_id)
            .linked_to(budget.id, due)
    }

    pub fn store(&self, budgets: Vec<Budget>, transactions: Vec<Transaction>) -> MemoryStore {
        MemoryStore::new(LedgerData {
            budgets,
            transactions,
            categories: vec![self.housing.clone(), self.income.clone(), self.food.clone()],
            recipients: vec![self.landlord.clone(), self.employer.clone()],
            ..LedgerData::default()
        })
    }
}
