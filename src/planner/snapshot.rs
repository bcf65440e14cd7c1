use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    find_by_id, Account, Bucket, Budget, Category, NamedEntity, Recipient, Transaction,
};
use crate::errors::{CoreError, CoreResult};
use crate::ledger::{build_occurrences, BudgetOccurrence, Calendar};
use crate::storage::LedgerStore;

/// Every collection of the ledger, read in one pass. Occurrences are derived from this on
/// demand and borrow from it.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub budgets: Vec<Budget>,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub buckets: Vec<Bucket>,
    pub recipients: Vec<Recipient>,
    pub accounts: Vec<Account>,
}

impl LedgerSnapshot {
    /// Issues all list reads concurrently and fails if any of them fails.
    pub async fn load(store: &dyn LedgerStore) -> CoreResult<Self> {
        let (budgets, transactions, categories, buckets, recipients, accounts) = tokio::try_join!(
            store.list_budgets(),
            store.list_transactions(),
            store.list_categories(),
            store.list_buckets(),
            store.list_recipients(),
            store.list_accounts(),
        )?;
        tracing::debug!(
            budgets = budgets.len(),
            transactions = transactions.len(),
            "ledger snapshot loaded"
        );
        Ok(Self {
            budgets,
            transactions,
            categories,
            buckets,
            recipients,
            accounts,
        })
    }

    pub fn budget(&self, id: Uuid) -> CoreResult<&Budget> {
        find_by_id(&self.budgets, id).ok_or(CoreError::BudgetNotFound(id))
    }

    pub fn transaction(&self, id: Uuid) -> CoreResult<&Transaction> {
        find_by_id(&self.transactions, id).ok_or(CoreError::TransactionNotFound(id))
    }

    pub fn category_name(&self, id: Uuid) -> Option<&str> {
        find_by_id(&self.categories, id).map(NamedEntity::name)
    }

    pub fn recipient_name(&self, id: Uuid) -> Option<&str> {
        find_by_id(&self.recipients, id).map(NamedEntity::name)
    }

    pub fn account_name(&self, id: Uuid) -> Option<&str> {
        find_by_id(&self.accounts, id).map(NamedEntity::name)
    }

    pub fn bucket_for_category(&self, category_id: Uuid) -> Option<&Bucket> {
        let bucket_id = find_by_id(&self.categories, category_id)?.bucket_id?;
        find_by_id(&self.buckets, bucket_id)
    }

    /// Transactions linked to `budget_id`, whichever occurrence they settle.
    pub fn linked_transactions(&self, budget_id: Uuid) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |txn| txn.budget_id == Some(budget_id))
    }

    pub fn occurrences(&self, calendar: &Calendar, horizon: NaiveDate) -> Vec<BudgetOccurrence<'_>> {
        build_occurrences(&self.budgets, &self.transactions, calendar, horizon)
    }
}
