use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::LedgerStore;
use crate::domain::{
    Account, Bucket, Budget, BudgetPatch, Category, NewTransaction, Recipient, Transaction,
    TransactionPatch,
};
use crate::errors::{CoreError, CoreResult};

/// Serializable contents of a ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerData {
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub buckets: Vec<Bucket>,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

/// In-process store. Can be seeded from and exported to JSON, and told to fail writes for
/// specific transaction ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<LedgerData>,
    failing_updates: RwLock<HashSet<Uuid>>,
}

impl MemoryStore {
    pub fn new(data: LedgerData) -> Self {
        Self {
            data: RwLock::new(data),
            failing_updates: RwLock::new(HashSet::new()),
        }
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        let data: LedgerData = serde_json::from_str(json)?;
        Ok(Self::new(data))
    }

    pub async fn to_json(&self) -> CoreResult<String> {
        let data = self.data.read().await;
        Ok(serde_json::to_string_pretty(&*data)?)
    }

    pub async fn data(&self) -> LedgerData {
        self.data.read().await.clone()
    }

    pub async fn insert_budget(&self, budget: Budget) -> Uuid {
        let id = budget.id;
        self.data.write().await.budgets.push(budget);
        id
    }

    pub async fn insert_transaction(&self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.data.write().await.transactions.push(transaction);
        id
    }

    /// Makes every later `update_transaction` call for `id` fail with a storage error.
    pub async fn fail_updates_for(&self, id: Uuid) {
        self.failing_updates.write().await.insert(id);
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn list_budgets(&self) -> CoreResult<Vec<Budget>> {
        Ok(self.data.read().await.budgets.clone())
    }

    async fn list_transactions(&self) -> CoreResult<Vec<Transaction>> {
        Ok(self.data.read().await.transactions.clone())
    }

    async fn list_categories(&self) -> CoreResult<Vec<Category>> {
        Ok(self.data.read().await.categories.clone())
    }

    async fn list_buckets(&self) -> CoreResult<Vec<Bucket>> {
        Ok(self.data.read().await.buckets.clone())
    }

    async fn list_recipients(&self) -> CoreResult<Vec<Recipient>> {
        Ok(self.data.read().await.recipients.clone())
    }

    async fn list_accounts(&self) -> CoreResult<Vec<Account>> {
        Ok(self.data.read().await.accounts.clone())
    }

    async fn create_transaction(&self, fields: NewTransaction) -> CoreResult<Uuid> {
        let id = Uuid::new_v4();
        self.data
            .write()
            .await
            .transactions
            .push(fields.into_transaction(id));
        Ok(id)
    }

    async fn update_transaction(&self, id: Uuid, patch: TransactionPatch) -> CoreResult<()> {
        if self.failing_updates.read().await.contains(&id) {
            return Err(CoreError::Storage(format!(
                "write rejected for transaction {}",
                id
            )));
        }
        let mut data = self.data.write().await;
        let txn = data
            .transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        txn.apply(patch);
        Ok(())
    }

    async fn delete_transaction(&self, id: Uuid) -> CoreResult<()> {
        let mut data = self.data.write().await;
        let before = data.transactions.len();
        data.transactions.retain(|txn| txn.id != id);
        if data.transactions.len() == before {
            return Err(CoreError::TransactionNotFound(id));
        }
        Ok(())
    }

    async fn update_budget(&self, id: Uuid, patch: BudgetPatch) -> CoreResult<()> {
        let mut data = self.data.write().await;
        let budget = data
            .budgets
            .iter_mut()
            .find(|budget| budget.id == id)
            .ok_or(CoreError::BudgetNotFound(id))?;
        budget.apply(patch);
        Ok(())
    }

    async fn delete_budget(&self, id: Uuid) -> CoreResult<()> {
        let mut data = self.data.write().await;
        let before = data.budgets.len();
        data.budgets.retain(|budget| budget.id != id);
        if data.budgets.len() == before {
            return Err(CoreError::BudgetNotFound(id));
        }
        Ok(())
    }
}
