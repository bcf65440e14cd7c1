//! Ledger store boundary. The engine reads whole collections and writes transaction and
//! budget updates back one call at a time.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Account, Bucket, Budget, BudgetPatch, Category, NewTransaction, Recipient, Transaction,
    TransactionPatch,
};
use crate::errors::CoreResult;

pub use memory::{LedgerData, MemoryStore};

/// Abstraction over persistence backends holding the ledger's record collections.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn list_budgets(&self) -> CoreResult<Vec<Budget>>;
    async fn list_transactions(&self) -> CoreResult<Vec<Transaction>>;
    async fn list_categories(&self) -> CoreResult<Vec<Category>>;
    async fn list_buckets(&self) -> CoreResult<Vec<Bucket>>;
    async fn list_recipients(&self) -> CoreResult<Vec<Recipient>>;
    async fn list_accounts(&self) -> CoreResult<Vec<Account>>;

    async fn create_transaction(&self, fields: NewTransaction) -> CoreResult<Uuid>;
    async fn update_transaction(&self, id: Uuid, patch: TransactionPatch) -> CoreResult<()>;
    async fn delete_transaction(&self, id: Uuid) -> CoreResult<()>;

    async fn update_budget(&self, id: Uuid, patch: BudgetPatch) -> CoreResult<()>;
    async fn delete_budget(&self, id: Uuid) -> CoreResult<()>;
}
