//! Ledger records as stored by the ledger store. The engine only reads these.

pub mod budget;
pub mod common;
pub mod records;
pub mod transaction;

pub use budget::{Budget, BudgetPatch, Frequency};
pub use common::{find_by_id, Displayable, Identifiable, NamedEntity};
pub use records::{Account, Bucket, Category, Recipient};
pub use transaction::{NewTransaction, Transaction, TransactionPatch};
