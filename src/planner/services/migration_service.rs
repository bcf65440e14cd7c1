//! One-time backfill of `occurrence_date` on transactions linked before occurrences existed.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{find_by_id, Budget, Transaction, TransactionPatch};
use crate::errors::CoreError;
use crate::ledger::recurring::latest_due_on_or_before;
use crate::planner::snapshot::LedgerSnapshot;
use crate::storage::LedgerStore;

use super::ServiceResult;

#[derive(Debug, Default)]
pub struct MigrationReport {
    pub updated: Vec<Uuid>,
    /// Linked to a budget that no longer exists.
    pub skipped: Vec<Uuid>,
    pub failed: Vec<(Uuid, CoreError)>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.updated.is_empty() && self.failed.is_empty()
    }
}

/// Occurrence dates to assign: linked transactions without one get the budget's latest due
/// date at or before the transaction date. Transactions that already carry a date are left
/// alone, so planning again after applying yields nothing.
pub fn plan_backfill(
    budgets: &[Budget],
    transactions: &[Transaction],
) -> (Vec<(Uuid, NaiveDate)>, Vec<Uuid>) {
    let mut assignments = Vec::new();
    let mut orphans = Vec::new();
    for txn in transactions.iter().filter(|txn| txn.occurrence_date.is_none()) {
        let Some(budget_id) = txn.budget_id else {
            continue;
        };
        match find_by_id(budgets, budget_id) {
            Some(budget) => assignments.push((txn.id, latest_due_on_or_before(budget, txn.date))),
            None => orphans.push(txn.id),
        }
    }
    (assignments, orphans)
}

pub struct MigrationService;

impl MigrationService {
    pub async fn backfill_occurrence_dates(
        store: &dyn LedgerStore,
    ) -> ServiceResult<MigrationReport> {
        let snapshot = LedgerSnapshot::load(store).await?;
        let (assignments, orphans) = plan_backfill(&snapshot.budgets, &snapshot.transactions);
        let mut report = MigrationReport {
            skipped: orphans,
            ..MigrationReport::default()
        };
        for id in &report.skipped {
            tracing::warn!(transaction_id = %id, "linked budget missing, occurrence not assigned");
        }
        for (id, occurrence_date) in assignments {
            match store
                .update_transaction(id, TransactionPatch::occurrence_date(occurrence_date))
                .await
            {
                Ok(()) => report.updated.push(id),
                Err(error) => {
                    tracing::warn!(transaction_id = %id, %error, "occurrence backfill failed");
                    report.failed.push((id, error));
                }
            }
        }
        tracing::info!(
            updated = report.updated.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "occurrence dates backfilled"
        );
        Ok(report)
    }
}
