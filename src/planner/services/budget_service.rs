use uuid::Uuid;

use crate::domain::{Budget, BudgetPatch, Displayable};
use crate::planner::snapshot::LedgerSnapshot;
use crate::storage::LedgerStore;

use super::ServiceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The budget still had linked transactions and was switched off instead.
    Deactivated { linked_transactions: usize },
    Deleted,
}

pub struct BudgetService;

impl BudgetService {
    /// Checks a budget before it is handed to the store for creation or update.
    pub fn validate(budget: &Budget) -> ServiceResult<()> {
        budget.validate()
    }

    /// Removes a budget while keeping linked transaction history reachable.
    pub async fn remove(store: &dyn LedgerStore, budget_id: Uuid) -> ServiceResult<RemovalOutcome> {
        let snapshot = LedgerSnapshot::load(store).await?;
        let label = snapshot.budget(budget_id)?.display_label();
        let linked = snapshot.linked_transactions(budget_id).count();
        if linked > 0 {
            store
                .update_budget(budget_id, BudgetPatch::deactivate())
                .await?;
            tracing::info!(%budget_id, budget = %label, linked, "budget deactivated");
            Ok(RemovalOutcome::Deactivated {
                linked_transactions: linked,
            })
        } else {
            store.delete_budget(budget_id).await?;
            tracing::info!(%budget_id, budget = %label, "budget deleted");
            Ok(RemovalOutcome::Deleted)
        }
    }
}
