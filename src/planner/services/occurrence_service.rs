//! Read-side queries over budget occurrences.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::Config;
use crate::ledger::{
    group_occurrences, occurrence::budget_occurrences, BudgetOccurrence, OccurrenceGroup,
};
use crate::planner::{snapshot::LedgerSnapshot, time::Clock};
use crate::storage::LedgerStore;

use super::ServiceResult;

/// Recomputes occurrences from a fresh snapshot on every call.
pub struct OccurrenceService;

impl OccurrenceService {
    /// Reads the ledger. Every query below works off the returned snapshot.
    pub async fn load(store: &dyn LedgerStore) -> ServiceResult<LedgerSnapshot> {
        LedgerSnapshot::load(store).await
    }

    /// All occurrences of active budgets up to the configured horizon.
    pub fn occurrences<'a>(
        snapshot: &'a LedgerSnapshot,
        clock: &dyn Clock,
        config: &Config,
    ) -> Vec<BudgetOccurrence<'a>> {
        let calendar = config.calendar(clock);
        let occurrences = snapshot.occurrences(&calendar, config.horizon(calendar.today()));
        tracing::debug!(count = occurrences.len(), "occurrences rebuilt");
        occurrences
    }

    /// Visible occurrences bucketed and sorted for display.
    pub fn agenda<'a>(
        snapshot: &'a LedgerSnapshot,
        clock: &dyn Clock,
        config: &Config,
    ) -> Vec<OccurrenceGroup<'a>> {
        group_occurrences(Self::occurrences(snapshot, clock, config))
    }

    pub fn for_budget<'a>(
        snapshot: &'a LedgerSnapshot,
        budget_id: Uuid,
        clock: &dyn Clock,
        config: &Config,
    ) -> ServiceResult<Vec<BudgetOccurrence<'a>>> {
        let budget = snapshot.budget(budget_id)?;
        let calendar = config.calendar(clock);
        Ok(budget_occurrences(
            budget,
            &snapshot.transactions,
            &calendar,
            config.horizon(calendar.today()),
        ))
    }

    /// The occurrence of `budget_id` due on `due_date`, if the budget falls due that day.
    pub fn find<'a>(
        snapshot: &'a LedgerSnapshot,
        budget_id: Uuid,
        due_date: NaiveDate,
        clock: &dyn Clock,
        config: &Config,
    ) -> ServiceResult<Option<BudgetOccurrence<'a>>> {
        Ok(Self::for_budget(snapshot, budget_id, clock, config)?
            .into_iter()
            .find(|occurrence| occurrence.due_date == due_date))
    }

    /// Earliest occurrence of the budget that is not yet settled.
    pub fn next_open<'a>(
        snapshot: &'a LedgerSnapshot,
        budget_id: Uuid,
        clock: &dyn Clock,
        config: &Config,
    ) -> ServiceResult<Option<BudgetOccurrence<'a>>> {
        Ok(Self::for_budget(snapshot, budget_id, clock, config)?
            .into_iter()
            .find(|occurrence| !occurrence.is_completed))
    }
}
