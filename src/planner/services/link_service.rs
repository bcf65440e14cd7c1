//! Write-side reconciliation: linking existing transactions to an occurrence, recording new
//! payments and undoing links.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Budget, Displayable, NewTransaction, Transaction, TransactionPatch};
use crate::errors::CoreError;
use crate::ledger::{matcher::rank_candidates, recurring::is_due_on, MatchCriteria};
use crate::planner::{snapshot::LedgerSnapshot, time::Clock};
use crate::storage::LedgerStore;

use super::ServiceResult;

/// An unlinked transaction with its relevance to a budget.
#[derive(Debug, Clone)]
pub struct RankedTransaction {
    pub transaction: Transaction,
    pub score: u32,
}

#[derive(Debug)]
pub struct LinkFailure {
    pub transaction_id: Uuid,
    pub error: CoreError,
}

/// Outcome of a bulk link. Writes are applied one by one and never rolled back, so a
/// partially failed run leaves `linked` in place; retry only `failed`.
#[derive(Debug, Default)]
pub struct LinkReport {
    pub linked: Vec<Uuid>,
    pub failed: Vec<LinkFailure>,
}

impl LinkReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<Uuid> {
        self.failed.iter().map(|f| f.transaction_id).collect()
    }
}

/// Raw user input for a payment against one occurrence.
#[derive(Debug, Clone, Default)]
pub struct PaymentDraft {
    /// Positive magnitude; the sign is taken from the budget.
    pub amount: String,
    pub transaction_cost: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl PaymentDraft {
    pub fn new(amount: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount: amount.into(),
            date: Some(date),
            ..Self::default()
        }
    }

    /// Validates the draft and turns it into store fields linked to the given occurrence.
    pub fn into_new_transaction(
        self,
        budget: &Budget,
        occurrence_date: NaiveDate,
        today: NaiveDate,
    ) -> ServiceResult<NewTransaction> {
        let amount = parse_magnitude(&self.amount, "amount")?;
        if amount == 0.0 {
            return Err(CoreError::Validation("amount must be greater than zero".into()));
        }
        let transaction_cost = match self.transaction_cost.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_magnitude(raw, "transaction cost")?),
        };
        let date = self
            .date
            .ok_or_else(|| CoreError::Validation("date is required".into()))?;
        if date > today {
            return Err(CoreError::Validation(format!(
                "date {} is in the future",
                date
            )));
        }
        let sign = if budget.is_expense() { -1.0 } else { 1.0 };
        let description = self
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| budget.description.clone());
        Ok(NewTransaction {
            description,
            amount: sign * amount,
            transaction_cost: transaction_cost.map(|cost| sign * cost),
            date,
            budget_id: Some(budget.id),
            occurrence_date: Some(occurrence_date),
            category_id: budget.category_id,
            recipient_id: budget.recipient_id,
            account_id: budget.account_id,
        })
    }
}

fn parse_magnitude(raw: &str, field: &str) -> ServiceResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("{} must be a number", field)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{} must be a positive number",
            field
        )));
    }
    Ok(value)
}

fn ensure_occurrence(budget: &Budget, occurrence_date: NaiveDate) -> ServiceResult<()> {
    if is_due_on(budget, occurrence_date) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{} is not a due date of budget {}",
            occurrence_date, budget.id
        )))
    }
}

pub struct LinkService;

impl LinkService {
    /// Unlinked transactions ranked against the budget's recipient, category and description.
    pub async fn candidates(
        store: &dyn LedgerStore,
        budget_id: Uuid,
    ) -> ServiceResult<Vec<RankedTransaction>> {
        let snapshot = LedgerSnapshot::load(store).await?;
        let budget = snapshot.budget(budget_id)?;
        let ranked = rank_candidates(&snapshot.transactions, &MatchCriteria::from(budget))
            .into_iter()
            .map(|candidate| RankedTransaction {
                transaction: candidate.transaction.clone(),
                score: candidate.score,
            })
            .collect::<Vec<_>>();
        tracing::debug!(%budget_id, candidates = ranked.len(), "match candidates ranked");
        Ok(ranked)
    }

    /// Links each transaction to the occurrence in turn. A missing budget or an invalid
    /// occurrence date aborts before any write; per-transaction problems are collected.
    pub async fn link_transactions(
        store: &dyn LedgerStore,
        budget_id: Uuid,
        occurrence_date: NaiveDate,
        transaction_ids: &[Uuid],
    ) -> ServiceResult<LinkReport> {
        let snapshot = LedgerSnapshot::load(store).await?;
        let budget = snapshot.budget(budget_id)?;
        ensure_occurrence(budget, occurrence_date)?;

        let mut report = LinkReport::default();
        for &id in transaction_ids {
            let outcome = match snapshot.transaction(id) {
                Err(err) => Err(err),
                Ok(txn) if txn.budget_id.is_some_and(|linked| linked != budget_id) => {
                    Err(CoreError::Validation(format!(
                        "{} is linked to another budget",
                        txn.display_label()
                    )))
                }
                Ok(_) => {
                    store
                        .update_transaction(id, TransactionPatch::link(budget_id, occurrence_date))
                        .await
                }
            };
            match outcome {
                Ok(()) => report.linked.push(id),
                Err(error) => {
                    tracing::warn!(transaction_id = %id, %error, "link failed");
                    report.failed.push(LinkFailure {
                        transaction_id: id,
                        error,
                    });
                }
            }
        }
        tracing::info!(
            %budget_id,
            %occurrence_date,
            linked = report.linked.len(),
            failed = report.failed.len(),
            "transactions linked"
        );
        Ok(report)
    }

    /// Creates a transaction that settles (part of) one occurrence.
    pub async fn record_payment(
        store: &dyn LedgerStore,
        clock: &dyn Clock,
        budget_id: Uuid,
        occurrence_date: NaiveDate,
        draft: PaymentDraft,
    ) -> ServiceResult<Uuid> {
        let budgets = store.list_budgets().await?;
        let budget = budgets
            .iter()
            .find(|budget| budget.id == budget_id)
            .ok_or(CoreError::BudgetNotFound(budget_id))?;
        ensure_occurrence(budget, occurrence_date)?;
        let fields = draft.into_new_transaction(budget, occurrence_date, clock.today())?;
        let id = store.create_transaction(fields).await?;
        tracing::info!(
            budget = %budget.display_label(),
            %occurrence_date,
            transaction_id = %id,
            "payment recorded"
        );
        Ok(id)
    }

    /// Detaches a transaction from its occurrence; it becomes a match candidate again.
    pub async fn unlink(store: &dyn LedgerStore, transaction_id: Uuid) -> ServiceResult<()> {
        store
            .update_transaction(transaction_id, TransactionPatch::unlink())
            .await?;
        tracing::info!(%transaction_id, "transaction unlinked");
        Ok(())
    }

    pub async fn delete_transaction(
        store: &dyn LedgerStore,
        transaction_id: Uuid,
    ) -> ServiceResult<()> {
        store.delete_transaction(transaction_id).await?;
        tracing::info!(%transaction_id, "transaction deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Frequency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
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

    #[test]
    fn draft_takes_sign_from_budget() {
        let budget = rent();
        let mut draft = PaymentDraft::new(" 1200.50 ", date(2026, 1, 2));
        draft.transaction_cost = Some("1.5".into());
        let fields = draft
            .into_new_transaction(&budget, date(2026, 1, 1), date(2026, 1, 5))
            .expect("valid draft");
        assert_eq!(fields.amount, -1200.5);
        assert_eq!(fields.transaction_cost, Some(-1.5));
        assert_eq!(fields.budget_id, Some(budget.id));
        assert_eq!(fields.occurrence_date, Some(date(2026, 1, 1)));
        assert_eq!(fields.description, "Rent");
    }

    #[test]
    fn draft_rejects_bad_input() {
        let budget = rent();
        let today = date(2026, 1, 5);
        let occurrence = date(2026, 1, 1);
        let cases = [
            PaymentDraft::new("abc", today),
            PaymentDraft::new("0", today),
            PaymentDraft::new("-5", today),
            PaymentDraft::new("10", date(2026, 1, 6)),
            PaymentDraft {
                amount: "10".into(),
                ..PaymentDraft::default()
            },
        ];
        for draft in cases {
            let err = draft
                .clone()
                .into_new_transaction(&budget, occurrence, today)
                .expect_err("draft must be rejected");
            assert_eq!(
                err.kind(),
                crate::errors::ErrorKind::Validation,
                "{draft:?} gave {err}"
            );
        }
    }

    #[test]
    fn occurrence_must_be_a_due_date() {
        let budget = rent();
        assert!(ensure_occurrence(&budget, date(2026, 2, 1)).is_ok());
        assert!(ensure_occurrence(&budget, date(2026, 2, 2)).is_err());
    }
}
