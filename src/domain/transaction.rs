use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// A money movement recorded by the user, optionally linked to one budget occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_cost: Option<f64>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<Uuid>,
    /// Due date of the occurrence this transaction settles. Set whenever `budget_id` is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_date: Option<NaiveDate>,
    pub category_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        category_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            transaction_cost: None,
            date,
            budget_id: None,
            occurrence_date: None,
            category_id,
            recipient_id: None,
            account_id: None,
        }
    }

    pub fn with_recipient(mut self, recipient_id: Uuid) -> Self {
        self.recipient_id = Some(recipient_id);
        self
    }

    pub fn with_transaction_cost(mut self, cost: f64) -> Self {
        self.transaction_cost = Some(cost);
        self
    }

    pub fn linked_to(mut self, budget_id: Uuid, occurrence_date: NaiveDate) -> Self {
        self.budget_id = Some(budget_id);
        self.occurrence_date = Some(occurrence_date);
        self
    }

    /// Signed amount including the transaction cost.
    pub fn total(&self) -> f64 {
        self.amount + self.transaction_cost.unwrap_or(0.0)
    }

    pub fn is_linked(&self) -> bool {
        self.budget_id.is_some()
    }

    pub fn settles(&self, budget_id: Uuid, due_date: NaiveDate) -> bool {
        self.budget_id == Some(budget_id) && self.occurrence_date == Some(due_date)
    }

    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(budget_id) = patch.budget_id {
            self.budget_id = budget_id;
        }
        if let Some(occurrence_date) = patch.occurrence_date {
            self.occurrence_date = occurrence_date;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} {} ({:.2})", self.id, self.description, self.total())
    }
}

/// Fields for a transaction the store has not assigned an id to yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub transaction_cost: Option<f64>,
    pub date: NaiveDate,
    pub budget_id: Option<Uuid>,
    pub occurrence_date: Option<NaiveDate>,
    pub category_id: Uuid,
    pub recipient_id: Option<Uuid>,
    pub account_id: Option<Uuid>,
}

impl NewTransaction {
    pub fn into_transaction(self, id: Uuid) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            transaction_cost: self.transaction_cost,
            date: self.date,
            budget_id: self.budget_id,
            occurrence_date: self.occurrence_date,
            category_id: self.category_id,
            recipient_id: self.recipient_id,
            account_id: self.account_id,
        }
    }
}

/// Partial update for a stored transaction. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub budget_id: Option<Option<Uuid>>,
    pub occurrence_date: Option<Option<NaiveDate>>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
}

impl TransactionPatch {
    pub fn link(budget_id: Uuid, occurrence_date: NaiveDate) -> Self {
        Self {
            budget_id: Some(Some(budget_id)),
            occurrence_date: Some(Some(occurrence_date)),
            ..Self::default()
        }
    }

    pub fn unlink() -> Self {
        Self {
            budget_id: Some(None),
            occurrence_date: Some(None),
            ..Self::default()
        }
    }

    pub fn occurrence_date(occurrence_date: NaiveDate) -> Self {
        Self {
            occurrence_date: Some(Some(occurrence_date)),
            ..Self::default()
        }
    }
}
