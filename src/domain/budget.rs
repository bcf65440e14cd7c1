use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};
use crate::errors::CoreError;

/// How often a budget falls due, anchored at [`Budget::due_date`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Once,
    Daily,
    Weekly,
    /// Steps one calendar month at a time, landing on `day_of_month` clamped to the
    /// month's last day.
    Monthly {
        #[serde(default)]
        day_of_month: Option<u32>,
    },
    Yearly,
    Custom {
        interval_days: u32,
    },
}

impl Frequency {
    pub fn monthly_on(day_of_month: u32) -> Self {
        Frequency::Monthly {
            day_of_month: Some(day_of_month),
        }
    }

    pub fn every_days(interval_days: u32) -> Self {
        Frequency::Custom { interval_days }
    }

    pub fn label(&self) -> String {
        match self {
            Frequency::Once => "Once".into(),
            Frequency::Daily => "Daily".into(),
            Frequency::Weekly => "Weekly".into(),
            Frequency::Monthly {
                day_of_month: Some(day),
            } => format!("Monthly on day {}", day),
            Frequency::Monthly { day_of_month: None } => "Monthly".into(),
            Frequency::Yearly => "Yearly".into(),
            Frequency::Custom { interval_days: 1 } => "Every day".into(),
            Frequency::Custom { interval_days } => format!("Every {} days", interval_days),
        }
    }
}

/// A planned bill, income or goal line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub description: String,
    /// Negative for expenses, zero or positive for income.
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_cost: Option<f64>,
    pub frequency: Frequency,
    /// Anchor date of the first occurrence.
    pub due_date: NaiveDate,
    #[serde(default = "Budget::default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_flexible: bool,
    #[serde(default)]
    pub is_goal: bool,
    pub category_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
}

impl Budget {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        frequency: Frequency,
        due_date: NaiveDate,
        category_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            transaction_cost: None,
            frequency,
            due_date,
            is_active: true,
            is_flexible: false,
            is_goal: false,
            category_id,
            recipient_id: None,
            account_id: None,
        }
    }

    pub fn with_recipient(mut self, recipient_id: Uuid) -> Self {
        self.recipient_id = Some(recipient_id);
        self
    }

    pub fn with_account(mut self, account_id: Uuid) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_transaction_cost(mut self, cost: f64) -> Self {
        self.transaction_cost = Some(cost);
        self
    }

    pub fn flexible(mut self) -> Self {
        self.is_flexible = true;
        self
    }

    pub fn goal(mut self) -> Self {
        self.is_goal = true;
        self
    }

    /// Amount an occurrence must reach to count as settled, including the transaction cost.
    pub fn target(&self) -> f64 {
        self.amount + self.transaction_cost.unwrap_or(0.0)
    }

    /// Follows the sign of [`Budget::target`]: settles once payments reach down to it.
    pub fn is_expense(&self) -> bool {
        self.target() < 0.0
    }

    /// Follows the sign of `amount` alone; used for display ordering. [`Budget::validate`]
    /// keeps it the opposite of [`Budget::is_expense`].
    pub fn is_income(&self) -> bool {
        self.amount >= 0.0
    }

    /// Checks the configuration a budget must satisfy before it is stored.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.description.trim().is_empty() {
            return Err(CoreError::Validation("description is required".into()));
        }
        if !self.amount.is_finite() || self.amount == 0.0 {
            return Err(CoreError::Validation(
                "amount must be a non-zero number".into(),
            ));
        }
        if let Some(cost) = self.transaction_cost {
            if !cost.is_finite() {
                return Err(CoreError::Validation(
                    "transaction cost must be a number".into(),
                ));
            }
        }
        if self.is_income() == self.is_expense() {
            return Err(CoreError::Validation(
                "transaction cost must not flip the sign of the amount".into(),
            ));
        }
        match self.frequency {
            Frequency::Monthly { day_of_month: None } => Err(CoreError::Validation(
                "monthly budgets need a day of month".into(),
            )),
            Frequency::Monthly {
                day_of_month: Some(day),
            } if !(1..=31).contains(&day) => Err(CoreError::Validation(format!(
                "day of month must be between 1 and 31, got {}",
                day
            ))),
            Frequency::Custom { interval_days: 0 } => Err(CoreError::Validation(
                "custom interval must be at least one day".into(),
            )),
            _ => Ok(()),
        }
    }

    pub fn apply(&mut self, patch: BudgetPatch) {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(is_flexible) = patch.is_flexible {
            self.is_flexible = is_flexible;
        }
    }

    fn default_active() -> bool {
        true
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Budget {
    fn name(&self) -> &str {
        &self.description
    }
}

impl Displayable for Budget {
    fn display_label(&self) -> String {
        format!(
            "budget:{} {} [{}]",
            self.id,
            self.description,
            self.frequency.label()
        )
    }
}

/// Partial update applied through [`crate::storage::LedgerStore::update_budget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub frequency: Option<Frequency>,
    pub due_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub is_flexible: Option<bool>,
}

impl BudgetPatch {
    pub fn deactivate() -> Self {
        Self {
            is_active: Some(false),
            ..Self::default()
        }
    }
}
