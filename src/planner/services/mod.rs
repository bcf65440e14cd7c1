pub mod budget_service;
pub mod link_service;
pub mod migration_service;
pub mod occurrence_service;
pub mod summary_service;

pub use budget_service::{BudgetService, RemovalOutcome};
pub use link_service::{LinkFailure, LinkReport, LinkService, PaymentDraft, RankedTransaction};
pub use migration_service::{MigrationReport, MigrationService};
pub use occurrence_service::OccurrenceService;
pub use summary_service::SummaryService;

use crate::errors::CoreError;

pub type ServiceResult<T> = Result<T, CoreError>;
