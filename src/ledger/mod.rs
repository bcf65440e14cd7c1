//! Occurrence engine: due-date generation, payment aggregation, display buckets, period
//! summaries and transaction matching.

pub mod calendar;
pub mod matcher;
pub mod occurrence;
pub mod period;
pub mod recurring;
pub mod time_group;

pub use calendar::Calendar;
pub use matcher::{rank_candidates, MatchCandidate, MatchCriteria};
pub use occurrence::{build_occurrences, BudgetOccurrence, PaymentState};
pub use period::{PeriodBounds, PeriodKind, PeriodSummary};
pub use recurring::{DueDates, MAX_OCCURRENCES};
pub use time_group::{group_occurrences, sort_occurrences, OccurrenceGroup, TimeGroup};
