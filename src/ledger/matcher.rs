//! Ranks unlinked transactions against a budget so the user can pick which ones to link.

use uuid::Uuid;

use crate::domain::{Budget, Transaction};

pub const RECIPIENT_SCORE: u32 = 100;
pub const CATEGORY_SCORE: u32 = 50;
pub const DESCRIPTION_SCORE: u32 = 25;

/// The budget attributes a transaction is scored against.
#[derive(Debug, Clone, Copy)]
pub struct MatchCriteria<'a> {
    pub description: &'a str,
    pub category_id: Uuid,
    pub recipient_id: Option<Uuid>,
}

impl<'a> From<&'a Budget> for MatchCriteria<'a> {
    fn from(budget: &'a Budget) -> Self {
        Self {
            description: &budget.description,
            category_id: budget.category_id,
            recipient_id: budget.recipient_id,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate<'a> {
    pub transaction: &'a Transaction,
    pub score: u32,
}

/// Substring heuristic: trimmed, case-insensitive, either side containing the other.
/// Blank descriptions never match.
pub fn descriptions_overlap(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

pub fn score_transaction(transaction: &Transaction, criteria: &MatchCriteria<'_>) -> u32 {
    let mut score = 0;
    if let Some(recipient_id) = criteria.recipient_id {
        if transaction.recipient_id == Some(recipient_id) {
            score += RECIPIENT_SCORE;
        }
    }
    if transaction.category_id == criteria.category_id {
        score += CATEGORY_SCORE;
    }
    if descriptions_overlap(&transaction.description, criteria.description) {
        score += DESCRIPTION_SCORE;
    }
    score
}

/// Unlinked transactions with a non-zero score, best first. Equal scores keep input order.
pub fn rank_candidates<'a>(
    transactions: &'a [Transaction],
    criteria: &MatchCriteria<'_>,
) -> Vec<MatchCandidate<'a>> {
    let mut candidates: Vec<_> = transactions
        .iter()
        .filter(|txn| !txn.is_linked())
        .map(|transaction| MatchCandidate {
            transaction,
            score: score_transaction(transaction, criteria),
        })
        .filter(|candidate| candidate.score > 0)
        .collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}
