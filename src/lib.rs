#![doc(test(attr(deny(warnings))))]

//! Budget Planner expands recurring budgets into dated occurrences, reconciles logged
//! transactions against them, and groups the result for agendas and period summaries.

pub mod config;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod planner;
pub mod storage;
pub mod utils;

pub use errors::{CoreError, CoreResult, ErrorKind};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Planner tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
