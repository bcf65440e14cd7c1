pub mod services;
pub mod snapshot;
pub mod time;

pub use snapshot::LedgerSnapshot;
pub use time::{Clock, FixedClock, SystemClock};
