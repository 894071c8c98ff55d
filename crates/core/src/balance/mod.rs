//! Ledger aggregation.
//!
//! Turns a project's expense records into a signed net balance per participant.

pub mod aggregator;
pub mod error;
pub mod types;

#[cfg(test)]
mod props;

pub use aggregator::BalanceAggregator;
pub use error::BalanceOverflow;
pub use types::Balances;
