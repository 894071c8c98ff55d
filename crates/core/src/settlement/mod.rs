//! Debt settlement.
//!
//! This module turns net balances into payments:
//! - Greedy largest-debtor / largest-creditor planner
//! - Transfer and plan types, including replay against balances
//! - Project settlement service over an expense repository
//! - Error types for aggregation and planning

pub mod error;
pub mod planner;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use error::SettlementError;
pub use planner::SettlementPlanner;
pub use service::SettlementService;
pub use types::{ProjectSettlement, SettlementPlan, Transfer};
