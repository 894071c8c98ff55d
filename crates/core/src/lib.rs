//! Core business logic for Splitledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Balance aggregation, debt settlement and the expense store live here.
//!
//! # Modules
//!
//! - `expense` - Expense records and their validation rules
//! - `balance` - Net balance per participant from a batch of records
//! - `settlement` - Greedy settlement planner and project settlement service
//! - `store` - Expense repository trait and the in-memory store

pub mod balance;
pub mod expense;
pub mod settlement;
pub mod store;

pub use balance::{BalanceAggregator, BalanceOverflow, Balances};
pub use expense::{ExpenseError, ExpenseRecord};
pub use settlement::{
    ProjectSettlement, SettlementError, SettlementPlan, SettlementPlanner, SettlementService,
    Transfer,
};
pub use store::{Expense, ExpenseRepository, InMemoryExpenseStore, NewExpense, Project};
