//! Expense storage.
//!
//! The settlement service reads through the `ExpenseRepository` trait; the
//! in-memory store is the implementation shipped with the crate.

pub mod memory;
pub mod repository;
pub mod types;

pub use memory::InMemoryExpenseStore;
pub use repository::ExpenseRepository;
pub use types::{Expense, NewExpense, Project};
