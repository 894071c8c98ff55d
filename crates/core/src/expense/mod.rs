//! Expense records as seen by the settlement engine.
//!
//! - `ExpenseRecord` - who paid, how much, and who shares the cost
//! - Record validation rules
//! - Error types for rejected records

pub mod error;
pub mod record;

pub use error::ExpenseError;
pub use record::ExpenseRecord;
