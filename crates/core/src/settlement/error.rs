//! Settlement error types.
//!
//! Both balance aggregation and plan generation are all-or-nothing: an error
//! means no partial result was produced.

use rust_decimal::Decimal;
use splitledger_shared::AppError;
use thiserror::Error;

use crate::balance::BalanceOverflow;
use crate::expense::ExpenseError;

/// Errors surfaced by the aggregator and the planner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// A record in the batch failed validation. The whole batch is rejected.
    #[error("Expense record #{index} is invalid: {reason}")]
    InvalidExpense {
        /// Zero-based position of the record in the input batch.
        index: usize,
        /// The rule it violated.
        #[source]
        reason: ExpenseError,
    },

    /// Adding up the batch pushed a balance out of the `Decimal` range.
    #[error("Expense record #{index} overflows the balance of {}", .source.participant)]
    AmountOverflow {
        /// Zero-based position of the record that overflowed.
        index: usize,
        /// The balance that could not be updated.
        #[source]
        source: BalanceOverflow,
    },

    /// One side of the plan ran out while the other still held a real balance.
    #[error("Settlement left {participant} with an unsettled balance of {remaining}")]
    UnbalancedResult {
        /// First participant whose balance could not be matched.
        participant: String,
        /// Balance left over after matching.
        remaining: Decimal,
    },
}

impl SettlementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidExpense { .. } => "INVALID_EXPENSE",
            Self::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
            Self::UnbalancedResult { .. } => "UNBALANCED_RESULT",
        }
    }
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::InvalidExpense { .. } | SettlementError::AmountOverflow { .. } => {
                Self::Validation(err.to_string())
            }
            SettlementError::UnbalancedResult { .. } => Self::Internal(err.to_string()),
        }
    }
}
