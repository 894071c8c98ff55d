//! Validation errors for expense records.

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons an expense record is rejected before aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    /// Payer identity is empty.
    #[error("Payer identity cannot be empty")]
    EmptyPayer,

    /// Amount is zero or negative.
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Nobody shares the cost.
    #[error("Expense must have at least one participant")]
    NoParticipants,

    /// A participant identity is empty.
    #[error("Participant at position {0} has an empty identity")]
    EmptyParticipant(usize),
}

impl ExpenseError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPayer => "EMPTY_PAYER",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::NoParticipants => "NO_PARTICIPANTS",
            Self::EmptyParticipant(_) => "EMPTY_PARTICIPANT",
        }
    }
}
