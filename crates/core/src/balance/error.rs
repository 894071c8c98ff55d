//! Balance arithmetic errors.

use thiserror::Error;

/// A balance update would leave the range a `Decimal` can hold.
///
/// The table is left as it was before the failed update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Balance of {participant} is out of range")]
pub struct BalanceOverflow {
    /// Participant whose balance could not be updated.
    pub participant: String,
}
