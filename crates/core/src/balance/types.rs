//! Net balance per participant.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{is_negligible, round_for_display};

use super::error::BalanceOverflow;

/// Signed net position of every participant, keyed by identity.
///
/// Positive means the participant is owed money, negative means they owe.
/// Absent participants read as zero. Ordered by identity so iteration and
/// serialization are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances(BTreeMap<String, Decimal>);

impl Balances {
    /// Creates an empty balance table.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the balance of `participant`, zero if unknown.
    #[must_use]
    pub fn get(&self, participant: &str) -> Decimal {
        self.0.get(participant).copied().unwrap_or(Decimal::ZERO)
    }

    /// Adds `amount` to `participant`'s balance.
    ///
    /// # Errors
    ///
    /// Returns `BalanceOverflow` if the new balance is out of range.
    pub fn credit(&mut self, participant: &str, amount: Decimal) -> Result<(), BalanceOverflow> {
        if let Some(balance) = self.0.get_mut(participant) {
            *balance = balance.checked_add(amount).ok_or_else(|| BalanceOverflow {
                participant: participant.to_owned(),
            })?;
        } else {
            self.0.insert(participant.to_owned(), amount);
        }
        Ok(())
    }

    /// Subtracts `amount` from `participant`'s balance.
    ///
    /// # Errors
    ///
    /// Returns `BalanceOverflow` if the new balance is out of range.
    pub fn debit(&mut self, participant: &str, amount: Decimal) -> Result<(), BalanceOverflow> {
        self.credit(participant, -amount)
    }

    /// Iterates `(participant, balance)` pairs in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(participant, balance)| (participant.as_str(), *balance))
    }

    /// Number of participants with an entry, settled ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nobody has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all balances. Zero (within rounding) for any well-formed ledger.
    ///
    /// `None` if a partial sum leaves the `Decimal` range.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.0
            .values()
            .try_fold(Decimal::ZERO, |sum, balance| sum.checked_add(*balance))
    }

    /// Returns true if every balance is within `tolerance` of zero.
    #[must_use]
    pub fn is_settled(&self, tolerance: Decimal) -> bool {
        self.0.values().all(|balance| is_negligible(*balance, tolerance))
    }

    /// Copy with every balance rounded to `scale` fractional digits, for display.
    #[must_use]
    pub fn rounded(&self, scale: u32) -> Self {
        Self(
            self.0
                .iter()
                .map(|(participant, balance)| {
                    (participant.clone(), round_for_display(*balance, scale))
                })
                .collect(),
        )
    }

    /// Consumes the table, returning the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Decimal> {
        self.0
    }
}

/// Builds a table from `(participant, balance)` pairs. A repeated participant
/// keeps the last balance given.
impl<S: Into<String>> FromIterator<(S, Decimal)> for Balances {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(participant, balance)| (participant.into(), balance))
                .collect(),
        )
    }
}
